//! Keep/drop selection of rolls and its related types.

use alloc::vec::Vec;
use core::fmt;

use super::DieRoll;

/// Rule for which rolls of a set of [`Dice`](super::Dice) count towards its total.
///
/// Rolls are ranked by value with a stable sort, so among equal values the die rolled earlier ranks first. Keep
/// variants keep the first `n` ranked rolls; drop variants drop them. When equal values straddle the cut, the
/// earlier roll is therefore the one kept by [`Self::KeepHigh`]/[`Self::KeepLow`] and the one dropped by
/// [`Self::DropHigh`]/[`Self::DropLow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_enums, reason = "Keep and drop in both directions are all there is")]
pub enum Selection {
	/// Keeps only the highest x dice, dropping the rest.
	///
	/// # Examples
	/// ```
	/// use alea::dice::{Dice, Rolled};
	///
	/// // 4d6kh2 rolling [3, 6, 1, 2] keeps the 3 and the 6: 4d6kh2[3, 6, 1 (d), 2 (d)]
	/// let dice = Dice::builder().count(4).sides(6).keep_high(2).build();
	/// let rolled = Rolled::from_dice_and_rolls(dice, [3, 6, 1, 2]);
	/// let kept = rolled.rolls.iter().map(|roll| roll.kept).collect::<Vec<_>>();
	/// assert_eq!(kept, [true, true, false, false]);
	/// assert_eq!(rolled.total, 9);
	/// ```
	KeepHigh(u8),

	/// Keeps only the lowest x dice, dropping the rest.
	///
	/// # Examples
	/// ```
	/// use alea::dice::{Dice, Rolled};
	///
	/// // 2d20kl1 (disadvantage) rolling [14, 7] keeps only the 7: 2d20kl1[14 (d), 7]
	/// let dice = Dice::builder().count(2).sides(20).keep_low(1).build();
	/// let rolled = Rolled::from_dice_and_rolls(dice, [14, 7]);
	/// assert!(rolled.rolls[0].is_dropped());
	/// assert_eq!(rolled.total, 7);
	/// ```
	KeepLow(u8),

	/// Drops the highest x dice, keeping the rest.
	///
	/// # Examples
	/// ```
	/// use alea::dice::{Dice, Rolled};
	///
	/// // 3d8dh1 rolling [8, 2, 8] drops the first 8: 3d8dh1[8 (d), 2, 8]
	/// let dice = Dice::builder().count(3).sides(8).drop_high(1).build();
	/// let rolled = Rolled::from_dice_and_rolls(dice, [8, 2, 8]);
	/// let kept = rolled.rolls.iter().map(|roll| roll.kept).collect::<Vec<_>>();
	/// assert_eq!(kept, [false, true, true]);
	/// assert_eq!(rolled.total, 10);
	/// ```
	DropHigh(u8),

	/// Drops the lowest x dice, keeping the rest.
	///
	/// # Examples
	/// ```
	/// use alea::dice::{Dice, Rolled};
	///
	/// // 4d6dl1 rolling [3, 1, 5, 1] drops the first 1: 4d6dl1[3, 1 (d), 5, 1]
	/// let dice = Dice::builder().count(4).sides(6).drop_low(1).build();
	/// let rolled = Rolled::from_dice_and_rolls(dice, [3, 1, 5, 1]);
	/// let kept = rolled.rolls.iter().map(|roll| roll.kept).collect::<Vec<_>>();
	/// assert_eq!(kept, [true, false, true, true]);
	/// assert_eq!(rolled.total, 9);
	/// ```
	DropLow(u8),
}

impl Selection {
	/// Gets the number of dice the selection keeps or drops.
	#[must_use]
	pub const fn count(self) -> u8 {
		match self {
			Self::KeepHigh(count) | Self::KeepLow(count) | Self::DropHigh(count) | Self::DropLow(count) => count,
		}
	}

	/// Indicates whether the selection names the dice to keep (as opposed to the dice to drop).
	#[must_use]
	pub const fn is_keep(self) -> bool {
		matches!(self, Self::KeepHigh(..) | Self::KeepLow(..))
	}

	/// Indicates whether the selection ranks the highest rolls first.
	#[must_use]
	pub const fn is_high(self) -> bool {
		matches!(self, Self::KeepHigh(..) | Self::DropHigh(..))
	}

	/// Applies the selection to a set of rolls in roll order, marking the rolls that don't make the cut as dropped.
	/// The rolls themselves are never reordered.
	pub fn apply(self, rolls: &mut [DieRoll]) {
		// Rank roll indices by value; sort_by is stable, so ties stay in roll order
		let mut ranked = (0..rolls.len()).collect::<Vec<_>>();
		if self.is_high() {
			ranked.sort_by(|&a, &b| rolls[b].val.cmp(&rolls[a].val));
		} else {
			ranked.sort_by(|&a, &b| rolls[a].val.cmp(&rolls[b].val));
		}

		let cut = usize::from(self.count()).min(ranked.len());
		let (first, rest) = ranked.split_at(cut);
		let to_drop = if self.is_keep() { rest } else { first };
		for &idx in to_drop {
			rolls[idx].drop();
		}
	}

	/// Gets the notation prefix for the selection (`kh`, `kl`, `dh`, or `dl`).
	#[must_use]
	pub const fn symbol(self) -> &'static str {
		match self {
			Self::KeepHigh(..) => "kh",
			Self::KeepLow(..) => "kl",
			Self::DropHigh(..) => "dh",
			Self::DropLow(..) => "dl",
		}
	}
}

impl fmt::Display for Selection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.symbol(), self.count())
	}
}
