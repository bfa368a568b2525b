//! All functionality for directly creating dice, rolling them, and working with their resulting rolls.
//!
//! This is the home of the dice "primitives": [`Dice`] describes what to roll, a [`Roller`] rolls it, and the
//! resulting [`Rolled`] set records every individual [`DieRoll`] in the order it was rolled.

pub mod roller;
pub mod selection;

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

pub use self::{roller::Roller, selection::Selection};
use crate::describe::Describe;

/// Maximum number of dice that can be rolled at once
pub const MAX_COUNT: u8 = 100;

/// Maximum number of sides a single die can have
pub const MAX_SIDES: u16 = 1000;

/// A set of one or more rollable dice with a specific number of sides, an optional [`Selection`] of which rolls to
/// keep, and a flat modifier to add to the total of the kept rolls.
///
/// Dice obtained from [`parse()`](crate::parse()) always satisfy the bounds checked there (see [`MAX_COUNT`],
/// [`MAX_SIDES`], and the keep/drop limits on [`Selection`]). Dice assembled by hand are trusted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct Dice {
	/// Number of dice to roll
	pub count: u8,

	/// Number of sides for each die
	pub sides: u16,

	/// Flat value added to the sum of the kept rolls
	pub modifier: i32,

	/// Which of the rolls to keep, if not all of them
	pub selection: Option<Selection>,
}

impl Dice {
	/// Creates a new set of dice with a given count and number of sides, keeping every roll and with no modifier.
	#[must_use]
	pub const fn new(count: u8, sides: u16) -> Self {
		Self {
			count,
			sides,
			modifier: 0,
			selection: None,
		}
	}

	/// Creates a new set of dice matching this one but without a selection or modifier.
	#[must_use]
	#[inline]
	pub const fn plain(&self) -> Self {
		Self::new(self.count, self.sides)
	}

	/// Checks whether rolling the dice will always yield the same result, which is only the case for one-sided dice.
	///
	/// # Examples
	/// ```
	/// use alea::Dice;
	///
	/// assert!(Dice::new(3, 1).is_deterministic());
	/// assert!(!Dice::new(1, 20).is_deterministic());
	/// ```
	#[must_use]
	#[inline]
	pub const fn is_deterministic(&self) -> bool {
		self.sides == 1
	}

	/// Creates a new dice builder.
	#[must_use]
	#[inline]
	pub fn builder() -> Builder {
		Builder::default()
	}
}

impl Default for Dice {
	/// Creates the default dice (1d20).
	#[inline]
	fn default() -> Self {
		Self::new(1, 20)
	}
}

impl fmt::Display for Dice {
	/// Formats the dice in canonical notation, such as `1d20`, `2d6+3`, or `4d6dl1-1`.
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.sides)?;
		if let Some(selection) = self.selection {
			write!(f, "{selection}")?;
		}
		if self.modifier != 0 {
			write!(f, "{:+}", self.modifier)?;
		}
		Ok(())
	}
}

/// Single die produced from rolling [`Dice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct DieRoll {
	/// Value that was rolled
	pub val: u16,

	/// Whether the roll counts towards the total (has not been dropped by the dice's selection)
	pub kept: bool,
}

impl DieRoll {
	/// Creates a new, kept die roll with the given value.
	#[must_use]
	pub const fn new(val: u16) -> Self {
		Self { val, kept: true }
	}

	/// Marks this die roll as dropped.
	pub fn drop(&mut self) {
		self.kept = false;
	}

	/// Indicates whether this die roll is being kept.
	#[must_use]
	#[inline]
	pub const fn is_kept(&self) -> bool {
		self.kept
	}

	/// Indicates whether this die roll has been dropped.
	/// This is the direct inverse of [`DieRoll::is_kept()`].
	#[must_use]
	#[inline]
	pub const fn is_dropped(&self) -> bool {
		!self.kept
	}
}

impl fmt::Display for DieRoll {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The format of a die roll is simply the plain numeric value of the roll.
	/// If the roll was dropped, it is appended with ` (d)`.
	///
	/// # Examples
	/// ```
	/// use alea::dice::DieRoll;
	///
	/// let mut roll = DieRoll::new(16);
	/// assert_eq!(roll.to_string(), "16");
	///
	/// roll.drop();
	/// assert_eq!(roll.to_string(), "16 (d)");
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.val, if self.is_dropped() { " (d)" } else { "" })
	}
}

/// Representation of the result from rolling [`Dice`]
///
/// The rolls are always in the order they were rolled, regardless of which ones the dice's selection kept.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct Rolled {
	/// Dice that were rolled to produce this
	pub dice: Dice,

	/// Each individual die roll that was made, in roll order
	pub rolls: Vec<DieRoll>,

	/// Sum of the values of all kept rolls
	pub subtotal: u32,

	/// Modifier that was added to the subtotal
	pub modifier: i32,

	/// Final result: the subtotal plus the modifier
	pub total: i64,
}

impl Rolled {
	/// Creates a new rolled set of dice from a given set of dice and the raw values rolled for them, applying the
	/// dice's selection and calculating the totals.
	///
	/// This is what every [`Roller`] uses to finish a roll, and it can also be used to replay a recorded roll.
	///
	/// # Examples
	/// ```
	/// use alea::{Dice, Rolled};
	///
	/// let dice = Dice::builder().count(4).sides(6).drop_low(1).modifier(2).build();
	/// let rolled = Rolled::from_dice_and_rolls(dice, [3, 1, 5, 4]);
	/// assert_eq!(rolled.subtotal, 12);
	/// assert_eq!(rolled.total, 14);
	/// assert!(rolled.rolls[1].is_dropped());
	/// ```
	#[must_use]
	pub fn from_dice_and_rolls(dice: Dice, rolls: impl IntoIterator<Item = u16>) -> Self {
		let mut rolls = rolls.into_iter().map(DieRoll::new).collect::<Vec<_>>();
		if let Some(selection) = dice.selection {
			selection.apply(&mut rolls);
		}

		let subtotal = rolls
			.iter()
			.filter(|roll| roll.is_kept())
			.map(|roll| u32::from(roll.val))
			.fold(0_u32, u32::saturating_add);

		Self {
			dice,
			rolls,
			subtotal,
			modifier: dice.modifier,
			total: i64::from(subtotal).saturating_add(i64::from(dice.modifier)),
		}
	}

	/// Iterates over the rolls that count towards the total, in roll order.
	pub fn kept(&self) -> impl Iterator<Item = &DieRoll> {
		self.rolls.iter().filter(|roll| roll.is_kept())
	}

	/// Iterates over the rolls that were dropped by the dice's selection, in roll order.
	pub fn dropped(&self) -> impl Iterator<Item = &DieRoll> {
		self.rolls.iter().filter(|roll| roll.is_dropped())
	}
}

impl Describe for Rolled {
	/// Builds a string of the dice the roll is from and a list of all of the individual rolled dice
	/// (see [`DieRoll::fmt()`]).
	///
	/// If `list_limit` is specified and there are more rolls than it, the list of rolled dice will be truncated and
	/// appended with "X more..." (where X is the remaining roll count past the max). A non-zero modifier is appended
	/// after the list.
	///
	/// # Examples
	/// ```
	/// use alea::{Describe, Dice, Rolled};
	///
	/// let dice = Dice::builder().count(4).sides(6).keep_high(2).build();
	/// let rolled = Rolled::from_dice_and_rolls(dice, [6, 2, 5, 3]);
	///
	/// assert_eq!(rolled.describe(None), "4d6kh2[6, 2 (d), 5, 3 (d)]");
	/// assert_eq!(rolled.describe(Some(2)), "4d6kh2[6, 2 (d), 2 more...]");
	///
	/// let dice = Dice::builder().count(2).sides(20).keep_low(1).modifier(-2).build();
	/// let rolled = Rolled::from_dice_and_rolls(dice, [9, 15]);
	/// assert_eq!(rolled.describe(None), "2d20kl1[9, 15 (d)] - 2");
	/// assert_eq!(rolled.to_string(), "2d20kl1[9, 15 (d)] - 2 = 7");
	/// ```
	///
	/// [`DieRoll::fmt()`]: ./struct.DieRoll.html#method.fmt
	fn describe(&self, list_limit: Option<usize>) -> String {
		let list_limit = list_limit.unwrap_or(usize::MAX);
		let total_rolls = self.rolls.len();
		let truncated_rolls = total_rolls.saturating_sub(list_limit);

		// The modifier is shown after the list of rolls rather than as part of the notation
		let mut notation = self.dice;
		notation.modifier = 0;

		format!(
			"{}[{}{}]{}",
			notation,
			self.rolls
				.iter()
				.take(list_limit)
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", "),
			if truncated_rolls > 0 {
				format!(", {truncated_rolls} more...")
			} else {
				String::new()
			},
			match self.modifier {
				0 => String::new(),
				m if m > 0 => format!(" + {m}"),
				m => format!(" - {}", m.unsigned_abs()),
			}
		)
	}
}

impl fmt::Display for Rolled {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`] followed by ` = ` and the total.
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} = {}", self.describe(None), self.total)
	}
}

/// Builds [`Dice`] with a fluent interface.
///
/// The builder does not validate anything; use [`parse()`](crate::parse()) for untrusted input.
///
/// # Examples
///
/// ## Basic dice
/// ```
/// use alea::Dice;
///
/// let dice = Dice::builder().count(2).sides(6).build();
/// assert_eq!(dice, Dice::new(2, 6));
/// ```
///
/// ## Advantage with a modifier
/// ```
/// use alea::dice::{Dice, Selection};
///
/// let dice = Dice::builder().count(2).sides(20).keep_high(1).modifier(5).build();
/// assert_eq!(
/// 	dice,
/// 	Dice {
/// 		count: 2,
/// 		sides: 20,
/// 		modifier: 5,
/// 		selection: Some(Selection::KeepHigh(1)),
/// 	},
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Builder(Dice);

impl Builder {
	/// Sets the number of dice to roll.
	#[must_use]
	pub const fn count(mut self, count: u8) -> Self {
		self.0.count = count;
		self
	}

	/// Sets the number of sides per die.
	#[must_use]
	pub const fn sides(mut self, sides: u16) -> Self {
		self.0.sides = sides;
		self
	}

	/// Sets the flat modifier added to the total.
	#[must_use]
	pub const fn modifier(mut self, modifier: i32) -> Self {
		self.0.modifier = modifier;
		self
	}

	/// Keeps only the highest `count` rolls, replacing any existing selection.
	#[must_use]
	pub const fn keep_high(mut self, count: u8) -> Self {
		self.0.selection = Some(Selection::KeepHigh(count));
		self
	}

	/// Keeps only the lowest `count` rolls, replacing any existing selection.
	#[must_use]
	pub const fn keep_low(mut self, count: u8) -> Self {
		self.0.selection = Some(Selection::KeepLow(count));
		self
	}

	/// Drops the highest `count` rolls, replacing any existing selection.
	#[must_use]
	pub const fn drop_high(mut self, count: u8) -> Self {
		self.0.selection = Some(Selection::DropHigh(count));
		self
	}

	/// Drops the lowest `count` rolls, replacing any existing selection.
	#[must_use]
	pub const fn drop_low(mut self, count: u8) -> Self {
		self.0.selection = Some(Selection::DropLow(count));
		self
	}

	/// Finalizes the dice.
	#[must_use]
	pub const fn build(self) -> Dice {
		self.0
	}
}
