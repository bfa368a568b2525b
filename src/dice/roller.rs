//! Abstractions for rolling [`DieRoll`]s using various means.

use alloc::vec::Vec;
use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;
#[cfg(feature = "secure")]
use rand::{rngs::OsRng, RngCore};

use super::{Dice, DieRoll, Rolled};

/// Rolls dice - what else is there to say?
pub trait Roller {
	/// Rolls a single die.
	#[must_use]
	fn roll_die(&mut self, sides: u16) -> DieRoll;

	/// Rolls a set of dice, one die at a time in order, then applies the dice's selection and modifier.
	fn roll(&mut self, dice: &Dice) -> Rolled
	where
		Self: Sized,
	{
		let mut vals = Vec::with_capacity(usize::from(dice.count));
		for _ in 0..dice.count {
			vals.push(self.roll_die(dice.sides).val);
		}

		let rolled = Rolled::from_dice_and_rolls(*dice, vals);
		tracing::trace!(dice = %dice, total = rolled.total, "rolled dice");
		rolled
	}
}

/// Reduces raw 64-bit random values from `draw` to a uniformly-distributed die value in `1..=sides`.
///
/// Values at or above the largest multiple of `sides` that fits in the 2<sup>64</sup> possible draws are rejected and
/// drawn again, so the result carries no modulo bias for any number of sides. For any `sides` up to
/// [`MAX_SIDES`](super::MAX_SIDES) a redraw is practically never needed.
///
/// One-sided dice always yield 1 without calling `draw`, and zero-sided dice yield 0.
///
/// # Examples
/// ```
/// use alea::dice::roller::uniform;
///
/// let mut draws = [u64::MAX, 41].into_iter();
/// // u64::MAX falls in the biased remainder for d6 and is redrawn
/// assert_eq!(uniform(6, || draws.next().unwrap()), 41 % 6 + 1);
/// assert_eq!(uniform(1, || unreachable!()), 1);
/// ```
pub fn uniform(sides: u16, mut draw: impl FnMut() -> u64) -> u16 {
	if sides <= 1 {
		return sides;
	}

	let sides64 = u64::from(sides);
	// 2^64 mod sides, computed without leaving u64
	let remainder = (u64::MAX % sides64 + 1) % sides64;
	let limit = u64::MAX - remainder;

	loop {
		let val = draw();
		if val <= limit {
			// The remainder is always below sides, so the conversion can't fail
			return u16::try_from(val % sides64).map_or(sides, |face| face + 1);
		}
	}
}

/// Generates rolls using the operating system's cryptographically secure random number generator.
/// Requires the `secure` feature (enabled by default).
///
/// Every die is an independent draw from the OS; nothing is buffered or cached between rolls, and values are reduced
/// to the die's range with [`uniform`].
///
/// # Examples
/// ```
/// use alea::dice::{roller::{Roller, Secure as SecureRoller}, Dice};
///
/// let dice = Dice::new(4, 6);
/// let rolled = SecureRoller.roll(&dice);
/// assert_eq!(rolled.rolls.len(), 4);
/// assert!(rolled.rolls.iter().all(|roll| (1..=6).contains(&roll.val)));
/// ```
#[cfg(feature = "secure")]
#[derive(Debug, Default, Clone, Copy)]
#[expect(clippy::exhaustive_structs, reason = "Stateless")]
pub struct Secure;

#[cfg(feature = "secure")]
impl Roller for Secure {
	/// Rolls a single die using [`OsRng`].
	///
	/// # Panics
	/// If the operating system's random source is unavailable, this will panic.
	#[inline]
	fn roll_die(&mut self, sides: u16) -> DieRoll {
		DieRoll::new(uniform(sides, || OsRng.next_u64()))
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// This roller is *not* cryptographically secure. It exists for reproducible simulations and benchmarks, where a
/// seeded sequence of rolls is more useful than an unpredictable one.
///
/// # Examples
///
/// ## Manually seeded fastrand roller
/// ```
/// use alea::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
///
/// let dice = Dice::new(4, 6);
/// let first = FastRandRoller::with_seed(0x750c38d574400).roll(&dice);
/// let second = FastRandRoller::with_seed(0x750c38d574400).roll(&dice);
/// assert_eq!(first, second);
/// ```
///
/// ## Custom fastrand roller
/// ```
/// use alea::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
/// use fastrand::Rng;
///
/// let rng = Rng::with_seed(0x750c38d574400);
/// let mut roller = FastRandRoller::new(rng);
///
/// let dice = Dice::new(4, 6);
/// let _ = roller.roll(&dice);
/// let _ = roller.roll(&dice);
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(Default))]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Rolls a single die using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_die(&mut self, sides: u16) -> DieRoll {
		DieRoll::new(uniform(sides, || self.0.u64(..)))
	}
}

/// Generates rolls that always have a specific value.
///
/// # Examples
/// ```
/// use alea::dice::{roller::{Roller, Val as ValRoller}, Dice};
///
/// let mut roller = ValRoller(42);
///
/// let dice = Dice::new(4, 6);
/// let rolled = roller.roll(&dice);
/// assert!(rolled.rolls.iter().all(|roll| roll.val == 42));
/// assert_eq!(rolled.total, 168);
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u16);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_die(&mut self, _sides: u16) -> DieRoll {
		DieRoll::new(self.0)
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use alea::dice::{roller::{Max as MaxRoller, Roller}, Dice};
///
/// let mut roller = MaxRoller;
///
/// let dice = Dice::new(4, 6);
/// let rolled = roller.roll(&dice);
/// assert!(rolled.rolls.iter().all(|roll| roll.val == 6));
///
/// let dice = Dice::new(2, 1000);
/// let rolled = roller.roll(&dice);
/// assert!(rolled.rolls.iter().all(|roll| roll.val == 1000));
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the max value (same as the number of sides).
	#[inline]
	fn roll_die(&mut self, sides: u16) -> DieRoll {
		DieRoll::new(sides)
	}
}

/// Generates rolls from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use alea::dice::{roller::{Iter as IterRoller, Roller}, Dice, DieRoll};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3, 4, 10]);
/// let dice = Dice::new(5, 6);
/// assert_eq!(
/// 	roller.roll(&dice).rolls,
/// 	vec![DieRoll::new(1), DieRoll::new(2), DieRoll::new(3), DieRoll::new(4), DieRoll::new(10)]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u16>>(Peekable<I>);

impl<I: Iterator<Item = u16>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u16>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, _sides: u16) -> DieRoll {
		DieRoll::new(self.0.next().expect("iterator is finished"))
	}
}
