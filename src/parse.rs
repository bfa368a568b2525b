//! Parsing of dice notation like `d20`, `2d6+3`, `4d6dl1`, and `2d20kh1-1`.
//!
//! The whole expression is matched against the grammar in a single anchored pass before any of its numbers are
//! checked, so an expression is either entirely valid [`Dice`] or an [`Error`] explaining the first problem found:
//!
//! ```text
//! expr      := count? "d" sides selector? modifier?
//! count     := digits
//! sides     := digits
//! selector  := ("kh" | "kl" | "dh" | "dl") digits
//! modifier  := ("+" | "-") digits
//! ```
//!
//! Letters are case-insensitive and whitespace is only allowed around the expression, not inside it.

use alloc::{borrow::ToOwned, string::String};
use core::{ops::Range, str::FromStr};

use chumsky::prelude::*;

use crate::dice::{Dice, Selection, MAX_COUNT, MAX_SIDES};

/// Parses a dice expression into [`Dice`].
///
/// An omitted count means a single die, and an omitted modifier means 0. Checks are made in a fixed order and the
/// first failure is reported: emptiness, then the grammar, then the count, the sides, and finally the keep/drop count
/// and the modifier.
///
/// # Errors
/// If the expression is empty, doesn't match the grammar, or has a number outside of its allowed range, an error is
/// returned with the input and the [`Reason`] it was rejected.
///
/// # Examples
/// ```
/// use alea::dice::{Dice, Selection};
///
/// let dice = alea::parse("2d20kh1+5")?;
/// assert_eq!(
/// 	dice,
/// 	Dice {
/// 		count: 2,
/// 		sides: 20,
/// 		modifier: 5,
/// 		selection: Some(Selection::KeepHigh(1)),
/// 	}
/// );
///
/// assert_eq!(alea::parse("D20")?, Dice::new(1, 20));
/// # Ok::<(), alea::ParseError>(())
/// ```
///
/// ```
/// use alea::parse::Reason;
///
/// let err = alea::parse("2d20kh3").unwrap_err();
/// assert_eq!(err.reason, Reason::KeepTooHigh);
/// assert_eq!(err.to_string(), "invalid dice expression \"2d20kh3\": cannot keep more dice than rolled");
/// ```
pub fn parse(input: &str) -> Result<Dice, Error> {
	let result = parse_trimmed(input);
	match &result {
		Ok(dice) => tracing::trace!(input, %dice, "parsed dice expression"),
		Err(err) => tracing::debug!(input, reason = %err.reason, "rejected dice expression"),
	}
	result
}

/// Does the actual work for [`parse()`].
fn parse_trimmed(input: &str) -> Result<Dice, Error> {
	let expr = input.trim();
	if expr.is_empty() {
		return Err(Error::new(input, Reason::Empty, 0..input.len()));
	}

	// Spans are reported against the original input, so they need to account for the trimmed whitespace
	let offset = input.len() - input.trim_start().len();
	let shift = |span: Range<usize>| span.start + offset..span.end + offset;

	// ASCII lowercasing keeps byte offsets intact
	let lowercase = expr.to_ascii_lowercase();
	let unchecked = grammar().parse(lowercase.as_str()).into_result().map_err(|errs| {
		let span = errs
			.first()
			.map_or(0..expr.len(), |err| err.span().start..err.span().end);
		Error::new(input, Reason::Invalid, shift(span))
	})?;

	unchecked
		.validate()
		.map_err(|(reason, span)| Error::new(input, reason, shift(span)))
}

impl FromStr for Dice {
	type Err = Error;

	/// Parses a dice expression. See [`parse()`].
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse(s)
	}
}

/// Number as it was written in an expression, along with its location
#[derive(Debug, Clone)]
struct Num {
	/// Digits of the number, possibly with leading zeros
	digits: String,

	/// Location of the digits in the expression
	span: Range<usize>,
}

impl Num {
	/// Gets the value of the number, saturating at [`u32::MAX`] if it has too many digits to fit.
	fn saturating_val(&self) -> u32 {
		self.digits.parse().unwrap_or(u32::MAX)
	}

	/// Gets the value of the number, ensuring it's between 1 and `max` (inclusive).
	fn bounded<T: TryFrom<u32>>(&self, max: u32, too_low: Reason, too_high: Reason) -> Result<T, (Reason, Range<usize>)> {
		let val = self.saturating_val();
		if val < 1 {
			return Err((too_low, self.span.clone()));
		}
		if val > max {
			return Err((too_high, self.span.clone()));
		}
		T::try_from(val).ok().ok_or_else(|| (too_high, self.span.clone()))
	}
}

/// Which kind of selector an expression used
#[derive(Debug, Clone, Copy)]
enum SelectorKind {
	/// `kh`
	KeepHigh,
	/// `kl`
	KeepLow,
	/// `dh`
	DropHigh,
	/// `dl`
	DropLow,
}

/// Expression that matched the grammar but hasn't had its numbers checked yet
#[derive(Debug, Clone)]
struct Unchecked {
	/// Number of dice, if given
	count: Option<Num>,

	/// Number of sides per die
	sides: Num,

	/// Keep/drop selector and its count, if given
	selector: Option<(SelectorKind, Num)>,

	/// Sign and magnitude of the modifier, if given
	modifier: Option<(char, Num)>,
}

impl Unchecked {
	/// Checks all of the numbers of the expression in order, producing the final dice.
	fn validate(self) -> Result<Dice, (Reason, Range<usize>)> {
		let count: u8 = match &self.count {
			Some(count) => count.bounded(u32::from(MAX_COUNT), Reason::CountTooLow, Reason::CountTooHigh)?,
			None => 1,
		};
		let sides: u16 = self
			.sides
			.bounded(u32::from(MAX_SIDES), Reason::SidesTooLow, Reason::SidesTooHigh)?;

		let selection = match &self.selector {
			Some((kind @ (SelectorKind::KeepHigh | SelectorKind::KeepLow), num)) => {
				let n = num.bounded(u32::from(count), Reason::KeepTooLow, Reason::KeepTooHigh)?;
				Some(match kind {
					SelectorKind::KeepHigh => Selection::KeepHigh(n),
					_ => Selection::KeepLow(n),
				})
			}
			Some((kind, num)) => {
				// At least one die must always be left over
				let n = num.bounded(u32::from(count) - 1, Reason::DropTooLow, Reason::DropTooHigh)?;
				Some(match kind {
					SelectorKind::DropHigh => Selection::DropHigh(n),
					_ => Selection::DropLow(n),
				})
			}
			None => None,
		};

		let modifier = match &self.modifier {
			Some((sign, num)) => {
				let magnitude = num
					.digits
					.parse::<i64>()
					.map_err(|_err| (Reason::ModifierOutOfRange, num.span.clone()))?;
				let signed = if *sign == '-' { -magnitude } else { magnitude };
				i32::try_from(signed).map_err(|_err| (Reason::ModifierOutOfRange, num.span.clone()))?
			}
			None => 0,
		};

		Ok(Dice {
			count,
			sides,
			modifier,
			selection,
		})
	}
}

/// Generates a parser for a run of ASCII digits, keeping track of where they are
fn number<'src>() -> impl Parser<'src, &'src str, Num, extra::Err<Rich<'src, char>>> + Clone {
	any()
		.filter(char::is_ascii_digit)
		.repeated()
		.at_least(1)
		.collect::<String>()
		.try_map(|digits, span: SimpleSpan| {
			Ok(Num {
				digits,
				span: span.start..span.end,
			})
		})
}

/// Generates a parser that matches an entire (lowercased) dice expression, expecting end of input after it
fn grammar<'src>() -> impl Parser<'src, &'src str, Unchecked, extra::Err<Rich<'src, char>>> + Clone {
	// Parser for keep/drop selectors (e.g. kh1, dl2)
	let selector = choice((
		just("kh").to(SelectorKind::KeepHigh),
		just("kl").to(SelectorKind::KeepLow),
		just("dh").to(SelectorKind::DropHigh),
		just("dl").to(SelectorKind::DropLow),
	))
	.then(number());

	// Parser for flat modifiers (e.g. +3, -1)
	let modifier = one_of("+-").then(number());

	number()
		.or_not()
		.then_ignore(just('d'))
		.then(number())
		.then(selector.or_not())
		.then(modifier.or_not())
		.then_ignore(end())
		.map(|(((count, sides), selector), modifier)| Unchecked {
			count,
			sides,
			selector,
			modifier,
		})
}

/// An error resulting from parsing a dice expression
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid dice expression {input:?}: {reason}")]
#[non_exhaustive]
pub struct Error {
	/// Expression exactly as it was given to the parser
	pub input: String,

	/// Why the expression was rejected
	pub reason: Reason,

	/// Byte range of the part of [`Self::input`] that the reason applies to
	pub span: Range<usize>,
}

impl Error {
	/// Creates a new parse error for the given input.
	#[must_use]
	pub fn new(input: &str, reason: Reason, span: Range<usize>) -> Self {
		Self {
			input: input.to_owned(),
			reason,
			span,
		}
	}
}

/// Reason a dice expression was rejected
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Reason {
	/// The expression was empty or only whitespace.
	#[error("empty expression")]
	Empty,

	/// The expression doesn't match the dice grammar.
	#[error(
		"invalid expression, expected a format like \"d20\", \"2d6+3\", \"4d6dl1\", or \"2d20kh1-1\" \
		 ([count]d<sides>, optionally kh/kl/dh/dl with a count, optionally +/- a modifier)"
	)]
	Invalid,

	/// The dice count was 0.
	#[error("dice count must be at least 1")]
	CountTooLow,

	/// The dice count was over [`MAX_COUNT`].
	#[error("too many dice, maximum is {} dice", MAX_COUNT)]
	CountTooHigh,

	/// The number of sides was 0.
	#[error("number of sides must be at least 1")]
	SidesTooLow,

	/// The number of sides was over [`MAX_SIDES`].
	#[error("too many sides, maximum is {}", MAX_SIDES)]
	SidesTooHigh,

	/// A keep selector's count was 0.
	#[error("keep count must be at least 1")]
	KeepTooLow,

	/// A keep selector's count was over the dice count.
	#[error("cannot keep more dice than rolled")]
	KeepTooHigh,

	/// A drop selector's count was 0.
	#[error("drop count must be at least 1")]
	DropTooLow,

	/// A drop selector's count was equal to or over the dice count.
	#[error("cannot drop all or more dice than rolled")]
	DropTooHigh,

	/// The modifier doesn't fit in an [`i32`].
	#[error("modifier is out of range")]
	ModifierOutOfRange,
}
