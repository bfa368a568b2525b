use crate::{
	dice::{Dice, Selection},
	parse::{parse, Reason},
};

#[test]
fn single_d20() {
	assert_eq!(parse("1d20").unwrap(), Dice::new(1, 20));
}

#[test]
fn implicit_count() {
	assert_eq!(parse("d20").unwrap(), Dice::new(1, 20));
}

#[test]
fn positive_modifier() {
	let dice = parse("2d6+3").unwrap();
	assert_eq!(dice, Dice::builder().count(2).sides(6).modifier(3).build());
	assert_eq!(dice.selection, None);
}

#[test]
fn negative_modifier() {
	let dice = parse("3d8-2").unwrap();
	assert_eq!(dice.modifier, -2);
}

#[test]
fn keep_highest() {
	let dice = parse("2d20kh1").unwrap();
	assert_eq!(
		dice,
		Dice {
			count: 2,
			sides: 20,
			modifier: 0,
			selection: Some(Selection::KeepHigh(1)),
		}
	);
}

#[test]
fn drop_lowest() {
	let dice = parse("4d6dl1").unwrap();
	assert_eq!(
		dice,
		Dice {
			count: 4,
			sides: 6,
			modifier: 0,
			selection: Some(Selection::DropLow(1)),
		}
	);
}

#[test]
fn every_selector() {
	assert_eq!(parse("3d6kh2").unwrap().selection, Some(Selection::KeepHigh(2)));
	assert_eq!(parse("3d6kl2").unwrap().selection, Some(Selection::KeepLow(2)));
	assert_eq!(parse("3d6dh2").unwrap().selection, Some(Selection::DropHigh(2)));
	assert_eq!(parse("3d6dl2").unwrap().selection, Some(Selection::DropLow(2)));
}

#[test]
fn selector_and_modifier() {
	let dice = parse("5d10dh2-1").unwrap();
	assert_eq!(dice, Dice::builder().count(5).sides(10).drop_high(2).modifier(-1).build());
}

#[test]
fn case_insensitive() {
	assert_eq!(parse("2D20KH1").unwrap(), parse("2d20kh1").unwrap());
	assert_eq!(parse("4D6dL1").unwrap(), parse("4d6dl1").unwrap());
}

#[test]
fn surrounding_whitespace() {
	assert_eq!(parse("  2d6+3\t\n").unwrap(), parse("2d6+3").unwrap());
}

#[test]
fn leading_zeros() {
	assert_eq!(parse("02d020+03").unwrap(), Dice::builder().count(2).sides(20).modifier(3).build());
}

#[test]
fn parsing_is_deterministic() {
	for expr in ["d20", "2d6+3", "2d20kh1", "4d6dl1", "100d1000kl50-7"] {
		assert_eq!(parse(expr).unwrap(), parse(expr).unwrap());
	}
}

#[test]
fn fromstr() {
	let dice: Dice = "2d20kl1+4".parse().unwrap();
	assert_eq!(dice, Dice::builder().count(2).sides(20).keep_low(1).modifier(4).build());
}

#[test]
fn display_matches_notation() {
	for expr in ["1d20", "2d6+3", "2d20kh1", "4d6dl1-1", "100d1000kl50"] {
		assert_eq!(parse(expr).unwrap().to_string(), expr);
	}
	assert_eq!(parse("d20").unwrap().to_string(), "1d20");
}

#[test]
fn empty() {
	for expr in ["", "   ", "\t\n"] {
		let err = parse(expr).unwrap_err();
		assert_eq!(err.reason, Reason::Empty);
		assert_eq!(err.input, expr);
		assert!(err.to_string().contains("empty expression"));
	}
}

#[test]
fn garbage() {
	for expr in ["abc", "20", "d", "2d", "2x6", "2d6+", "2d6kh", "2d6k1", "d20d6", "2d6+3+1", "-d6", "1d6kh1dl1"] {
		let err = parse(expr).unwrap_err();
		assert_eq!(err.reason, Reason::Invalid, "expression {expr:?}");
		assert!(err.to_string().contains("invalid expression"));
	}
}

#[test]
fn internal_whitespace() {
	for expr in ["2 d6", "2d6 + 3", "2d20 kh1", "2d20kh 1"] {
		assert_eq!(parse(expr).unwrap_err().reason, Reason::Invalid, "expression {expr:?}");
	}
}

#[test]
fn invalid_span() {
	let err = parse("  2d6x").unwrap_err();
	assert_eq!(err.reason, Reason::Invalid);
	assert_eq!(err.span.start, 5);
}

#[test]
fn count_bounds() {
	assert_eq!(parse("1d6").unwrap().count, 1);
	assert_eq!(parse("100d6").unwrap().count, 100);

	let err = parse("0d6").unwrap_err();
	assert_eq!(err.reason, Reason::CountTooLow);
	assert!(err.to_string().contains("must be at least 1"));

	let err = parse("101d6").unwrap_err();
	assert_eq!(err.reason, Reason::CountTooHigh);
	assert!(err.to_string().contains("maximum is 100 dice"));
	assert_eq!(err.span, 0..3);

	assert_eq!(parse("99999999999999999999d6").unwrap_err().reason, Reason::CountTooHigh);
}

#[test]
fn sides_bounds() {
	assert_eq!(parse("d1").unwrap().sides, 1);
	assert_eq!(parse("d1000").unwrap().sides, 1000);

	let err = parse("d0").unwrap_err();
	assert_eq!(err.reason, Reason::SidesTooLow);
	assert!(err.to_string().contains("must be at least 1"));

	let err = parse("d1001").unwrap_err();
	assert_eq!(err.reason, Reason::SidesTooHigh);
	assert!(err.to_string().contains("maximum is 1000"));
	assert_eq!(err.span, 1..5);
}

#[test]
fn count_checked_before_sides() {
	assert_eq!(parse("0d0").unwrap_err().reason, Reason::CountTooLow);
	assert_eq!(parse("101d1001").unwrap_err().reason, Reason::CountTooHigh);
}

#[test]
fn keep_bounds() {
	assert_eq!(parse("2d20kh2").unwrap().selection, Some(Selection::KeepHigh(2)));

	let err = parse("2d20kh0").unwrap_err();
	assert_eq!(err.reason, Reason::KeepTooLow);
	assert!(err.to_string().contains("must be at least 1"));

	let err = parse("2d20kh3").unwrap_err();
	assert_eq!(err.reason, Reason::KeepTooHigh);
	assert!(err.to_string().contains("cannot keep more dice than rolled"));

	assert_eq!(parse("2d20kl3").unwrap_err().reason, Reason::KeepTooHigh);
	assert_eq!(parse("d20kh2").unwrap_err().reason, Reason::KeepTooHigh);
}

#[test]
fn drop_bounds() {
	assert_eq!(parse("2d20dh1").unwrap().selection, Some(Selection::DropHigh(1)));

	let err = parse("4d6dl0").unwrap_err();
	assert_eq!(err.reason, Reason::DropTooLow);
	assert!(err.to_string().contains("must be at least 1"));

	let err = parse("2d20dh2").unwrap_err();
	assert_eq!(err.reason, Reason::DropTooHigh);
	assert!(err.to_string().contains("cannot drop all or more dice than rolled"));

	assert_eq!(parse("2d20dl5").unwrap_err().reason, Reason::DropTooHigh);
	assert_eq!(parse("d20dl1").unwrap_err().reason, Reason::DropTooHigh);
}

#[test]
fn sides_checked_before_selection() {
	assert_eq!(parse("2d0kh3").unwrap_err().reason, Reason::SidesTooLow);
}

#[test]
fn modifier_bounds() {
	assert_eq!(parse("d20+2147483647").unwrap().modifier, i32::MAX);
	assert_eq!(parse("d20-2147483648").unwrap().modifier, i32::MIN);
	assert_eq!(parse("d20+2147483648").unwrap_err().reason, Reason::ModifierOutOfRange);
	assert_eq!(parse("d20-99999999999999999999999").unwrap_err().reason, Reason::ModifierOutOfRange);
}

#[test]
fn error_keeps_original_input() {
	let err = parse(" 2D20KH3 ").unwrap_err();
	assert_eq!(err.input, " 2D20KH3 ");
	assert_eq!(err.reason, Reason::KeepTooHigh);
	assert_eq!(err.span, 7..8);
	assert_eq!(err.to_string(), "invalid dice expression \" 2D20KH3 \": cannot keep more dice than rolled");
}
