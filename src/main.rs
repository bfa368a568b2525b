use std::{
	env,
	io::{self, Write},
	process::ExitCode,
};

use alea::{Describe, ParseError};
use ariadne::{Color, Label, Report, ReportKind, Source};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(io::stderr)
		.init();

	let args = env::args();
	let input = if args.len() > 1 {
		// Obtain the expression by combining all args passed to the executable, so that an expression split by the
		// shell is reported as a whole. The first argument is ignored since it is the executable itself.
		args.skip(1).collect::<Vec<String>>().join(" ")
	} else {
		let mut lines = io::stdin().lines();

		// If there isn't already input available in stdin, display a prompt for it
		if lines.size_hint().1.is_none() {
			print!("Enter dice expression: ");
			let _ = io::stdout().flush();
		}

		// Grab the first line available from stdin
		match lines.next() {
			Some(Ok(line)) => line,
			Some(Err(err)) => {
				eprintln!("Unable to read input: {err}");
				return ExitCode::FAILURE;
			}
			None => String::new(),
		}
	};

	println!("Input: {input}");

	match alea::parse(&input) {
		Ok(dice) => {
			println!("Parsed: {dice}");
			println!("Deterministic: {}", dice.is_deterministic());

			let rolled = alea::execute(&dice);
			println!();
			println!("Rolled: {}", rolled.describe(None));
			println!("Subtotal: {}", rolled.subtotal);
			println!("Total: {}", rolled.total);
			ExitCode::SUCCESS
		}
		Err(err) => {
			report(&err);
			ExitCode::FAILURE
		}
	}
}

/// Prints a parse error to stderr, pointing at the part of the input it applies to.
fn report(err: &ParseError) {
	let src = "<input>";
	let printed = Report::build(ReportKind::Error, (src, err.span.clone()))
		.with_message("Invalid dice expression")
		.with_label(
			Label::new((src, err.span.clone()))
				.with_message(err.reason.to_string())
				.with_color(Color::Red),
		)
		.finish()
		.eprint((src, Source::from(err.input.as_str())));

	// Fall back to the plain message if the report couldn't be written
	if printed.is_err() {
		eprintln!("{err}");
	}
}
