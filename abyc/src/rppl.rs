use std::io::Write;

use aby_core::parser::prelude::parse_module;

use crate::cli::exit_on_interrupt;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	exit_on_interrupt();

	while let Some(input) = read_input(PROMPT)? {
		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => match parse_module(&input) {
				Ok(parsed) => {
					for statement in &parsed.program.statements {
						println!("{statement}");
					}
				},
				Err(err) => {
					let (message, messages) = err.details();

					println!("Parse error: {}.\n\t{}", message, messages.join(";\n\t"))
				}
			}
		}
	}

	Ok(())
}

/// Prompts and reads one line, `None` at end of input.
pub(crate) fn read_input(prompt: &str) -> std::io::Result<Option<String>> {
	let mut input = String::new();

	print!("{prompt}");
	std::io::stdout().flush()?;

	if std::io::stdin().read_line(&mut input)? == 0 {
		println!();
		return Ok(None);
	}

	if let Some('\n') = input.chars().next_back() {
		input.pop();
	}
	if let Some('\r') = input.chars().next_back() {
		input.pop();
	}

	Ok(Some(input))
}
