use aby_core::lexer::prelude::tokenize;

use crate::cli::exit_on_interrupt;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	exit_on_interrupt();

	while let Some(input) = crate::rppl::read_input(PROMPT)? {
		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				let lexed = tokenize(&input);

				for token in lexed.tokens {
					println!("{token}");
				}

				for warning in lexed.warnings {
					let (message, extra) = warning.details();
					println!("[line {}] Lexical warning: {}", warning.line, message);
					if !extra.is_empty() {
						println!("{}", extra.join("\n"));
					}
				}
			}
		}
	}

	Ok(())
}
