use std::fmt::Display;

use super::token::{is_keyword, Token, TokenKind};
use super::warning::{LexicalWarning, LexicalWarningType};
use crate::utils::prelude::SrcSpan;

/// Tokens of a whole source text together with what the lexer tolerated.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
	pub tokens: Vec<Token>,
	pub warnings: Vec<LexicalWarning>,
}

pub fn tokenize(src: &str) -> Lexed {
	let mut lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
	let tokens = lexer.by_ref().collect();

	Lexed {
		tokens,
		warnings: lexer.take_warnings(),
	}
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	line: u32,
	finished: bool,
	input: T,

	warnings: Vec<LexicalWarning>,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tline: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.line, self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			next_position: 0,
			ch: None,
			next_ch: None,
			line: 1,
			finished: false,
			input,

			warnings: vec![],
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	pub fn warnings(&self) -> &[LexicalWarning] {
		&self.warnings
	}

	pub fn take_warnings(&mut self) -> Vec<LexicalWarning> {
		std::mem::take(&mut self.warnings)
	}

	pub fn next_token(&mut self) -> Token {
		loop {
			match self.ch {
				None => {
					let span = SrcSpan::from(self.position, self.position);
					return Token::new(TokenKind::Eof, "", self.line, span);
				},
				Some(ch) if ch.is_whitespace() => {
					self.next_char();
				},
				Some('/') if self.next_ch == Some('/') => self.skip_comment(),
				Some(ch) if ch.is_alphabetic() || ch == '_' => return self.lex_ident(),
				Some(ch) if ch.is_ascii_digit() => return self.lex_number(),
				Some('"') => return self.lex_string(),
				Some(';') => return self.eat_one_char(TokenKind::Semicolon),
				Some(_) => return self.lex_symbol_or_operator(),
			}
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += self.next_ch.map_or(0, |ch| ch.len_utf8() as u32);

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		if ch == Some('\n') {
			self.line += 1;
		}

		ch
	}

	fn eat_one_char(&mut self, kind: TokenKind) -> Token {
		let start_pos = self.position;
		let line = self.line;
		let text = self.next_char().map(String::from).unwrap_or_default();
		let end_pos = self.position;

		Token::new(kind, text, line, SrcSpan::from(start_pos, end_pos))
	}

	fn skip_comment(&mut self) {
		while !matches!(self.ch, Some('\n') | None) {
			self.next_char();
		}
	}

	fn lex_ident(&mut self) -> Token {
		let start_pos = self.position;
		let line = self.line;
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if !(ch.is_alphanumeric() || ch == '_') {
				break;
			}

			ident.push(ch);
			self.next_char();
		}

		let kind = if is_keyword(&ident) {
			TokenKind::Keyword
		} else {
			TokenKind::Identifier
		};

		let token = Token::new(kind, ident, line, SrcSpan::from(start_pos, self.position));
		tracing::trace!(kind = %token.kind, text = %token.text, line, "identified word");

		token
	}

	fn lex_number(&mut self) -> Token {
		let start_pos = self.position;
		let line = self.line;
		let mut value = String::new();

		while let Some(ch) = self.ch {
			if !ch.is_ascii_digit() {
				break;
			}

			value.push(ch);
			self.next_char();
		}

		tracing::trace!(text = %value, line, "identified number");

		Token::new(TokenKind::Number, value, line, SrcSpan::from(start_pos, self.position))
	}

	fn lex_string(&mut self) -> Token {
		let start_pos = self.position;
		let line = self.line;
		let mut value = String::new();

		self.next_char(); // opening quote

		loop {
			match self.ch {
				Some('"') => {
					self.next_char();
					break;
				},
				Some(ch) => {
					value.push(ch);
					self.next_char();
				},
				None => {
					self.warnings.push(LexicalWarning {
						warning: LexicalWarningType::UnterminatedString,
						location: SrcSpan::from(start_pos, self.position),
						line,
					});
					tracing::warn!(line, "unterminated string literal");

					break;
				}
			}
		}

		tracing::trace!(text = %value, line, "identified string");

		Token::new(TokenKind::String, value, line, SrcSpan::from(start_pos, self.position))
	}

	fn lex_symbol_or_operator(&mut self) -> Token {
		let start_pos = self.position;
		let line = self.line;

		let Some(first) = self.next_char() else {
			return Token::new(TokenKind::Eof, "", line, SrcSpan::from(start_pos, start_pos));
		};

		let mut text = String::from(first);

		let kind = match first {
			'=' | '<' | '>' | '!' if self.ch == Some('=') => {
				text.push('=');
				self.next_char();

				TokenKind::Operator
			},
			'=' | '+' | '-' | '*' | '/' | '<' | '>' | '!' => TokenKind::Operator,
			_ => TokenKind::Symbol,
		};

		tracing::trace!(kind = %kind, text = %text, line, "identified symbol");

		Token::new(kind, text, line, SrcSpan::from(start_pos, self.position))
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = Token;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();

		if token.is_eof() {
			self.finished = true;
		}

		Some(token)
	}
}
