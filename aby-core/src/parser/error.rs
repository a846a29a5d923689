use std::fmt::Display;

use crate::{lexer::prelude::Token, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedIdent {
        found: String,
    },
    ExpectedAssignmentOrCall {
        found: String,
    },
    UnexpectedToken {
        found: String,
        expected: Vec<String>,
    },
    UnknownStatement {
        found: String,
    },
    UnexpectedEof {
        expected: Vec<String>,
    },
    InvalidNumber {
        literal: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan,
    pub line: u32,
}

impl ParseError {
    pub fn at(error: ParseErrorType, token: &Token) -> Self {
        Self {
            error,
            span: token.span,
            line: token.line,
        }
    }

    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedIdent { found } => (
                "Expected identifier",
                vec![format!("Found {found}")]
            ),
            ParseErrorType::ExpectedAssignmentOrCall { found } => (
                "Expected `=` or `(` after identifier",
                vec![format!("Found {found}")]
            ),
            ParseErrorType::UnknownStatement { found } => (
                "Not a statement",
                vec![format!("Found {found}, which cannot start a statement")]
            ),
            ParseErrorType::UnexpectedToken { found, expected } => {
                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this", messages)
            },
            ParseErrorType::UnexpectedEof { expected } => {
                let messages = if expected.is_empty() {
                    vec![]
                } else {
                    vec![format!("Expected {}", expected.join(" or "))]
                };

                ("Unexpected end of file", messages)
            },
            ParseErrorType::InvalidNumber { literal } => (
                "Invalid number literal",
                vec![format!("`{literal}` is not a number")]
            ),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (label, extra) = self.details();

        write!(f, "{label} at line {}", self.line)?;

        if !extra.is_empty() {
            write!(f, ": {}", extra.join(" "))?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

pub fn parse_error<T>(error: ParseErrorType, token: &Token) -> Result<T, ParseError> {
    Err(ParseError::at(error, token))
}
