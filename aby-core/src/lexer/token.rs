use std::fmt::Display;

use crate::utils::prelude::SrcSpan;

pub const KEYWORDS: [&str; 21] = [
    "print", "fun", "return", "for", "while", "foreach", "event", "npc", "input",
    "do", "end", "if", "elif", "else", "to", "true", "false", "and", "or", "not", "in",
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Number,
    String,
    Keyword,
    Symbol,
    Operator,
    Semicolon,
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Identifier => "Identifier",
            Self::Number => "Number",
            Self::String => "String",
            Self::Keyword => "Keyword",
            Self::Symbol => "Symbol",
            Self::Operator => "Operator",
            Self::Semicolon => "Semicolon",
            Self::Eof => "EndOfFile",
        };

        write!(f, "{kind}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub span: SrcSpan,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, span: SrcSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            span,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_symbol(&self, text: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == text
    }

    pub fn is_operator(&self, text: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == text
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == text
    }

    /// How the token reads in an error message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier => format!("the identifier `{}`", self.text),
            TokenKind::Number => format!("the number `{}`", self.text),
            TokenKind::String => "a String".to_string(),
            TokenKind::Keyword => format!("the keyword `{}`", self.text),
            TokenKind::Semicolon => "`;`".to_string(),
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Symbol | TokenKind::Operator => format!("`{}`", self.text),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>4} {:<10} {:?}", self.line, self.kind, self.text)
    }
}
