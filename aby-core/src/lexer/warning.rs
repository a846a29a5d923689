use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalWarningType {
    /// String literal reaches end of input without a closing `"`.
    UnterminatedString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalWarning {
    pub warning: LexicalWarningType,
    pub location: SrcSpan,
    pub line: u32,
}

impl LexicalWarning {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.warning {
            LexicalWarningType::UnterminatedString => (
                "Unterminated string literal",
                vec!["The string runs to the end of the file.".to_string()]
            ),
        }
    }
}
