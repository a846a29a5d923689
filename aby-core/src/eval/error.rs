use thiserror::Error;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeErrorType {
    #[error("function `{name}` is not defined")]
    FunctionNotFound {
        name: String,
    },
    #[error("function `{name}` takes {expected} argument(s) but {found} were given")]
    ArgumentCountMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("cannot apply `{operator}` to `{left}` and `{right}`")]
    InvalidOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("`{operator}` is not an operator on numbers")]
    UnknownOperator {
        operator: String,
    },
    #[error("array index `{index}` is not a number")]
    InvalidIndex {
        index: String,
    },
    #[error("variable `{name}` does not hold an array")]
    NotAnArray {
        name: String,
    },
    #[error("index {index} is out of bounds for `{name}` with {length} element(s)")]
    IndexOutOfBounds {
        name: String,
        index: String,
        length: usize,
    },
    #[error("a statement cannot be used as a value")]
    NotAnExpression,
    #[error("input/output failed: {kind}")]
    Io {
        kind: std::io::ErrorKind,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan,
}

impl RuntimeError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        let title = match &self.error {
            RuntimeErrorType::FunctionNotFound { .. } => "Unknown function",
            RuntimeErrorType::ArgumentCountMismatch { .. } => "Wrong number of arguments",
            RuntimeErrorType::DivisionByZero => "Division by zero",
            RuntimeErrorType::InvalidOperands { .. }
            | RuntimeErrorType::UnknownOperator { .. } => "Invalid operands",
            RuntimeErrorType::InvalidIndex { .. }
            | RuntimeErrorType::NotAnArray { .. } => "Invalid array access",
            RuntimeErrorType::IndexOutOfBounds { .. } => "Index out of bounds",
            RuntimeErrorType::NotAnExpression => "Not an expression",
            RuntimeErrorType::Io { .. } => "Standard IO error",
        };

        (title, vec![self.error.to_string()])
    }
}

pub fn runtime_error<T>(error: RuntimeErrorType, location: SrcSpan) -> Result<T, RuntimeError> {
    Err(RuntimeError { error, location })
}

/// Conditions the interpreter recovers from by skipping work.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeWarning {
    InvalidLoopBounds {
        location: SrcSpan,
        lower: String,
        upper: String,
    },
}
