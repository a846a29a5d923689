use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::RuntimeError,
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::SrcSpan
};
use super::diagnostic::{Diagnostic, Label, Level, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse {}: {error}", .path.display())]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("runtime error in {}: {error}", .path.display())]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError
    },
    #[error("could not read {}: {err}", .path.display())]
    FileIo {
        path: PathBuf,
        err: std::io::ErrorKind
    },
    #[error("IO operation failed: {err}")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::StdIo { err: value.kind() }
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();

        if self.pretty(&mut nocolor).is_err() {
            return self.to_string();
        }

        String::from_utf8_lossy(&nocolor.into_inner()).into_owned()
    }

    pub fn pretty(&self, buf: &mut Buffer) -> std::io::Result<()> {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf)?;
            writeln!(buf)?;
        }

        Ok(())
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();

                let span = if matches!(error.error, ParseErrorType::UnexpectedEof { .. }) {
                    SrcSpan::from(src.len() as u32, src.len() as u32)
                } else {
                    error.span
                };

                vec![Diagnostic {
                    title: format!("Syntax error at line {}", error.line),
                    text: extra.join("\n"),
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label::new(span).with_text(label),
                    }),
                }]
            },
            Error::Runtime { path, src, error } => {
                let (title, extra) = error.details();

                vec![Diagnostic {
                    title: title.to_string(),
                    text: extra.join("\n"),
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label::new(error.location),
                    }),
                }]
            },
            Error::FileIo { path, err } => {
                vec![Diagnostic {
                    title: format!("Could not read `{}`", path.display()),
                    text: format!("{err}"),
                    level: Level::Error,
                    location: None,
                }]
            },
            Error::StdIo { err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{err}"),
                    level: Level::Error,
                    location: None,
                }]
            }
        }
    }
}
