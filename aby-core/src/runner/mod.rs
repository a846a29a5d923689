//! Loading a source file and taking it through parsing and execution.

use std::{path::{Path, PathBuf}, rc::Rc};

use utf8_chars::BufReadCharsExt;

use crate::{
    eval::prelude::{Interpreter, ProgramIO},
    parser::prelude::{parse_module, parse_module_from_stream, Parsed},
    utils::prelude::{Error, SourceWarningEmitter, WarningEmitter, WarningEmitterIO}
};

pub fn read_source(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|err| Error::FileIo {
        path: path.to_path_buf(),
        err: err.kind(),
    })
}

/// Parses `src`, reporting lexical warnings through `warnings`.
pub fn parse_source(
    path: PathBuf,
    src: String,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<(Parsed, SourceWarningEmitter), Error> {
    match parse_module(&src) {
        Ok(parsed) => Ok(with_warnings(parsed, path, src, warnings)),
        Err(error) => Err(Error::Parse { path, src, error }),
    }
}

pub fn parse_file(path: PathBuf, warnings: Rc<dyn WarningEmitterIO>) -> Result<Parsed, Error> {
    let src = read_source(&path)?;

    parse_source(path, src, warnings).map(|(parsed, _)| parsed)
}

/// Runs a program held in memory. The value of a top level `return`, if
/// any, is handed back.
pub fn run_source<IO: ProgramIO>(
    path: PathBuf,
    src: String,
    io: IO,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<Option<String>, Error> {
    let (parsed, emitter) = parse_source(path, src, warnings)?;

    execute(parsed, emitter, io)
}

pub fn run<IO: ProgramIO>(
    path: PathBuf,
    io: IO,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<Option<String>, Error> {
    let src = read_source(&path)?;

    run_source(path, src, io, warnings)
}

/// Like [`run`], but lexes the file while it is being read.
pub fn run_from_stream<IO: ProgramIO>(
    path: PathBuf,
    io: IO,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<Option<String>, Error> {
    let file_error = |err: std::io::Error| Error::FileIo {
        path: path.clone(),
        err: err.kind(),
    };

    let file = std::fs::File::open(&path).map_err(file_error)?;
    let file_size = file.metadata().map_err(file_error)?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut read_error = None;
    let mut reader = std::io::BufReader::new(file);

    let stream = reader.chars()
        .map_while(|c| match c {
            Ok(c) => {
                src.push(c);
                Some(c)
            },
            Err(err) => {
                read_error = Some(err);
                None
            }
        });

    let parsed = parse_module_from_stream(stream);

    if let Some(err) = read_error {
        return Err(file_error(err));
    }

    let parsed = match parsed {
        Ok(parsed) => parsed,
        Err(error) => return Err(Error::Parse { path, src, error }),
    };

    let (parsed, emitter) = with_warnings(parsed, path, src, warnings);

    execute(parsed, emitter, io)
}

fn with_warnings(
    parsed: Parsed,
    path: PathBuf,
    src: String,
    warnings: Rc<dyn WarningEmitterIO>,
) -> (Parsed, SourceWarningEmitter) {
    let emitter = SourceWarningEmitter::new(path, src, WarningEmitter::new(warnings));

    for warning in &parsed.warnings {
        tracing::warn!(line = warning.line, "{}", warning.details().0);
        emitter.emit_lexical(*warning);
    }

    (parsed, emitter)
}

fn execute<IO: ProgramIO>(
    parsed: Parsed,
    emitter: SourceWarningEmitter,
    io: IO,
) -> Result<Option<String>, Error> {
    tracing::debug!(statements = parsed.program.statements.len(), "executing program");

    let mut interpreter = Interpreter::new(io).with_warnings(emitter.clone());

    interpreter.execute(&parsed.program).map_err(|error| {
        let (path, src) = emitter.source();

        Error::Runtime {
            path: path.to_path_buf(),
            src: src.to_string(),
            error,
        }
    })
}

#[cfg(test)]
mod tests;
