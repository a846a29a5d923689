use std::rc::Rc;

use crate::{
    eval::prelude::{BufferedIO, Interpreter, RuntimeWarning},
    lexer::prelude::tokenize,
    parser::prelude::parse_module
};
use super::prelude::{Error, SourceWarningEmitter, SrcSpan, VectorWarningEmitterIO, Warning, WarningEmitter};

#[test]
fn test_syntax_error_report() {
    let src = "x = 1\nprint )\n";
    let error = parse_module(src).unwrap_err();

    let report = Error::Parse {
        path: "broken.aby".into(),
        src: src.to_string(),
        error,
    }.pretty_string();

    assert!(report.contains("Syntax error at line 2"), "{report}");
    assert!(report.contains("broken.aby"), "{report}");
    assert!(report.contains("Not expected this"), "{report}");
}

#[test]
fn test_unexpected_eof_points_at_end() {
    let src = "while x {";
    let error = parse_module(src).unwrap_err();

    let err = Error::Parse { path: "eof.aby".into(), src: src.to_string(), error };
    let diagnostics = err.to_diagnostics();

    let location = diagnostics[0].location.as_ref().expect("has a location");
    assert_eq!(location.label.span, SrcSpan::from(9, 9));
}

#[test]
fn test_runtime_error_report() {
    let src = "print 1 / 0";
    let parsed = parse_module(src).expect("parses");
    let error = Interpreter::new(BufferedIO::new())
        .execute(&parsed.program)
        .unwrap_err();

    let err = Error::Runtime { path: "div.aby".into(), src: src.to_string(), error };
    let report = err.pretty_string();

    assert!(report.contains("Division by zero"), "{report}");
    assert!(report.contains("div.aby:1:7"), "{report}");
    assert_eq!(err.to_string(), "runtime error in div.aby: division by zero");
}

#[test]
fn test_io_errors() {
    let err = Error::from(std::io::Error::from(std::io::ErrorKind::NotFound));

    assert_eq!(err, Error::StdIo { err: std::io::ErrorKind::NotFound });
    assert!(err.pretty_string().contains("Standard IO error"));

    let err = Error::FileIo { path: "missing.aby".into(), err: std::io::ErrorKind::NotFound };
    assert!(err.pretty_string().contains("Could not read `missing.aby`"));
}

#[test]
fn test_warnings_are_collected_and_counted() {
    let vector = VectorWarningEmitterIO::new();
    let emitter = SourceWarningEmitter::new(
        "warn.aby".into(),
        "print \"open".to_string(),
        WarningEmitter::new(Rc::new(vector.clone()))
    );

    for warning in tokenize("print \"open").warnings {
        emitter.emit_lexical(warning);
    }
    emitter.emit_runtime(RuntimeWarning::InvalidLoopBounds {
        location: SrcSpan::from(0, 5),
        lower: "a".to_string(),
        upper: "3".to_string(),
    });

    assert_eq!(emitter.count(), 2);
    assert_eq!(vector.len(), 2);

    let warnings = vector.take();
    assert!(vector.is_empty());

    let lexical = warnings[0].pretty_string();
    assert!(lexical.contains("Unterminated string literal at line 1"), "{lexical}");

    assert!(matches!(warnings[1], Warning::Runtime { .. }));
    assert!(warnings[1].pretty_string().contains("Invalid loop bounds"));
}

#[test]
fn test_null_emitter_still_counts() {
    let emitter = SourceWarningEmitter::null();

    emitter.emit_runtime(RuntimeWarning::InvalidLoopBounds {
        location: SrcSpan::default(),
        lower: String::new(),
        upper: String::new(),
    });

    assert_eq!(emitter.count(), 1);
}
