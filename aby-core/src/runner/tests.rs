use std::{io::Write, path::PathBuf, rc::Rc};

use crate::{
    eval::prelude::BufferedIO,
    utils::prelude::{Error, NullWarningEmitterIO, VectorWarningEmitterIO, Warning}
};
use super::{parse_file, run, run_from_stream, run_source};

fn temp_program(name: &str, src: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("aby-runner-{}-{name}", std::process::id()));

    let mut file = std::fs::File::create(&path).expect("create temp program");
    file.write_all(src.as_bytes()).expect("write temp program");

    path
}

#[test]
fn test_run_source() -> Result<(), Error> {
    let mut io = BufferedIO::new();

    let returned = run_source(
        "inline.aby".into(),
        "x = 2 print x * 21 return \"done\"".to_string(),
        &mut io,
        Rc::new(NullWarningEmitterIO)
    )?;

    assert_eq!(returned.as_deref(), Some("done"));
    assert_eq!(io.output(), ["42"]);

    Ok(())
}

#[test]
fn test_run_and_stream_agree() -> Result<(), Error> {
    let path = temp_program("agree.aby", "fun sq(n) { return n * n; }\nforeach v in [1, 2, 3] { print sq(v); }\n");

    let mut read = BufferedIO::new();
    run(path.clone(), &mut read, Rc::new(NullWarningEmitterIO))?;

    let mut streamed = BufferedIO::new();
    run_from_stream(path.clone(), &mut streamed, Rc::new(NullWarningEmitterIO))?;

    assert_eq!(read.output(), ["1", "4", "9"]);
    assert_eq!(read, streamed);

    let _ = std::fs::remove_file(path);

    Ok(())
}

#[test]
fn test_missing_file() {
    let path = PathBuf::from("definitely/not/here.aby");

    let err = run(path.clone(), BufferedIO::new(), Rc::new(NullWarningEmitterIO)).unwrap_err();
    assert_eq!(err, Error::FileIo { path: path.clone(), err: std::io::ErrorKind::NotFound });

    let err = run_from_stream(path.clone(), BufferedIO::new(), Rc::new(NullWarningEmitterIO)).unwrap_err();
    assert!(matches!(err, Error::FileIo { .. }));
}

#[test]
fn test_errors_carry_source() {
    let err = run_source(
        "bad.aby".into(),
        "print (1".to_string(),
        BufferedIO::new(),
        Rc::new(NullWarningEmitterIO)
    ).unwrap_err();
    assert!(matches!(err, Error::Parse { ref src, .. } if src == "print (1"));

    let err = run_source(
        "bad.aby".into(),
        "print nope()".to_string(),
        BufferedIO::new(),
        Rc::new(NullWarningEmitterIO)
    ).unwrap_err();
    assert!(matches!(err, Error::Runtime { ref path, .. } if path == &PathBuf::from("bad.aby")));
}

#[test]
fn test_lexical_warnings_are_reported() -> Result<(), Error> {
    let path = temp_program("warn.aby", "print \"unterminated");
    let warnings = VectorWarningEmitterIO::new();

    let mut io = BufferedIO::new();
    run_from_stream(path.clone(), &mut io, Rc::new(warnings.clone()))?;

    assert_eq!(io.output(), ["unterminated"]);
    assert!(matches!(warnings.take().as_slice(), [Warning::Lexical { .. }]));

    let parsed = parse_file(path.clone(), Rc::new(NullWarningEmitterIO))?;
    assert_eq!(parsed.warnings.len(), 1);

    let _ = std::fs::remove_file(path);

    Ok(())
}
