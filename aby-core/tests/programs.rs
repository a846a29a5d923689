use std::{fs, path::Path, rc::Rc};

use aby_core::{
    eval::prelude::BufferedIO,
    runner::{run, run_source},
    utils::prelude::{Error, NullWarningEmitterIO}
};
use walkdir::WalkDir;

#[test]
fn programs_match_expected_output() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/cases");
    let mut count = 0;

    for entry in
        WalkDir::new(&root).into_iter()
                           .filter_map(Result::ok)
                           .filter(|e| e.path().extension().is_some_and(|ext| ext == "aby"))
    {
        let path = entry.path();
        let expected = fs::read_to_string(path.with_extension("expected"))
            .unwrap_or_else(|e| panic!("Missing expected output for {path:?}: {e}"));
        let input = fs::read_to_string(path.with_extension("input")).unwrap_or_default();

        let mut io = BufferedIO::with_input(input.lines());

        if let Err(err) = run(path.to_path_buf(), &mut io, Rc::new(NullWarningEmitterIO)) {
            panic!("Program {path:?} failed:\n{}", err.pretty_string());
        }

        let expected = expected.lines().collect::<Vec<&str>>();
        assert_eq!(io.output(), expected.as_slice(), "Output of {path:?}");

        count += 1;
    }

    assert!(count > 0, "No programs found in {root:?}");
}

fn assert_runtime_failure(src: &str, title: &str) {
    match run_source("inline.aby".into(), src.to_string(), BufferedIO::new(), Rc::new(NullWarningEmitterIO)) {
        Err(err @ Error::Runtime { .. }) => {
            let report = err.pretty_string();
            assert!(report.contains(title), "Expected `{title}` in:\n{report}");
        },
        Err(err) => panic!("Expected a runtime error, got:\n{}", err.pretty_string()),
        Ok(_) => panic!("Script succeeded but was expected to fail"),
    }
}

#[test]
fn runtime_failures() {
    assert_runtime_failure("print 4 / 0", "Division by zero");
    assert_runtime_failure("print undefined()", "Unknown function");
    assert_runtime_failure("fun f(a) { } f()", "Wrong number of arguments");
    assert_runtime_failure("xs = \"[1,2]\" print xs[2]", "Index out of bounds");
    assert_runtime_failure("print \"a\" * 2", "Invalid operands");
}

#[test]
fn syntax_failures_name_the_line() {
    let err = run_source(
        "inline.aby".into(),
        "x = 1\ny = \nprint y".to_string(),
        BufferedIO::new(),
        Rc::new(NullWarningEmitterIO)
    ).unwrap_err();

    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.pretty_string().contains("line 3"), "{}", err.pretty_string());
}
