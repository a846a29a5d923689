use std::rc::Rc;

use crate::{
    environment::prelude::format_number,
    parser::prelude::{parse_module, BinaryExpr, FunctionCall, Identifier, Node, Number, StringLiteral},
    utils::prelude::{SourceWarningEmitter, SrcSpan, VectorWarningEmitterIO, Warning, WarningEmitter}
};
use super::prelude::{BufferedIO, Interpreter, RuntimeError, RuntimeErrorType, RuntimeWarning};

fn run_with_input(src: &str, input: &[&str]) -> Result<Vec<String>, RuntimeError> {
    let parsed = parse_module(src).expect("test program parses");

    let mut io = BufferedIO::with_input(input.iter().copied());
    Interpreter::new(&mut io).execute(&parsed.program)?;

    Ok(io.take_output())
}

fn run(src: &str) -> Result<Vec<String>, RuntimeError> {
    run_with_input(src, &[])
}

fn run_err(src: &str) -> RuntimeErrorType {
    match run(src) {
        Ok(output) => panic!("expected {src:?} to fail, printed {output:?}"),
        Err(err) => err.error,
    }
}

fn number(value: f64) -> Box<Node> {
    Box::new(Node::Number(Number { value, location: SrcSpan::default() }))
}

#[test]
fn test_end_to_end_programs() -> Result<(), RuntimeError> {
    assert_eq!(run("x = 3; y = 4; print x + y;")?, vec!["7"]);
    assert_eq!(run("fun add(a,b) { return a + b; } print add(2,3);")?, vec!["5"]);
    assert_eq!(run("for i = 1 to 3 { print i; }")?, vec!["1", "2", "3"]);

    Ok(())
}

#[test]
fn test_print_trims_numbers() -> Result<(), RuntimeError> {
    assert_eq!(run("print 3")?, vec!["3"]);
    assert_eq!(run("print 7 / 2")?, vec!["3.5"]);
    assert_eq!(run("print 10 / 4 * 2")?, vec!["5"]);
    assert_eq!(run("print 1 / 3")?, vec!["0.333333"]);
    assert_eq!(run("print 2 - 5")?, vec!["-3"]);
    assert_eq!(run("print \"hello\"")?, vec!["hello"]);
    assert_eq!(run("print \"3.140\"")?, vec!["3.14"]);

    Ok(())
}

#[test]
fn test_arithmetic_keeps_six_decimals() -> Result<(), RuntimeError> {
    let parsed = parse_module("x = 4 / 2 y = x * 1").expect("parses");
    let mut interpreter = Interpreter::new(BufferedIO::new());

    interpreter.execute(&parsed.program)?;

    assert_eq!(interpreter.env().get("x"), "2.000000");
    assert_eq!(interpreter.env().get("y"), "2.000000");
    assert_eq!(format_number(2.0), "2.000000");

    Ok(())
}

#[test]
fn test_string_concatenation() -> Result<(), RuntimeError> {
    assert_eq!(run("print \"a\" + \"b\"")?, vec!["ab"]);
    assert_eq!(run("name = \"bob\" print \"hi \" + name")?, vec!["hi bob"]);
    assert_eq!(run("print \"n\" + 1")?, vec!["n1.000000"]);

    Ok(())
}

#[test]
fn test_comparisons() -> Result<(), RuntimeError> {
    assert_eq!(run("print 1 < 2 print 2 <= 1 print 3 >= 3 print 1 > 0")?, vec![
        "true", "false", "true", "true"
    ]);

    Ok(())
}

#[test]
fn test_binary_errors() {
    assert_eq!(run_err("print 4 / 0"), RuntimeErrorType::DivisionByZero);
    assert!(matches!(run_err("print \"a\" - 1"), RuntimeErrorType::InvalidOperands { .. }));
    assert!(matches!(run_err("print \"a\" < \"b\""), RuntimeErrorType::InvalidOperands { .. }));
    assert_eq!(
        run_err("print 1 == 1"),
        RuntimeErrorType::UnknownOperator { operator: "==".to_string() }
    );
}

#[test]
fn test_division_by_zero_location() {
    let src = "x = 1\nprint 4 / 0";
    let parsed = parse_module(src).expect("parses");

    let err = Interpreter::new(BufferedIO::new())
        .execute(&parsed.program)
        .unwrap_err();

    assert_eq!(&src[err.location.start as usize..err.location.end as usize], "4 / 0");
}

#[test]
fn test_and_or_evaluate_both_sides() -> Result<(), RuntimeError> {
    let parsed = parse_module("fun touch() { print \"touched\"; return 1; }").expect("parses");

    let mut io = BufferedIO::new();
    let mut interpreter = Interpreter::new(&mut io);
    interpreter.execute(&parsed.program)?;

    let touch = || Box::new(Node::FunctionCall(FunctionCall {
        identifier: Identifier { value: "touch".to_string(), location: SrcSpan::default() },
        arguments: vec![],
        location: SrcSpan::default(),
    }));

    let and = Node::Binary(BinaryExpr {
        left: touch(),
        operator: "and".to_string(),
        right: number(0.0),
        location: SrcSpan::default(),
    });
    assert_eq!(interpreter.evaluate(&and)?, "false");

    let or = Node::Binary(BinaryExpr {
        left: number(1.0),
        operator: "or".to_string(),
        right: touch(),
        location: SrcSpan::default(),
    });
    assert_eq!(interpreter.evaluate(&or)?, "false");

    let and_text = Node::Binary(BinaryExpr {
        left: touch(),
        operator: "and".to_string(),
        right: Box::new(Node::String(StringLiteral { value: "false".to_string(), location: SrcSpan::default() })),
        location: SrcSpan::default(),
    });
    assert!(matches!(
        interpreter.evaluate(&and_text).map_err(|err| err.error),
        Err(RuntimeErrorType::InvalidOperands { .. })
    ));

    drop(interpreter);
    assert_eq!(io.output(), ["touched", "touched", "touched"]);

    Ok(())
}

#[test]
fn test_calls_restore_variables() -> Result<(), RuntimeError> {
    let src = r#"
        x = "outer"
        fun clobber(a) { x = "inner"; y = a; print x; return y; }
        r = clobber(5)
        print x
        print y
        print r
    "#;

    assert_eq!(run(src)?, vec!["inner", "outer", "", "5"]);

    Ok(())
}

#[test]
fn test_call_restores_variables_on_error() {
    let parsed = parse_module("x = 1 fun bad() { x = 2; return 1 / 0; } bad()").expect("parses");
    let mut interpreter = Interpreter::new(BufferedIO::new());

    let err = interpreter.execute(&parsed.program).unwrap_err();

    assert_eq!(err.error, RuntimeErrorType::DivisionByZero);
    assert_eq!(interpreter.env().get("x"), "1.000000");
}

#[test]
fn test_parameters_do_not_outlive_the_call() -> Result<(), RuntimeError> {
    let parsed = parse_module("fun keep(a) { b = a; return b; } print keep(\"v\")").expect("parses");
    let mut interpreter = Interpreter::new(BufferedIO::new());

    interpreter.execute(&parsed.program)?;

    assert!(!interpreter.env().is_defined("a"));
    assert!(!interpreter.env().is_defined("b"));
    assert_eq!(interpreter.into_io().take_output(), vec!["v"]);

    Ok(())
}

#[test]
fn test_out_of_range_text_prints_verbatim() -> Result<(), RuntimeError> {
    assert_eq!(run("print \"1e400\" print \"1e-400\"")?, vec!["1e400", "1e-400"]);

    Ok(())
}

#[test]
fn test_arguments_bind_in_order() -> Result<(), RuntimeError> {
    let src = "a = 10 fun pair(a, b) { return a + \":\" + b; } print pair(1, a)";

    assert_eq!(run(src)?, vec!["1.000000:1.000000"]);

    Ok(())
}

#[test]
fn test_recursion() -> Result<(), RuntimeError> {
    let src = r#"
        fun fact(n) {
            result = 1
            while n > 1 { result = result * n; n = n - 1; }
            return result
        }
        fun fib(n) {
            for i = 2 to n { return fib(n - 1) + fib(n - 2); }
            return n
        }
        print fact(5)
        print fib(10)
    "#;

    assert_eq!(run(src)?, vec!["120", "55"]);

    Ok(())
}

#[test]
fn test_return_stops_execution() -> Result<(), RuntimeError> {
    let src = r#"
        fun first(xs) { foreach x in xs { return x; } return "none"; }
        print first([7, 8, 9])
        print first("")
        fun early() { for i = 1 to 10 { return i; } }
        print early()
    "#;

    assert_eq!(run(src)?, vec!["7", "none", "1"]);

    let parsed = parse_module("print 1 return 2 print 3").expect("parses");
    let mut io = BufferedIO::new();
    let returned = Interpreter::new(&mut io).execute(&parsed.program)?;

    assert_eq!(returned.as_deref(), Some("2.000000"));
    assert_eq!(io.output(), ["1"]);

    Ok(())
}

#[test]
fn test_function_without_return_is_empty() -> Result<(), RuntimeError> {
    assert_eq!(run("fun noop() { x = 1; } print noop() + \"|\"")?, vec!["|"]);

    Ok(())
}

#[test]
fn test_call_statements_do_not_return() -> Result<(), RuntimeError> {
    let src = "fun f() { return 1; } fun g() { f(); print \"after\"; } g()";

    assert_eq!(run(src)?, vec!["after"]);

    Ok(())
}

#[test]
fn test_call_errors() {
    assert_eq!(
        run_err("missing()"),
        RuntimeErrorType::FunctionNotFound { name: "missing".to_string() }
    );
    assert_eq!(
        run_err("fun one(a) { } one(1, 2)"),
        RuntimeErrorType::ArgumentCountMismatch { name: "one".to_string(), expected: 1, found: 2 }
    );
}

#[test]
fn test_later_declaration_wins() -> Result<(), RuntimeError> {
    assert_eq!(run("fun f() { return 1; } fun f() { return 2; } print f()")?, vec!["2"]);

    Ok(())
}

#[test]
fn test_foreach() -> Result<(), RuntimeError> {
    assert_eq!(run("foreach x in \"1,2,3\" { print x; }")?, vec!["1", "2", "3"]);
    assert_eq!(run("foreach x in [1, 2 + 2, \"a\"] { print x; }")?, vec!["1", "4", "a"]);
    assert_eq!(run("foreach x in \"\" { print x; }")?, Vec::<String>::new());
    assert_eq!(run("foreach x in \"a,,b\" { print \"<\" + x + \">\"; }")?, vec!["<a>", "<>", "<b>"]);

    Ok(())
}

#[test]
fn test_for_loop_bounds() -> Result<(), RuntimeError> {
    assert_eq!(run("for i = 3 to 1 { print i; }")?, Vec::<String>::new());
    assert_eq!(run("for i = 2 to 2 { print i; }")?, vec!["2"]);
    assert_eq!(run("lo = 1 for i = lo to 5 / 2 { print i; }")?, vec!["1", "2"]);
    assert_eq!(run("for i = 1 to 2 { } print i")?, vec!["2"]);

    Ok(())
}

#[test]
fn test_invalid_for_loop_bounds_are_skipped() -> Result<(), RuntimeError> {
    let parsed = parse_module("for i = \"a\" to 3 { print i; } print \"done\"").expect("parses");

    let vector = VectorWarningEmitterIO::new();
    let warnings = SourceWarningEmitter::new(
        "loop.aby".into(),
        String::new(),
        WarningEmitter::new(Rc::new(vector.clone()))
    );

    let mut io = BufferedIO::new();
    Interpreter::new(&mut io)
        .with_warnings(warnings)
        .execute(&parsed.program)?;

    assert_eq!(io.output(), ["done"]);

    let emitted = vector.take();
    assert_eq!(emitted.len(), 1);
    assert!(matches!(
        &emitted[0],
        Warning::Runtime { warning: RuntimeWarning::InvalidLoopBounds { lower, .. }, .. } if lower == "a"
    ));

    Ok(())
}

#[test]
fn test_while_loop() -> Result<(), RuntimeError> {
    assert_eq!(run("i = 0 while i < 3 { print i; i = i + 1; }")?, vec!["0", "1", "2"]);
    assert_eq!(run("while \"yes\" { print 1; } print 2")?, vec!["2"]);

    Ok(())
}

#[test]
fn test_arrays() -> Result<(), RuntimeError> {
    assert_eq!(run("a = \"[10,20,30]\" print a[1]")?, vec!["20"]);
    assert_eq!(run("a = \"[10,20,30]\" print a[2 - 2]")?, vec!["10"]);
    assert_eq!(run("print [1, 5 / 2, \"x\"]")?, vec!["1,2.5,x"]);
    assert_eq!(run("xs = [] print \"<\" + xs + \">\"")?, vec!["<>"]);

    assert!(matches!(
        run_err("a = \"[10,20,30]\" print a[5]"),
        RuntimeErrorType::IndexOutOfBounds { length: 3, .. }
    ));
    assert!(matches!(
        run_err("a = \"[10,20,30]\" print a[0 - 1]"),
        RuntimeErrorType::IndexOutOfBounds { .. }
    ));
    assert!(matches!(run_err("a = [1, 2] print a[0]"), RuntimeErrorType::NotAnArray { .. }));
    assert!(matches!(run_err("a = \"[1]\" print a[\"x\"]"), RuntimeErrorType::InvalidIndex { .. }));

    Ok(())
}

#[test]
fn test_undefined_variables_are_empty() -> Result<(), RuntimeError> {
    assert_eq!(run("print nothing")?, vec![""]);
    assert_eq!(run("print nothing + \"!\"")?, vec!["!"]);

    Ok(())
}

#[test]
fn test_input() -> Result<(), RuntimeError> {
    let output = run_with_input("input name print \"hi \" + name input rest print rest + \".\"", &["ada"])?;

    assert_eq!(output, vec!["hi ada", "."]);

    Ok(())
}

#[test]
fn test_events_are_stored_not_fired() -> Result<(), RuntimeError> {
    let parsed = parse_module("event start { print \"a\"; } event start { print \"b\"; }").expect("parses");

    let mut interpreter = Interpreter::new(BufferedIO::new());
    interpreter.execute(&parsed.program)?;

    assert_eq!(interpreter.listeners("start").len(), 2);
    assert!(interpreter.listeners("other").is_empty());
    assert!(interpreter.io().output().is_empty());

    Ok(())
}

#[test]
fn test_npc_action() -> Result<(), RuntimeError> {
    assert_eq!(run("npc guard patrol")?, vec!["Executing NPC action for: guard"]);

    Ok(())
}

#[test]
fn test_statement_is_not_a_value() {
    let parsed = parse_module("print 1").expect("parses");
    let mut interpreter = Interpreter::new(BufferedIO::new());

    let err = interpreter.evaluate(&parsed.program.statements[0]).unwrap_err();

    assert_eq!(err.error, RuntimeErrorType::NotAnExpression);
}
