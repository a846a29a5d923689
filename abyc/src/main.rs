mod cli;
mod rlpl;
mod rppl;

use std::{path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use aby_core::{
    eval::prelude::ConsoleIO,
    lexer::prelude::tokenize,
    runner::{parse_file, read_source, run_from_stream},
    utils::prelude::{Error, SourceWarningEmitter, Warning, WarningEmitter, WarningEmitterIO}
};
use clap::{Parser, Subcommand};
use cli::{print_finished, print_lexing, print_parsed, print_parsing, print_running};

#[derive(Parser)]
#[command(name = "aby", version, about = "Interpreter for the aby game scripting language")]
struct Cli {
    /// Log interpreter activity to stderr (RUST_LOG overrides the filter)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lexes, parses and executes a program
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print the value of a top level `return` after execution
        #[arg(long, default_value_t = false)]
        print_result: bool,
    },
    /// Lexes and parses a program without executing it
    Parse {
        /// Path of source file
        path: PathBuf,
        /// Do not print parsed source code
        #[arg(short, long, default_value_t = false)]
        no_output: bool,
        /// Print ast instead of parsed source code
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Prints the tokens of a program
    Lex {
        /// Path of source file
        path: PathBuf,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    install_tracing(cli.verbose);

    let result = match cli.command {
        Command::Run { path, print_result } => run(path, print_result),
        Command::Parse { path, no_output, print_ast } => parse(path, no_output, print_ast),
        Command::Lex { path } => lex(path),
        Command::Rlpl => rlpl::start().map_err(Error::from),
        Command::Rppl => rppl::start().map_err(Error::from),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(path: PathBuf, print_result: bool) -> Result<(), Error> {
    print_running(&path.display().to_string());
    let start = Instant::now();

    let returned = run_from_stream(path, ConsoleIO, Rc::new(ConsoleWarningEmitter))?;

    print_finished(start.elapsed());

    if print_result {
        println!("{}", returned.unwrap_or_default());
    }

    Ok(())
}

fn parse(path: PathBuf, no_output: bool, print_ast: bool) -> Result<(), Error> {
    print_parsing(&path.display().to_string());
    let start = Instant::now();

    let parsed = parse_file(path, Rc::new(ConsoleWarningEmitter))?;

    if !no_output {
        if print_ast {
            println!("{:#?}", parsed.program);
        } else {
            for statement in &parsed.program.statements {
                println!("{statement};");
            }
        }
    }

    print_parsed(start.elapsed());

    Ok(())
}

fn lex(path: PathBuf) -> Result<(), Error> {
    print_lexing(&path.display().to_string());

    let src = read_source(&path)?;
    let lexed = tokenize(&src);

    for token in &lexed.tokens {
        println!("{token}");
    }

    let warnings = SourceWarningEmitter::new(path, src, WarningEmitter::new(Rc::new(ConsoleWarningEmitter)));
    for warning in lexed.warnings {
        warnings.emit_lexical(warning);
    }

    Ok(())
}

fn install_tracing(verbose: bool) {
    let from_env = std::env::var("RUST_LOG").is_ok();

    if !verbose && !from_env {
        return;
    }

    let filter = if from_env {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        tracing_subscriber::EnvFilter::new("aby_core=debug,abyc=debug")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn report(err: &Error) {
    let buf_writer = cli::stderr_buffer_writer();
    let mut buf = buf_writer.buffer();

    if err.pretty(&mut buf).and_then(|_| buf_writer.print(&buf)).is_err() {
        eprintln!("{err}");
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleWarningEmitter;

impl WarningEmitterIO for ConsoleWarningEmitter {
    fn emit_warning(&self, warning: Warning) {
        let buffer_writer = cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();

        if warning.pretty(&mut buffer).and_then(|_| buffer_writer.print(&buffer)).is_err() {
            eprintln!("{}", warning.pretty_string());
        }
    }
}
