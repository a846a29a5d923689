use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

pub(crate) fn print_running(text: &str) {
    print_colourful_prefix("Running", Color::Green, text)
}

pub(crate) fn print_finished(duration: Duration) {
    print_colourful_prefix("Finished", Color::Green, &format!("in {}", seconds(duration)))
}

pub(crate) fn print_parsing(text: &str) {
    print_colourful_prefix("Parsing", Color::Magenta, text)
}

pub(crate) fn print_parsed(duration: Duration) {
    print_colourful_prefix("Parsed", Color::Green, &format!("in {}", seconds(duration)))
}

pub(crate) fn print_lexing(text: &str) {
    print_colourful_prefix("Lexing", Color::Cyan, text)
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

/// Status line on stderr, so program output on stdout stays clean.
pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    let written = buffer
        .set_color(ColorSpec::new().set_intense(true).set_bold(true).set_fg(Some(color)))
        .and_then(|_| write!(buffer, "{prefix: >11}"))
        .and_then(|_| buffer.reset())
        .and_then(|_| writeln!(buffer, " {text}"))
        .and_then(|_| buffer_writer.print(&buffer));

    if let Err(err) = written {
        tracing::debug!(%err, "could not write status line");
    }
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

/// Makes Ctrl-C leave an interactive loop without an error status.
pub(crate) fn exit_on_interrupt() {
    if let Err(err) = ctrlc::set_handler(|| std::process::exit(0)) {
        tracing::warn!(%err, "could not install Ctrl-C handler");
    }
}

fn colour_forced() -> bool {
    std::env::var("FORCE_COLOR").is_ok_and(|force| !force.is_empty())
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
