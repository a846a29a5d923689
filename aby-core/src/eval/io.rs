use std::{collections::VecDeque, io::{BufRead, Write}};

/// Everything a running program can observe or affect outside itself.
pub trait ProgramIO {
    fn print_line(&mut self, line: &str) -> std::io::Result<()>;

    /// Next line of input without its line terminator, `None` once input is
    /// exhausted.
    fn read_line(&mut self) -> std::io::Result<Option<String>>;

    /// Hook for a game engine. Without one the action is only announced.
    fn npc_action(&mut self, npc: &str, _action: &str) -> std::io::Result<()> {
        self.print_line(&format!("Executing NPC action for: {npc}"))
    }
}

impl<T: ProgramIO + ?Sized> ProgramIO for &mut T {
    fn print_line(&mut self, line: &str) -> std::io::Result<()> {
        (**self).print_line(line)
    }

    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        (**self).read_line()
    }

    fn npc_action(&mut self, npc: &str, action: &str) -> std::io::Result<()> {
        (**self).npc_action(npc, action)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleIO;

impl ProgramIO for ConsoleIO {
    fn print_line(&mut self, line: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();

        writeln!(stdout, "{line}")
    }

    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        std::io::stdout().flush()?;

        let mut input = String::new();

        if std::io::stdin().lock().read_line(&mut input)? == 0 {
            return Ok(None);
        }

        if let Some('\n') = input.chars().next_back() {
            input.pop();
        }
        if let Some('\r') = input.chars().next_back() {
            input.pop();
        }

        Ok(Some(input))
    }
}

/// In-memory input queue and captured output.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BufferedIO {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl BufferedIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: vec![],
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}

impl ProgramIO for BufferedIO {
    fn print_line(&mut self, line: &str) -> std::io::Result<()> {
        self.output.push(line.to_string());

        Ok(())
    }

    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }
}
