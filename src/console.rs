use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Text I/O seam for the interactive session.
///
/// The dispatcher only talks to this trait, so the same state machine runs
/// against a terminal (`StdConsole`) or an injected input script
/// (`ScriptedConsole`).
pub trait Console {
    /// Print `prompt` without a newline and read one line of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Print one line of output.
    fn say(&mut self, text: &str);
}

/// Blocking stdin/stdout console.
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        StdConsole
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;
        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    fn say(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Console fed from a fixed input sequence, recording everything it printed.
/// Reading past the end of the script reports `UnexpectedEof`, which unwinds
/// the session loop the same way a closed stdin would.
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn printed(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.transcript.push(prompt.to_string());
        self.inputs
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input script exhausted"))
    }

    fn say(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_console_replays_inputs_in_order() {
        let mut console = ScriptedConsole::new(["alice", "secret"]);
        assert_eq!(console.read_line("Username: ").expect("first input"), "alice");
        assert_eq!(console.read_line("Password: ").expect("second input"), "secret");
        assert!(console.printed("Username: "));
    }

    #[test]
    fn scripted_console_reports_eof_when_exhausted() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let err = console.read_line("Choice: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
