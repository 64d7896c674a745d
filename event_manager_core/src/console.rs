use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::CoreResult;

/// Line-oriented operator I/O.
pub trait Console {
    /// Shows `prompt` and reads one line without its line terminator.
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> CoreResult<Option<String>>;

    fn write_line(&mut self, line: &str);
}

/// Console bound to the process's stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> CoreResult<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(&line).to_string()))
    }

    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Console fed from a fixed script; records everything shown to the operator.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines written so far, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Scripted answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    /// Everything written, joined by newlines.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    /// Number of output lines starting with `prefix`.
    pub fn count_lines_starting_with(&self, prefix: &str) -> usize {
        self.output.iter().filter(|l| l.starts_with(prefix)).count()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> CoreResult<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front())
    }

    fn write_line(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}
