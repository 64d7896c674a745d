//! Prompt / validate / retry loops modelled as a small state machine.
//!
//! Each prompt starts in [`PromptState::Prompting`]. Every line of input is
//! run through a pure step function producing a [`Transition`]; a rejected
//! line prints the error and keeps prompting, a validated or cancelled line
//! settles the machine. End of input settles it as cancelled.

use tracing::warn;

use crate::console::Console;
use crate::error::{CoreError, CoreResult};

/// Input that cancels any identifier or menu prompt.
pub const CANCEL: &str = "0";

#[derive(Debug, Clone, PartialEq)]
pub enum PromptState<T> {
    Prompting,
    Validated(T),
    Cancelled,
}

/// Result of feeding one line of input to a step function.
#[derive(Debug)]
pub enum Transition<T> {
    Validated(T),
    Cancelled,
    Rejected(CoreError),
}

#[derive(Debug)]
pub struct PromptMachine<T> {
    state: PromptState<T>,
}

impl<T> Default for PromptMachine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PromptMachine<T> {
    pub fn new() -> Self {
        Self {
            state: PromptState::Prompting,
        }
    }

    pub fn state(&self) -> &PromptState<T> {
        &self.state
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self.state, PromptState::Prompting)
    }

    /// Applies one line of input. Returns the rejection, if any; a settled
    /// machine ignores further input.
    pub fn feed(&mut self, input: &str, step: impl FnOnce(&str) -> Transition<T>) -> Option<CoreError> {
        if self.is_settled() {
            return None;
        }
        match step(input) {
            Transition::Validated(value) => {
                self.state = PromptState::Validated(value);
                None
            }
            Transition::Cancelled => {
                self.state = PromptState::Cancelled;
                None
            }
            Transition::Rejected(err) => Some(err),
        }
    }

    pub fn end_of_input(&mut self) {
        if !self.is_settled() {
            self.state = PromptState::Cancelled;
        }
    }

    /// The validated value, or `None` if cancelled or still prompting.
    pub fn into_value(self) -> Option<T> {
        match self.state {
            PromptState::Validated(value) => Some(value),
            _ => None,
        }
    }
}

/// Prompts until `step` validates or cancels. `None` means cancelled.
pub fn drive<T, C>(
    console: &mut C,
    prompt: &str,
    mut step: impl FnMut(&str) -> Transition<T>,
) -> CoreResult<Option<T>>
where
    C: Console + ?Sized,
{
    let mut machine = PromptMachine::new();
    while !machine.is_settled() {
        match console.read_line(prompt)? {
            Some(line) => {
                if let Some(err) = machine.feed(&line, &mut step) {
                    warn!(input = %line, error = %err, "rejected operator input");
                    console.write_line(&err.report());
                }
            }
            None => machine.end_of_input(),
        }
    }
    Ok(machine.into_value())
}

/// Parses a menu answer against `count` numbered entries.
pub fn parse_menu_choice(input: &str, count: usize) -> Transition<usize> {
    let trimmed = input.trim();
    let Ok(choice) = trimmed.parse::<i64>() else {
        return Transition::Rejected(CoreError::InvalidSelection(
            "Invalid input. Please enter a number.".to_string(),
        ));
    };
    match usize::try_from(choice) {
        Ok(0) => Transition::Cancelled,
        Ok(n) if n <= count => Transition::Validated(n),
        _ => Transition::Rejected(CoreError::InvalidSelection(format!(
            "Invalid choice. Please enter a number between 0 and {count}."
        ))),
    }
}

/// Reads a 1-based menu index; `None` when the operator picks 0.
pub fn select_index<C>(console: &mut C, prompt: &str, count: usize) -> CoreResult<Option<usize>>
where
    C: Console + ?Sized,
{
    drive(console, prompt, |input| parse_menu_choice(input, count))
}

/// Shows `items` as a numbered list with a go-back entry and returns the pick.
pub fn select_from<'a, C>(console: &mut C, title: &str, items: &'a [String]) -> CoreResult<Option<&'a String>>
where
    C: Console + ?Sized,
{
    console.write_line(title);
    for (i, item) in items.iter().enumerate() {
        console.write_line(&format!("{}. {}", i + 1, item));
    }
    console.write_line("0. go back...");
    let choice = select_index(console, "> ", items.len())?;
    Ok(choice.map(|n| &items[n - 1]))
}

/// Reads one free-text answer; `None` at end of input.
pub fn ask<C>(console: &mut C, prompt: &str) -> CoreResult<Option<String>>
where
    C: Console + ?Sized,
{
    console.read_line(prompt)
}
