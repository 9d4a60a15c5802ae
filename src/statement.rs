/*!
 * Statement accumulator
 *
 * Collects input lines into one logical statement. SQL is buffered until a
 * line ends with `;`; meta-commands are always a single line.
 */

use tracing::trace;

pub const META_COMMAND_MARKER: char = '\\';
pub const STATEMENT_TERMINATOR: char = ';';
const CONTINUATION_PROMPT: &str = "...: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorState {
    Empty,
    Accumulating,
    MetaCommandCapture,
    Complete,
}

/// A complete unit of input ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    MetaCommand(String),
    Statement(String),
}

impl Input {
    pub fn text(&self) -> &str {
        match self {
            Input::MetaCommand(text) | Input::Statement(text) => text,
        }
    }
}

#[derive(Debug)]
pub struct StatementAccumulator {
    buffer: Vec<String>,
    state: AccumulatorState,
}

impl StatementAccumulator {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            state: AccumulatorState::Empty,
        }
    }

    pub fn state(&self) -> AccumulatorState {
        self.state
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Feed one raw line. Returns the finished input once complete, after
    /// which the accumulator is empty again.
    pub fn push_line(&mut self, line: &str) -> Option<Input> {
        let line = line.trim();

        match self.state {
            AccumulatorState::Empty => {
                if line.is_empty() {
                    return None;
                }
                if line.starts_with(META_COMMAND_MARKER) {
                    self.transition(AccumulatorState::MetaCommandCapture);
                    self.buffer.push(line.to_string());
                    return Some(self.finish());
                }
                self.buffer.push(line.to_string());
                if line.ends_with(STATEMENT_TERMINATOR) {
                    return Some(self.finish());
                }
                self.transition(AccumulatorState::Accumulating);
                None
            }
            AccumulatorState::Accumulating => {
                self.buffer.push(line.to_string());
                if line.ends_with(STATEMENT_TERMINATOR) {
                    return Some(self.finish());
                }
                None
            }
            // Both hand their input over inside `push_line`.
            AccumulatorState::MetaCommandCapture | AccumulatorState::Complete => {
                self.reset();
                self.push_line(line)
            }
        }
    }

    /// Drop whatever has been buffered.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.transition(AccumulatorState::Empty);
    }

    /// `primary` when starting a statement, otherwise the continuation
    /// prompt padded to the same width.
    pub fn prompt(&self, primary: &str) -> String {
        match self.state() {
            AccumulatorState::Accumulating => format!(
                "{:>width$}",
                CONTINUATION_PROMPT,
                width = primary.chars().count()
            ),
            _ => primary.to_string(),
        }
    }

    fn finish(&mut self) -> Input {
        let meta = self.state == AccumulatorState::MetaCommandCapture;
        self.transition(AccumulatorState::Complete);

        let text = self.buffer.join(" ");
        self.reset();

        if meta {
            Input::MetaCommand(text)
        } else {
            Input::Statement(text)
        }
    }

    fn transition(&mut self, next: AccumulatorState) {
        if self.state != next {
            trace!(from = ?self.state, to = ?next, "accumulator");
            self.state = next;
        }
    }
}

impl Default for StatementAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
