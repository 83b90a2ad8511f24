use std::collections::VecDeque;
use std::io::BufRead;

use tracing::warn;

/// One user action delivered to an interactive session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    SetVmin(f64),
    SetVmax(f64),
    Save,
    Quit,
}

/// Source of interactive events. `None` means the source is exhausted.
pub trait InputSource {
    fn next_event(&mut self) -> Option<InputEvent>;
}

/// Reads one command per line: `vmin <value>`, `vmax <value>`, `save`, `quit`.
///
/// Blank lines are skipped; unrecognised lines are logged and skipped.
pub struct LineInputSource<R: BufRead> {
    reader: R,
    line: String,
}

impl<R: BufRead> LineInputSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> InputSource for LineInputSource<R> {
    fn next_event(&mut self) -> Option<InputEvent> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    warn!("Stopping input: {}", e);
                    return None;
                }
            }

            let command = self.line.trim();
            if command.is_empty() {
                continue;
            }
            match parse_command(command) {
                Some(event) => return Some(event),
                None => warn!("Ignoring unrecognised command: {:?}", command),
            }
        }
    }
}

/// Replays queued events front to back.
impl InputSource for VecDeque<InputEvent> {
    fn next_event(&mut self) -> Option<InputEvent> {
        self.pop_front()
    }
}

fn parse_command(command: &str) -> Option<InputEvent> {
    let mut parts = command.split_whitespace();
    let keyword = parts.next()?.to_ascii_lowercase();
    let argument = parts.next();
    if parts.next().is_some() {
        return None;
    }

    match (keyword.as_str(), argument) {
        ("vmin", Some(value)) => value.parse().ok().map(InputEvent::SetVmin),
        ("vmax", Some(value)) => value.parse().ok().map(InputEvent::SetVmax),
        ("save", None) => Some(InputEvent::Save),
        ("quit" | "q" | "exit", None) => Some(InputEvent::Quit),
        _ => None,
    }
}
