//! crossterm-backed input source.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use blockfall_driver::{InputEvent, InputSource};

use crate::map::{handle_key_event, should_quit};

/// Reads key presses from the terminal.
///
/// Only presses count: auto-repeat and release events are dropped, so one
/// key press is one command.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

/// Translate a single key event.
pub fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if should_quit(key) {
        return Some(InputEvent::Quit);
    }
    handle_key_event(key).map(InputEvent::Command)
}

impl InputSource for TerminalInput {
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(translate_key(key)),
            _ => Ok(None),
        }
    }
}
