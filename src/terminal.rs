//! Terminal mode and keyboard input.
//!
//! Raw mode is held by [`RawModeGuard`] for as long as the reader runs and
//! is restored when the guard drops, including on early returns and panics.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Keeps the terminal in raw mode until dropped.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Switch the terminal to raw mode (no line buffering, no echo).
    ///
    /// # Errors
    ///
    /// Returns an error if stdin is not an interactive terminal.
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        tracing::debug!("raw mode enabled");
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        tracing::debug!("raw mode restored");
    }
}

/// A source of terminal events.
pub trait EventSource {
    /// Wait at most `timeout` for one event.
    ///
    /// Returns `Ok(None)` when nothing arrived in time. Events that arrive
    /// faster than they are polled stay queued for later calls.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Events read from the real terminal through crossterm.
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            // Only presses count; some platforms also report releases.
            Event::Key(key) if key.kind == KeyEventKind::Release => Ok(None),
            other => Ok(Some(other)),
        }
    }
}

/// Width of the terminal in columns, when it can be queried.
pub fn width() -> Option<u16> {
    crossterm::terminal::size()
        .ok()
        .map(|(cols, _)| cols)
        .filter(|&cols| cols > 0)
}
