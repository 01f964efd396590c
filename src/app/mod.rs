//! Reader state and main loop.
//!
//! This module follows The Elm Architecture (TEA):
//! - [`Model`]: The complete reader state
//! - [`Message`]: All events that change it
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Prompt, reading loop and terminal output

mod event_loop;
mod input;
mod model;
mod prompt;
mod render;
mod update;

pub use model::{Advance, Ending, Model, Phase};
pub use render::{HIGHLIGHT_COLOR, Highlight, Renderer, display_width};
pub use update::{Message, update};

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::pacing::Speed;
use crate::terminal::{self, RawModeGuard, TerminalEvents};
use crate::text::{self, TextBuffer};

/// Default pause between ticks of the reading loop.
pub const DEFAULT_TICK: Duration = Duration::from_millis(1);

/// Shows one file in the terminal, word by word.
pub struct App {
    file_path: PathBuf,
    speed: Option<Speed>,
    color: bool,
    tick: Duration,
}

impl App {
    /// Create a reader for the given file.
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            speed: None,
            color: true,
            tick: DEFAULT_TICK,
        }
    }

    /// Start at this speed instead of asking for one.
    #[must_use]
    pub const fn with_speed(mut self, speed: Option<Speed>) -> Self {
        self.speed = speed;
        self
    }

    /// Enable or disable the coloured highlight.
    #[must_use]
    pub const fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Set the tick interval of the reading loop.
    #[must_use]
    pub const fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Read the file, ask for a speed, and run the reading loop.
    ///
    /// On quit the file is replaced by the text not yet read.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the terminal cannot be
    /// put into raw mode, or terminal I/O fails.
    pub fn run(&self) -> Result<Ending> {
        let bytes = crate::progress::read_entire_file(&self.file_path)?;
        let words = text::count_words(&bytes);

        let mut stdout = io::stdout().lock();
        write_banner(&mut stdout, &self.file_path, words)?;

        let _raw = RawModeGuard::acquire()
            .context("Failed to enable raw mode; quickread requires an interactive terminal")?;
        let mut events = TerminalEvents;

        let speed = match self.speed {
            Some(speed) => speed,
            None => match prompt::prompt_speed(&mut stdout, &mut events)? {
                Some(speed) => speed,
                None => {
                    write!(stdout, "{}\r\n", Ending::Aborted.farewell())?;
                    return Ok(Ending::Aborted);
                }
            },
        };
        tracing::info!(%speed, words, file = %self.file_path.display(), "reading started");

        let mut renderer = Renderer::new(stdout)
            .with_color(self.color)
            .with_width(terminal::width());
        let mut model = Model::new(TextBuffer::new(bytes), speed);
        Self::reading_loop(
            &mut model,
            &mut events,
            &mut renderer,
            self.tick,
            &self.file_path,
        )?;

        let ending = model.ending().unwrap_or(Ending::Aborted);
        renderer.message(ending.farewell())?;
        Ok(ending)
    }
}

fn write_banner<W: Write>(out: &mut W, path: &Path, words: usize) -> io::Result<()> {
    writeln!(out, "Controls:")?;
    writeln!(out, "Space  → Pause/resume")?;
    writeln!(out, "q      → Quit and save progress")?;
    writeln!(out, "-      → Slower (-{} cpm)", Speed::STEP)?;
    writeln!(out, "+ or = → Faster (+{} cpm)", Speed::STEP)?;
    writeln!(out, "Ctrl-C → Stop without saving")?;
    writeln!(out)?;
    writeln!(
        out,
        "Be aware that '{}' will be modified when you quit, removing everything \
         you've already read so you can continue where you left off next time.",
        path.display()
    )?;
    writeln!(
        out,
        "You may want to copy it first. Press Ctrl-C at the prompt to leave before \
         reading starts. Reading begins as soon as you enter the speed."
    )?;
    writeln!(out, "{words} words to go. Happy reading! :3")?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests;
