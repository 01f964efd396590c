use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::app::input;
use crate::app::render::Renderer;
use crate::app::{App, Message, Model, Phase, update};
use crate::progress;
use crate::terminal::EventSource;

impl App {
    /// Run the reading loop until the text ends or the reader quits.
    ///
    /// Each tick waits at most `tick` for one key, so the wait for input
    /// doubles as the tick sleep. The time actually elapsed is what feeds
    /// the word timer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal or reading events fails.
    /// A failed save is not an error; it ends the loop with
    /// [`Ending::SaveFailed`](crate::app::Ending::SaveFailed).
    pub(super) fn reading_loop<W: Write, E: EventSource>(
        model: &mut Model,
        events: &mut E,
        renderer: &mut Renderer<W>,
        tick: Duration,
        source: &Path,
    ) -> io::Result<()> {
        let mut last_tick = Instant::now();
        loop {
            if model.phase == Phase::AwaitingWord {
                Self::present_next_word(model, renderer)?;
            }
            if model.is_done() {
                break;
            }

            let event = events.next_event(tick)?;
            let now = Instant::now();
            let dt = now.duration_since(last_tick);
            last_tick = now;

            if let Some(msg) = event.as_ref().and_then(input::reading_message) {
                Self::dispatch(model, renderer, msg)?;
            }
            if model.phase == Phase::Draining {
                Self::drain(model, renderer, source)?;
            }
            if model.is_done() {
                break;
            }

            Self::dispatch(model, renderer, Message::Tick(dt))?;
        }
        Ok(())
    }

    /// Echo the separators before the next word and show it highlighted.
    pub(super) fn present_next_word<W: Write>(
        model: &mut Model,
        renderer: &mut Renderer<W>,
    ) -> io::Result<()> {
        let advance = model.advance();
        renderer.echo_whitespace(model.text.slice(advance.whitespace))?;
        if let Some(word) = advance.word {
            tracing::trace!(
                start = word.start,
                symbols = word.symbols,
                duration = ?model.pacer.speed().word_duration(word.symbols),
                "word shown"
            );
            renderer.show_word(model.text.word_bytes(word))?;
        } else {
            tracing::info!("reached end of text");
        }
        Ok(())
    }

    /// Write the unread text back to `source`.
    pub(super) fn drain<W: Write>(
        model: &mut Model,
        renderer: &mut Renderer<W>,
        source: &Path,
    ) -> io::Result<()> {
        let saved = match progress::write_remaining(source, model.text.remaining()) {
            Ok(()) => {
                tracing::info!(
                    offset = model.text.position(),
                    remaining = model.text.remaining().len(),
                    "progress saved"
                );
                true
            }
            Err(err) => {
                tracing::debug!(%err, "progress not saved");
                renderer.message(&format!("Sowwy, {err}: {} 😭", err.io_error()))?;
                false
            }
        };
        Self::dispatch(model, renderer, Message::SaveFinished(saved))
    }

    /// Apply one message and perform the output its transition implies.
    fn dispatch<W: Write>(
        model: &mut Model,
        renderer: &mut Renderer<W>,
        msg: Message,
    ) -> io::Result<()> {
        if let Message::Resize(width) = msg {
            renderer.set_width(Some(width));
        }
        let before = model.phase;
        let speed_before = model.pacer.speed();
        let paused_before = model.pacer.is_paused();

        *model = update(std::mem::take(model), msg);

        if let (Phase::DisplayingWord(word), Phase::AwaitingWord) = (before, model.phase) {
            renderer.settle_word(model.text.word_bytes(word))?;
        }
        if model.pacer.speed() != speed_before {
            tracing::debug!(speed = %model.pacer.speed(), "speed changed");
        }
        if model.pacer.is_paused() != paused_before {
            tracing::debug!(paused = model.pacer.is_paused(), "pause toggled");
        }
        Ok(())
    }
}
