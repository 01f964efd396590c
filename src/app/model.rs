use std::ops::Range;

use crate::pacing::{Pacer, Speed};
use crate::text::{TextBuffer, Word};

/// Where the reader is in its cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// No word on screen; the next tick fetches one.
    #[default]
    AwaitingWord,
    /// A word is highlighted and its display window is running.
    DisplayingWord(Word),
    /// Quit was requested and the unread text is being written back.
    Draining,
    /// Reading is over.
    Done(Ending),
}

/// How a reading session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// Every word was shown; nothing left to save.
    Finished,
    /// Quit, and the unread text was written back.
    Saved,
    /// Quit, but the unread text could not be written back.
    SaveFailed,
    /// Interrupted without saving.
    Aborted,
}

impl Ending {
    /// Closing line shown to the reader.
    pub const fn farewell(self) -> &'static str {
        match self {
            Self::Finished => "That's the whole text. Bye-bye! :3",
            Self::Saved => "Progress saved. Bye-bye! :3",
            Self::SaveFailed => "Bye-bye! :3",
            Self::Aborted => "Stopped without saving. Bye-bye! :3",
        }
    }
}

/// Result of moving to the next word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// Separators skipped before the word, to echo verbatim.
    pub whitespace: Range<usize>,
    /// The new word, or `None` at the end of the text.
    pub word: Option<Word>,
}

/// The complete reader state.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub text: TextBuffer,
    pub pacer: Pacer,
    pub phase: Phase,
}

impl Model {
    pub fn new(text: TextBuffer, speed: Speed) -> Self {
        Self {
            text,
            pacer: Pacer::new(speed),
            phase: Phase::AwaitingWord,
        }
    }

    pub const fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done(_))
    }

    pub const fn ending(&self) -> Option<Ending> {
        match self.phase {
            Phase::Done(ending) => Some(ending),
            _ => None,
        }
    }

    /// The word currently on screen.
    pub const fn current_word(&self) -> Option<Word> {
        match self.phase {
            Phase::DisplayingWord(word) => Some(word),
            _ => None,
        }
    }

    /// Skip separators and pick up the next word.
    ///
    /// Moves to [`Phase::DisplayingWord`], or to [`Phase::Done`] with
    /// [`Ending::Finished`] when the text is exhausted.
    pub fn advance(&mut self) -> Advance {
        let whitespace = self.text.skip_whitespace();
        let word = self.text.next_word();
        self.phase = match word {
            Some(word) => Phase::DisplayingWord(word),
            None => Phase::Done(Ending::Finished),
        };
        Advance { whitespace, word }
    }
}
