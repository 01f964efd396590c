use std::time::Duration;

use crate::app::model::{Ending, Model, Phase};

/// All events that change the reader state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Wall time passed since the previous tick
    Tick(Duration),
    /// Pause or resume the word timer
    TogglePause,
    /// Lower the speed by one step
    Slower,
    /// Raise the speed by one step
    Faster,
    /// Stop reading and save progress
    Quit,
    /// Stop reading without saving
    Abort,
    /// Result of writing the unread text back
    SaveFinished(bool),
    /// Terminal resized to the given width
    Resize(u16),
}

/// Pure state transition for one message.
///
/// Output (echoing, highlighting, saving) is driven by the event loop
/// from the resulting phase changes.
pub fn update(mut model: Model, msg: Message) -> Model {
    if model.is_done() {
        return model;
    }

    match msg {
        Message::Tick(dt) => {
            if let Phase::DisplayingWord(word) = model.phase {
                model.pacer.tick(dt);
                if model.pacer.is_word_expired(word.symbols) {
                    model.pacer.on_expire();
                    model.phase = Phase::AwaitingWord;
                }
            }
        }
        Message::TogglePause => model.pacer.toggle_pause(),
        Message::Slower => model.pacer.slower(),
        Message::Faster => model.pacer.faster(),
        Message::Quit => model.phase = Phase::Draining,
        Message::Abort => model.phase = Phase::Done(Ending::Aborted),
        Message::SaveFinished(saved) => {
            if model.phase == Phase::Draining {
                model.phase = Phase::Done(if saved {
                    Ending::Saved
                } else {
                    Ending::SaveFailed
                });
            }
        }
        // Width only matters to the renderer
        Message::Resize(_) => {}
    }

    model
}
