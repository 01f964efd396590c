use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::Message;

/// Keys understood by the speed prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PromptKey {
    Digit(u8),
    Backspace,
    Submit,
    Abort,
}

/// Map a terminal event to a reading-loop message.
pub(super) fn reading_message(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) => reading_key(*key),
        Event::Resize(width, _) => Some(Message::Resize(*width)),
        _ => None,
    }
}

fn reading_key(key: KeyEvent) -> Option<Message> {
    if is_interrupt(key) {
        return Some(Message::Abort);
    }
    match key.code {
        KeyCode::Char('q') => Some(Message::Quit),
        KeyCode::Char(' ') => Some(Message::TogglePause),
        KeyCode::Char('-') => Some(Message::Slower),
        KeyCode::Char('+' | '=') => Some(Message::Faster),
        _ => None,
    }
}

/// Map a terminal event to a prompt key.
pub(super) fn prompt_key(event: &Event) -> Option<PromptKey> {
    let Event::Key(key) = event else {
        return None;
    };
    if is_interrupt(*key) {
        return Some(PromptKey::Abort);
    }
    match key.code {
        KeyCode::Char(c @ '0'..='9') => Some(PromptKey::Digit(c as u8 - b'0')),
        KeyCode::Backspace => Some(PromptKey::Backspace),
        KeyCode::Enter => Some(PromptKey::Submit),
        _ => None,
    }
}

// Raw mode turns Ctrl-C into an ordinary key press.
fn is_interrupt(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
