use std::io::{self, Write};
use std::time::Duration;

use crate::app::input::{self, PromptKey};
use crate::pacing::Speed;
use crate::terminal::EventSource;

pub(super) const PROMPT: &str = "Enter speed (characters per minute, ~1000 recommended): ";
pub(super) const RETRY: &str = "Enter a valid number ^-^";

const MAX_DIGITS: usize = 9;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A non-negative integer typed one digit at a time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct DigitInput {
    value: u32,
    digits: usize,
}

impl DigitInput {
    /// Append a digit. Digits past the ninth are ignored.
    pub(super) fn push(&mut self, digit: u8) -> bool {
        if self.digits == MAX_DIGITS {
            return false;
        }
        self.value = self.value * 10 + u32::from(digit);
        self.digits += 1;
        true
    }

    /// Drop the last digit, if any.
    pub(super) const fn pop(&mut self) -> bool {
        if self.digits == 0 {
            return false;
        }
        self.value /= 10;
        self.digits -= 1;
        true
    }

    pub(super) const fn value(&self) -> Option<u32> {
        if self.digits == 0 {
            None
        } else {
            Some(self.value)
        }
    }
}

/// Ask for the reading speed until a positive number is entered.
///
/// Returns `Ok(None)` if the reader interrupts with Ctrl-C.
pub(super) fn prompt_speed<W: Write, E: EventSource>(
    out: &mut W,
    events: &mut E,
) -> io::Result<Option<Speed>> {
    loop {
        out.write_all(PROMPT.as_bytes())?;
        out.flush()?;

        let mut input = DigitInput::default();
        loop {
            let Some(event) = events.next_event(POLL_INTERVAL)? else {
                continue;
            };
            match input::prompt_key(&event) {
                Some(PromptKey::Digit(digit)) => {
                    if input.push(digit) {
                        write!(out, "{digit}")?;
                        out.flush()?;
                    }
                }
                Some(PromptKey::Backspace) => {
                    if input.pop() {
                        out.write_all(b"\x08 \x08")?;
                        out.flush()?;
                    }
                }
                Some(PromptKey::Submit) => break,
                Some(PromptKey::Abort) => {
                    out.write_all(b"\r\n")?;
                    return Ok(None);
                }
                None => {}
            }
        }
        out.write_all(b"\r\n")?;

        if let Some(speed) = input.value().and_then(Speed::new) {
            return Ok(Some(speed));
        }
        write!(out, "{RETRY}\r\n")?;
    }
}
