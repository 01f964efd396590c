use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tempfile::tempdir;

use crate::pacing::Speed;
use crate::terminal::EventSource;
use crate::text::TextBuffer;

use super::input::{PromptKey, prompt_key, reading_message};
use super::prompt::{DigitInput, PROMPT, RETRY, prompt_speed};
use super::{App, Ending, Message, Model, Phase, Renderer, update};

/// Replays a fixed list of events, then reports silence.
struct ScriptedEvents {
    events: VecDeque<Event>,
}

impl ScriptedEvents {
    fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if let Some(event) = self.events.pop_front() {
            return Ok(Some(event));
        }
        std::thread::sleep(timeout);
        Ok(None)
    }
}

fn key(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn ctrl_c() -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
}

fn code(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn typed(text: &str) -> Vec<Event> {
    text.chars().map(key).collect()
}

fn create_model(text: &str, cpm: u32) -> Model {
    Model::new(
        TextBuffer::new(text.as_bytes().to_vec()),
        Speed::new(cpm).unwrap(),
    )
}

fn ticks(model: Model, millis: u64) -> Model {
    (0..millis).fold(model, |model, _| {
        update(model, Message::Tick(Duration::from_millis(1)))
    })
}

fn rendered(renderer: Renderer<Vec<u8>>) -> String {
    String::from_utf8(renderer.into_inner()).unwrap()
}

// --- update ---

#[test]
fn test_advance_shows_first_word() {
    let mut model = create_model("hello world", 6000);
    let advance = model.advance();
    assert_eq!(advance.whitespace, 0..0);
    let word = advance.word.unwrap();
    assert_eq!(model.phase, Phase::DisplayingWord(word));
    assert_eq!(model.current_word(), Some(word));
    assert_eq!(model.text.word_bytes(word), b"hello");
}

#[test]
fn test_hello_world_word_expires_after_fifty_millis() {
    let mut model = create_model("hello world", 6000);
    model.advance();

    let model = ticks(model, 49);
    assert!(matches!(model.phase, Phase::DisplayingWord(_)));

    let mut model = ticks(model, 1);
    assert_eq!(model.phase, Phase::AwaitingWord);
    assert_eq!(model.pacer.elapsed(), Duration::ZERO);

    let advance = model.advance();
    assert_eq!(advance.whitespace, 5..6);
    assert_eq!(model.text.word_bytes(advance.word.unwrap()), b"world");
}

#[test]
fn test_pause_holds_the_word() {
    let mut model = create_model("hello", 6000);
    model.advance();
    let model = update(model, Message::TogglePause);
    let model = ticks(model, 500);
    assert!(matches!(model.phase, Phase::DisplayingWord(_)));
    assert_eq!(model.pacer.elapsed(), Duration::ZERO);

    let model = update(model, Message::TogglePause);
    let model = ticks(model, 50);
    assert_eq!(model.phase, Phase::AwaitingWord);
}

#[test]
fn test_slower_stops_at_positive_floor() {
    let mut model = create_model("x", 1000);
    for _ in 0..3 {
        model = update(model, Message::Slower);
    }
    assert_eq!(model.pacer.speed().get(), 400);
    model = update(model, Message::Slower);
    assert_eq!(model.pacer.speed().get(), 200);
    model = update(model, Message::Slower);
    assert_eq!(model.pacer.speed().get(), 200);
}

#[test]
fn test_faster_adds_step() {
    let model = update(create_model("x", 1000), Message::Faster);
    assert_eq!(model.pacer.speed().get(), 1200);
}

#[test]
fn test_quit_drains_then_finishes() {
    let mut model = create_model("one two", 1000);
    model.advance();
    let model = update(model, Message::Quit);
    assert_eq!(model.phase, Phase::Draining);

    // Ticks don't expire words while draining
    let model = ticks(model, 1000);
    assert_eq!(model.phase, Phase::Draining);

    let model = update(model, Message::SaveFinished(true));
    assert_eq!(model.ending(), Some(Ending::Saved));
}

#[test]
fn test_failed_save_ends_reading() {
    let model = update(create_model("one", 1000), Message::Quit);
    let model = update(model, Message::SaveFinished(false));
    assert_eq!(model.ending(), Some(Ending::SaveFailed));
}

#[test]
fn test_done_ignores_further_messages() {
    let model = update(create_model("one", 1000), Message::Abort);
    assert_eq!(model.ending(), Some(Ending::Aborted));
    let model = update(model, Message::Faster);
    let model = update(model, Message::Quit);
    assert_eq!(model.ending(), Some(Ending::Aborted));
    assert_eq!(model.pacer.speed().get(), 1000);
}

#[test]
fn test_whitespace_only_finishes_without_words() {
    let mut model = create_model("   \n  ", 1000);
    let advance = model.advance();
    assert_eq!(advance.whitespace, 0..6);
    assert_eq!(advance.word, None);
    assert_eq!(model.ending(), Some(Ending::Finished));
}

#[test]
fn test_farewell_differs_per_ending() {
    assert!(Ending::Saved.farewell().contains("saved"));
    assert!(Ending::Aborted.farewell().contains("without saving"));
    assert_ne!(Ending::Finished.farewell(), Ending::SaveFailed.farewell());
}

// --- input ---

#[test]
fn test_reading_keys_map_to_messages() {
    assert_eq!(reading_message(&key('q')), Some(Message::Quit));
    assert_eq!(reading_message(&key(' ')), Some(Message::TogglePause));
    assert_eq!(reading_message(&key('-')), Some(Message::Slower));
    assert_eq!(reading_message(&key('+')), Some(Message::Faster));
    assert_eq!(reading_message(&key('=')), Some(Message::Faster));
    assert_eq!(reading_message(&ctrl_c()), Some(Message::Abort));
    assert_eq!(reading_message(&Event::Resize(120, 40)), Some(Message::Resize(120)));
}

#[test]
fn test_unknown_keys_are_ignored() {
    assert_eq!(reading_message(&key('x')), None);
    assert_eq!(reading_message(&key('Q')), None);
    assert_eq!(reading_message(&key('5')), None);
    assert_eq!(reading_message(&code(KeyCode::Backspace)), None);
    assert_eq!(reading_message(&Event::FocusGained), None);
}

#[test]
fn test_prompt_keys() {
    assert_eq!(prompt_key(&key('7')), Some(PromptKey::Digit(7)));
    assert_eq!(prompt_key(&code(KeyCode::Backspace)), Some(PromptKey::Backspace));
    assert_eq!(prompt_key(&code(KeyCode::Enter)), Some(PromptKey::Submit));
    assert_eq!(prompt_key(&ctrl_c()), Some(PromptKey::Abort));
    assert_eq!(prompt_key(&key('q')), None);
}

// --- prompt ---

#[test]
fn test_digit_input_caps_at_nine_digits() {
    let mut input = DigitInput::default();
    assert_eq!(input.value(), None);
    for digit in [1, 2, 3, 4, 5, 6, 7, 8, 9] {
        assert!(input.push(digit));
    }
    assert!(!input.push(0));
    assert_eq!(input.value(), Some(123_456_789));

    assert!(input.pop());
    assert_eq!(input.value(), Some(12_345_678));
}

#[test]
fn test_digit_input_pop_on_empty() {
    let mut input = DigitInput::default();
    assert!(!input.pop());
    input.push(0);
    assert_eq!(input.value(), Some(0));
}

#[test]
fn test_prompt_reads_digits_and_backspace() {
    let mut script = typed("12x3");
    script.push(code(KeyCode::Backspace));
    script.push(code(KeyCode::Enter));
    let mut events = ScriptedEvents::new(script);
    let mut out = Vec::new();

    let speed = prompt_speed(&mut out, &mut events).unwrap();
    assert_eq!(speed.map(Speed::get), Some(12));
    let out = String::from_utf8(out).unwrap();
    assert_eq!(out, format!("{PROMPT}123\x08 \x08\r\n"));
}

#[test]
fn test_prompt_rejects_empty_and_zero() {
    let mut script = vec![code(KeyCode::Enter)];
    script.extend(typed("0"));
    script.push(code(KeyCode::Enter));
    script.extend(typed("900"));
    script.push(code(KeyCode::Enter));
    let mut events = ScriptedEvents::new(script);
    let mut out = Vec::new();

    let speed = prompt_speed(&mut out, &mut events).unwrap();
    assert_eq!(speed.map(Speed::get), Some(900));
    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.matches(RETRY).count(), 2);
    assert_eq!(out.matches(PROMPT).count(), 3);
}

#[test]
fn test_prompt_ignores_digits_past_the_ninth() {
    let mut script = typed("1234567890");
    script.push(code(KeyCode::Enter));
    let mut events = ScriptedEvents::new(script);
    let mut out = Vec::new();

    let speed = prompt_speed(&mut out, &mut events).unwrap();
    assert_eq!(speed.map(Speed::get), Some(123_456_789));
}

#[test]
fn test_prompt_backspace_on_empty_writes_nothing() {
    let mut events = ScriptedEvents::new(vec![
        code(KeyCode::Backspace),
        key('5'),
        code(KeyCode::Enter),
    ]);
    let mut out = Vec::new();
    prompt_speed(&mut out, &mut events).unwrap();
    assert!(!String::from_utf8(out).unwrap().contains('\x08'));
}

#[test]
fn test_prompt_ctrl_c_aborts() {
    let mut events = ScriptedEvents::new(vec![key('4'), ctrl_c()]);
    let mut out = Vec::new();
    assert_eq!(prompt_speed(&mut out, &mut events).unwrap(), None);
}

// --- drain ---

#[test]
fn test_quit_writes_unread_suffix() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.txt");
    std::fs::write(&path, "hello world again").unwrap();

    let mut model = create_model("hello world again", 1000);
    let mut renderer = Renderer::new(Vec::new());
    App::present_next_word(&mut model, &mut renderer).unwrap();
    model = update(model, Message::Quit);
    App::drain(&mut model, &mut renderer, &path).unwrap();

    assert_eq!(model.ending(), Some(Ending::Saved));
    assert_eq!(std::fs::read(&path).unwrap(), b" world again");
}

#[test]
fn test_save_failure_is_reported_not_fatal() {
    let dir = tempdir().unwrap();
    let mut model = update(create_model("hello", 1000), Message::Quit);
    let mut renderer = Renderer::new(Vec::new());

    App::drain(&mut model, &mut renderer, dir.path()).unwrap();

    assert_eq!(model.ending(), Some(Ending::SaveFailed));
    let out = rendered(renderer);
    assert!(out.contains("couldn't save reading progress"));
    assert!(out.contains("os error"), "got {out:?}");
}

// --- reading loop ---

fn run_loop(model: &mut Model, script: Vec<Event>, source: &Path) -> String {
    let mut events = ScriptedEvents::new(script);
    let mut renderer = Renderer::new(Vec::new());
    App::reading_loop(
        model,
        &mut events,
        &mut renderer,
        Duration::from_millis(1),
        source,
    )
    .unwrap();
    rendered(renderer)
}

#[test]
fn test_loop_reads_to_the_end_without_saving() {
    let dir = tempdir().unwrap();
    // Any save attempt to this path would fail and show up as SaveFailed.
    let source = dir.path().join("missing").join("book.txt");
    let mut model = create_model("one two\nthree", 999_999_999);

    let out = run_loop(&mut model, Vec::new(), &source);

    assert_eq!(model.ending(), Some(Ending::Finished));
    assert!(!source.exists());
    for word in ["one", "two", "three"] {
        assert_eq!(out.matches(word).count(), 2, "highlighted and settled {word}");
    }
    assert!(out.contains("\r\n"));
}

#[test]
fn test_loop_whitespace_only_renders_no_words() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("missing").join("blank.txt");
    let mut model = create_model("   \n  ", 1000);

    let out = run_loop(&mut model, Vec::new(), &source);

    assert_eq!(model.ending(), Some(Ending::Finished));
    assert_eq!(out, "   \r\n  ");
}

#[test]
fn test_loop_quit_saves_from_cursor() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.txt");
    std::fs::write(&path, "one two three").unwrap();
    let mut model = create_model("one two three", 1000);

    run_loop(&mut model, vec![key('q')], &path);

    assert_eq!(model.ending(), Some(Ending::Saved));
    assert_eq!(std::fs::read(&path).unwrap(), b" two three");
}

#[test]
fn test_loop_abort_leaves_file_alone() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.txt");
    std::fs::write(&path, "one two three").unwrap();
    let mut model = create_model("one two three", 1000);

    run_loop(&mut model, vec![key('x'), ctrl_c()], &path);

    assert_eq!(model.ending(), Some(Ending::Aborted));
    assert_eq!(std::fs::read(&path).unwrap(), b"one two three");
}

#[test]
fn test_loop_applies_speed_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.txt");
    std::fs::write(&path, "a b").unwrap();
    let mut model = create_model("a b", 1000);

    run_loop(&mut model, vec![key('-'), key('-'), key('+'), key('q')], &path);

    assert_eq!(model.pacer.speed().get(), 800);
    assert_eq!(model.ending(), Some(Ending::Saved));
}
