//! Scripted keystroke sessions against the choice prompt.
//!
//! Input is an in-memory byte stream, output is captured, and the terminal
//! records its mode changes instead of touching the real tty.

use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::rc::Rc;
use std::time::Duration;

use rust_choices_cli::choice_prompt::{ChoicePrompt, TerminalControl};
use rust_choices_core::config::SessionConfig;
use rust_choices_core::error::Error;
use serde_yaml::Mapping;

const UP: &[u8] = b"\x1b[A";
const DOWN: &[u8] = b"\x1b[B";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Raw,
    Restored,
}

#[derive(Clone, Default)]
struct RecordingTerminal {
    modes: Rc<RefCell<Vec<Mode>>>,
}

impl TerminalControl for RecordingTerminal {
    fn enter_raw_no_echo(&mut self) -> io::Result<()> {
        self.modes.borrow_mut().push(Mode::Raw);
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        self.modes.borrow_mut().push(Mode::Restored);
        Ok(())
    }
}

/// Output sink that fails after a number of bytes
struct FailingOutput {
    remaining: usize,
}

impl Write for FailingOutput {
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        if buffer.len() > self.remaining {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        }
        self.remaining -= buffer.len();
        Ok(buffer.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn settings() -> SessionConfig {
    SessionConfig {
        error_delay: Duration::ZERO,
        ..SessionConfig::default()
    }
}

fn definitions(yaml: &str) -> Mapping {
    serde_yaml::from_str(yaml).unwrap()
}

fn keys(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

fn run(yaml: &str, input: Vec<u8>) -> (Vec<String>, RecordingTerminal) {
    let terminal = RecordingTerminal::default();
    let mut prompt = ChoicePrompt::new(
        &definitions(yaml),
        settings(),
        Cursor::new(input),
        Vec::new(),
        terminal.clone(),
    )
    .unwrap();

    let selected = prompt.ask().unwrap();
    (selected, terminal)
}

#[test]
fn test_select_one_of_a_group_without_metadata() {
    // Lines: A, x, y; the cursor starts on y
    let (selected, _) = run("A:\n  x: X\n  y: Y", keys(&[UP, b" ", b"\n"]));
    assert_eq!(selected, vec!["x".to_string()]);
}

#[test]
fn test_max_one_rejects_second_selection() {
    let yaml = "G:\n  _:\n    max: 1\n  a: A\n  b: B";
    let (selected, _) = run(yaml, keys(&[UP, b" ", DOWN, b" ", b"\n"]));
    assert_eq!(selected, vec!["a".to_string()]);
}

#[test]
fn test_dependency_must_be_selected_first() {
    let yaml = "G:\n  _:\n    depends:\n      b: [a]\n  a: A\n  b: B";
    let (selected, _) = run(yaml, keys(&[b" ", UP, b" ", DOWN, b" ", b"\n"]));
    assert_eq!(selected, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_deselecting_a_dependency_is_refused() {
    let yaml = "G:\n  _:\n    depends:\n      b: [a]\n  a: A\n  b: B";
    let mut prompt = ChoicePrompt::new(
        &definitions(yaml),
        settings(),
        Cursor::new(keys(&[UP, b" ", DOWN, b" ", UP, b" ", b"\n"])),
        Vec::new(),
        RecordingTerminal::default(),
    )
    .unwrap();

    assert_eq!(
        prompt.ask().unwrap(),
        vec!["a".to_string(), "b".to_string()]
    );
    let output = String::from_utf8(prompt.into_output()).unwrap();
    assert!(output.contains("First remove child dependencies: B"));
}

#[test]
fn test_toggle_off_and_on_keeps_order_of_others() {
    let yaml = "G:\n  a: A\n  b: B\n  c: C";
    // Select c, b, a (moving up), then toggle a off and on again
    let input = keys(&[b" ", UP, b" ", UP, b" ", b" ", b" ", b"\n"]);
    let (selected, _) = run(yaml, input);
    assert_eq!(
        selected,
        vec!["c".to_string(), "b".to_string(), "a".to_string()]
    );
}

#[test]
fn test_navigation_never_leaves_the_list() {
    let yaml = "G:\n  a: A\n  b: B";
    // Far more ups than lines, then select the first choice line
    let input = keys(&[UP, UP, UP, UP, UP, DOWN, b" ", DOWN, DOWN, DOWN, b"\n"]);
    let (selected, _) = run(yaml, input);
    assert_eq!(selected, vec!["a".to_string()]);
}

#[test]
fn test_space_on_group_header_is_ignored() {
    let (selected, _) = run("G:\n  a: A", keys(&[UP, b" ", b"\n"]));
    assert!(selected.is_empty());
}

#[test]
fn test_other_bytes_are_ignored() {
    let (selected, _) = run("G:\n  a: A", keys(&[b"xq0", b" ", b"\t", b"\n"]));
    assert_eq!(selected, vec!["a".to_string()]);
}

#[test]
fn test_preselected_choices_are_returned() {
    let yaml = "G:\n  _:\n    selected: [a]\n  a: A\n  b: B";
    let (selected, _) = run(yaml, keys(&[b" ", b"\n"]));
    assert_eq!(selected, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_closed_input_returns_nothing_and_restores_terminal() {
    let (selected, terminal) = run("G:\n  a: A", keys(&[b" "]));
    assert!(selected.is_empty());
    assert_eq!(*terminal.modes.borrow(), vec![Mode::Raw, Mode::Restored]);
}

#[test]
fn test_interrupt_returns_nothing() {
    let (selected, terminal) = run("G:\n  a: A", keys(&[b" ", b"\x03"]));
    assert!(selected.is_empty());
    assert_eq!(*terminal.modes.borrow(), vec![Mode::Raw, Mode::Restored]);
}

#[test]
fn test_terminal_restored_when_output_fails() {
    let terminal = RecordingTerminal::default();
    let mut prompt = ChoicePrompt::new(
        &definitions("G:\n  a: A"),
        settings(),
        Cursor::new(b" \n".to_vec()),
        FailingOutput { remaining: 4 },
        terminal.clone(),
    )
    .unwrap();

    let result = prompt.ask();
    assert!(matches!(result, Err(Error::Stdio(_))));
    assert_eq!(*terminal.modes.borrow(), vec![Mode::Raw, Mode::Restored]);
}

#[test]
fn test_configuration_error_does_not_touch_terminal() {
    let terminal = RecordingTerminal::default();
    let result = ChoicePrompt::new(
        &definitions("G:\n  _:\n    depends:\n      a: [nope]\n  a: A"),
        settings(),
        Cursor::new(Vec::new()),
        Vec::new(),
        terminal.clone(),
    );

    assert!(matches!(result, Err(Error::UnknownDependency(_, _))));
    assert!(terminal.modes.borrow().is_empty());
}
