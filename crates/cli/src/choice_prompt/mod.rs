//! Interactive hierarchical multi-select prompt.
//!
//! This module couples a choice session to the terminal: raw input bytes are
//! decoded into keys, and the list is redrawn one line at a time.
//!
//! # User Interface
//!
//! The interface supports:
//! - Up/Down arrows to move between lines (no wraparound)
//! - Space to toggle the choice under the cursor
//! - Enter to confirm the selection
//! - Ctrl-C or Ctrl-D to leave without selecting anything
//!
//! Refused toggles show a message in place of the line for a short delay.

pub mod input;
pub mod terminal;
pub mod ui;

pub use input::{read_key, Key};
pub use terminal::{CrosstermTerminal, TerminalControl};
pub use ui::ChoicePrompt;
