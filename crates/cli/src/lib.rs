//! Rust Choices CLI Library
//!
//! This crate provides the command-line interface for rust-choices, an
//! interactive multi-select list for the terminal. It loads a nested choice
//! definition, lets the user pick choices with the keyboard, and prints the
//! selected keys.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing and session settings
//! - [`choice_prompt`]: Key decoding, terminal control and the interactive prompt
//!
//! # Examples
//!
//! ```bash
//! # Pick from the default definition file
//! rch
//!
//! # Pick from a given file, sorted, with a custom marker for selected lines
//! rch -c ./stack.yml --sort -t "on= (*) {text}"
//! ```

pub mod choice_prompt;
pub mod cli_args;
