//! Rust Choices Core Library
//!
//! This crate provides the core of rust-choices, an interactive hierarchical
//! multi-select list for the terminal. It turns a nested YAML choice definition
//! into a flat, addressable list of choices grouped by namespace, and validates
//! selections against per-group limits, read-only locks and dependencies.
//!
//! # Key Features
//!
//! - **Flattening**: Nested definitions become dotted paths, `_` entries carry group metadata
//! - **Choice Model**: Choices, groups and the rendered line layout
//! - **Constraints**: Capacity, dependency, orphan and read-only checks
//! - **Templates**: Swappable line templates validated up front
//! - **Session**: Cursor and selection state driven by the terminal front end
//!
//! # Examples
//!
//! Building a session and toggling a choice:
//!
//! ```
//! use rust_choices_core::config::SessionConfig;
//! use rust_choices_core::session::{Session, Toggle};
//!
//! let config = serde_yaml::from_str("G: {_: {max: 1}, a: A, b: B}")?;
//! let mut session = Session::from_config(&config, &SessionConfig::default())?;
//!
//! // The cursor starts on the last line, `b`
//! assert_eq!(session.toggle(), Toggle::Selected);
//! assert_eq!(session.selected_keys(), vec!["b".to_string()]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod choices;
pub mod config;
pub mod constraints;
pub mod error;
pub mod file_handling;
pub mod flatten;
pub mod render;
pub mod selection;
pub mod session;
pub mod templates;
