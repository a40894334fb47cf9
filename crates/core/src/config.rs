//! Configuration for rust-choices.
//!
//! This module resolves the choice definition file path and holds the
//! construction-time settings of an interactive session.

use std::time::Duration;

use crate::templates::Templates;

/// Default path for the choice definition file
const DEFAULT_CHOICES_PATH: &str = "~/.rust-choices/choices.yml";

/// How long a validation message stays on screen
pub const DEFAULT_ERROR_DELAY: Duration = Duration::from_secs(2);

/// How selections, dependencies and orphans are matched by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependencyScope {
    /// Match keys across the whole choice list, whatever their namespace
    #[default]
    Global,
    /// Only match keys inside the namespace of the choice being toggled,
    /// and select equal keys in different namespaces independently
    Namespace,
}

/// Construction-time settings of a choice session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sort flattened paths before building the list
    pub sort: bool,
    /// Time a validation message is shown before the line is restored
    pub error_delay: Duration,
    /// Capacity of groups that do not set `max` themselves, `None` is unbounded
    pub default_max_selections: Option<usize>,
    pub dependency_scope: DependencyScope,
    pub templates: Templates,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sort: false,
            error_delay: DEFAULT_ERROR_DELAY,
            default_max_selections: None,
            dependency_scope: DependencyScope::Global,
            templates: Templates::default(),
        }
    }
}

/// Resolves the choice definition file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use rust_choices_core::config::get_choices_path;
///
/// let custom_path = get_choices_path(&Some("/path/to/choices.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/choices.yml");
/// ```
pub fn get_choices_path(choices_path_arg: &Option<String>) -> String {
    let choices_path = match choices_path_arg {
        Some(choices_path) => choices_path,
        None => DEFAULT_CHOICES_PATH,
    };

    shellexpand::tilde(choices_path).to_string()
}
