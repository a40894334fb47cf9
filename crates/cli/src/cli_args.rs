//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure and turns the
//! parsed arguments into the settings of a choice session.

use std::time::Duration;

use clap::Parser;
use indexmap::IndexMap;
use itertools::Itertools;
use rust_choices_core::config::{DependencyScope, SessionConfig, DEFAULT_ERROR_DELAY};
use rust_choices_core::error::{Error, Result};
use rust_choices_core::templates::Templates;

/// Command-line arguments for the rust-choices CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use rust_choices_cli::cli_args::Args;
///
/// let args = Args::parse_from(["rch", "--sort", "-t", "on=(*) {text}"]);
/// let settings = args.session_config().unwrap();
/// assert!(settings.sort);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the choice definition YAML file.
    ///
    /// If not provided, defaults to `~/.rust-choices/choices.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Sort choices by their full dotted path before showing them.
    #[arg(long, short = 's', action)]
    pub sort: bool,

    /// Seconds a refused toggle message stays on screen.
    ///
    /// No input is read while the message is shown. Defaults to 2.
    #[arg(long, short = 'd')]
    pub error_delay: Option<u64>,

    /// Maximum selections per group, for groups that do not set `max`.
    #[arg(long, short = 'm')]
    pub max: Option<usize>,

    /// Only look up dependencies inside the namespace of the toggled choice.
    ///
    /// By default dependencies match a key in any namespace.
    #[arg(long, action)]
    pub namespace_scoped: bool,

    /// Line template override in the format kind=template.
    ///
    /// Kinds are `group`, `on`, `off`, `error`, `cursor` and `clear`; the
    /// template uses `{text}` as its placeholder. Can be repeated.
    ///
    /// # Examples
    /// ```bash
    /// rch -t "on= (*) {text}" -t "off= ( ) {text}"
    /// ```
    #[arg(long = "template", short = 't', action = clap::ArgAction::Append)]
    pub templates: Vec<String>,
}

impl Args {
    /// Parses the `kind=template` overrides, keeping the last one per kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedTemplateOverride`] if an override has no `=`.
    pub fn template_overrides(&self) -> Result<IndexMap<String, String>> {
        let mut overrides = IndexMap::new();
        for template_override in &self.templates {
            let (kind, template) = template_override
                .splitn(2, '=')
                .collect_tuple::<(&str, &str)>()
                .ok_or_else(|| Error::MalformedTemplateOverride(template_override.clone()))?;
            overrides.insert(kind.trim().to_string(), template.to_string());
        }

        Ok(overrides)
    }

    /// Builds the session settings described by the arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if a template override is malformed, names an unknown
    /// kind, or is not a valid template.
    pub fn session_config(&self) -> Result<SessionConfig> {
        Ok(SessionConfig {
            sort: self.sort,
            error_delay: self
                .error_delay
                .map_or(DEFAULT_ERROR_DELAY, Duration::from_secs),
            default_max_selections: self.max,
            dependency_scope: if self.namespace_scoped {
                DependencyScope::Namespace
            } else {
                DependencyScope::Global
            },
            templates: Templates::from_overrides(self.template_overrides()?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_choices_core::templates::TemplateKind;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["rch"]);

        assert!(args.config_path.is_none());
        assert!(!args.sort);
        assert!(args.error_delay.is_none());
        assert!(args.max.is_none());
        assert!(!args.namespace_scoped);
        assert!(args.templates.is_empty());
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from([
            "rch",
            "-c",
            "/custom/choices.yml",
            "-s",
            "-d",
            "5",
            "-m",
            "3",
            "-t",
            "on=> {text}",
        ]);

        assert_eq!(args.config_path, Some("/custom/choices.yml".to_string()));
        assert!(args.sort);
        assert_eq!(args.error_delay, Some(5));
        assert_eq!(args.max, Some(3));
        assert_eq!(args.templates, vec!["on=> {text}".to_string()]);
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::parse_from([
            "rch",
            "--config-path",
            "/custom/choices.yml",
            "--sort",
            "--error-delay",
            "0",
            "--max",
            "1",
            "--namespace-scoped",
            "--template",
            "group=# {text}",
            "--template",
            "error=! {text}",
        ]);

        assert_eq!(args.config_path, Some("/custom/choices.yml".to_string()));
        assert!(args.sort);
        assert_eq!(args.error_delay, Some(0));
        assert_eq!(args.max, Some(1));
        assert!(args.namespace_scoped);
        assert_eq!(args.templates.len(), 2);
    }

    #[test]
    fn test_default_session_config() {
        let settings = Args::parse_from(["rch"]).session_config().unwrap();

        assert!(!settings.sort);
        assert_eq!(settings.error_delay, DEFAULT_ERROR_DELAY);
        assert_eq!(settings.default_max_selections, None);
        assert_eq!(settings.dependency_scope, DependencyScope::Global);
    }

    #[test]
    fn test_session_config_from_flags() {
        let settings = Args::parse_from([
            "rch",
            "-d",
            "0",
            "-m",
            "2",
            "--namespace-scoped",
            "-t",
            "on=<{text}>",
        ])
        .session_config()
        .unwrap();

        assert_eq!(settings.error_delay, Duration::ZERO);
        assert_eq!(settings.default_max_selections, Some(2));
        assert_eq!(settings.dependency_scope, DependencyScope::Namespace);
        assert_eq!(
            settings.templates.render(TemplateKind::On, "PHP").unwrap(),
            "<PHP>"
        );
    }

    #[test]
    fn test_template_value_may_contain_equals() {
        let args = Args::parse_from(["rch", "-t", "cursor==> {text}"]);
        let overrides = args.template_overrides().unwrap();
        assert_eq!(overrides.get("cursor"), Some(&"=> {text}".to_string()));
    }

    #[test]
    fn test_template_override_without_equals() {
        let args = Args::parse_from(["rch", "-t", "on"]);
        let result = args.session_config();
        assert!(matches!(result, Err(Error::MalformedTemplateOverride(_))));
    }

    #[test]
    fn test_template_override_with_unknown_placeholder() {
        let args = Args::parse_from(["rch", "-t", "error={name}"]);
        let result = args.session_config();
        assert!(matches!(result, Err(Error::UnknownPlaceholder(_, key)) if key == "name"));
    }

    #[test]
    fn test_template_override_with_unknown_kind() {
        let args = Args::parse_from(["rch", "-t", "bold=**{text}**"]);
        let result = args.session_config();
        assert!(matches!(result, Err(Error::UnknownTemplateKind(kind)) if kind == "bold"));
    }
}
