//! Flattening of nested choice definitions into dotted paths.
//!
//! A choice definition is a nested YAML mapping. Every non-empty mapping (or
//! sequence) is a branch, everything else is a leaf. The reserved `_` key holds
//! group metadata and is captured as-is instead of being expanded.

use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Key reserved for group metadata at any nesting level
pub const GROUP_MARKER: &str = "_";

/// Separator between path segments, e.g. `Db.Lang.php`
pub const PATH_SEPARATOR: char = '.';

/// Flattens a nested mapping into an ordered mapping of dotted path to leaf value.
///
/// Traversal order is preserved. Empty mappings and sequences are leaves, and
/// the value under a `_` key is never expanded.
///
/// # Errors
///
/// Returns [`Error::UnsupportedKey`] if a mapping key is not a string, number
/// or boolean.
///
/// # Examples
///
/// ```
/// use rust_choices_core::flatten::flatten;
///
/// let config: serde_yaml::Mapping = serde_yaml::from_str("Db: {Lang: {php: PHP}}").unwrap();
/// let flattened = flatten(&config).unwrap();
/// assert!(flattened.contains_key("Db.Lang.php"));
/// ```
pub fn flatten(mapping: &Mapping) -> Result<IndexMap<String, Value>> {
    let mut flattened = IndexMap::new();
    flatten_mapping(mapping, "", &mut flattened)?;
    Ok(flattened)
}

/// Splits a dotted path into `(namespace, key)`.
///
/// The namespace is everything before the last separator, or empty for
/// root-level paths.
#[must_use]
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind(PATH_SEPARATOR) {
        Some(index) => (&path[..index], &path[index + 1..]),
        None => ("", path),
    }
}

fn flatten_mapping(
    mapping: &Mapping,
    prefix: &str,
    flattened: &mut IndexMap<String, Value>,
) -> Result<()> {
    for (key, value) in mapping {
        let key = key_to_string(key, prefix)?;
        flatten_entry(format!("{prefix}{key}"), &key, value, flattened)?;
    }

    Ok(())
}

fn flatten_entry(
    path: String,
    key: &str,
    value: &Value,
    flattened: &mut IndexMap<String, Value>,
) -> Result<()> {
    if key != GROUP_MARKER {
        match value {
            Value::Mapping(children) if !children.is_empty() => {
                return flatten_mapping(children, &format!("{path}{PATH_SEPARATOR}"), flattened);
            }
            Value::Sequence(children) if !children.is_empty() => {
                for (index, child) in children.iter().enumerate() {
                    let child_key = index.to_string();
                    flatten_entry(
                        format!("{path}{PATH_SEPARATOR}{child_key}"),
                        &child_key,
                        child,
                        flattened,
                    )?;
                }
                return Ok(());
            }
            _ => {}
        }
    }

    flattened.insert(path, value.clone());
    Ok(())
}

fn key_to_string(key: &Value, prefix: &str) -> Result<String> {
    match key {
        Value::String(key) => Ok(key.clone()),
        Value::Number(key) => Ok(key.to_string()),
        Value::Bool(key) => Ok(key.to_string()),
        _ => {
            let location = prefix.trim_end_matches(PATH_SEPARATOR);
            Err(Error::UnsupportedKey(if location.is_empty() {
                "<root>".to_string()
            } else {
                location.to_string()
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn paths(flattened: &IndexMap<String, Value>) -> Vec<&str> {
        flattened.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_flatten_single_level() {
        let flattened = flatten(&parse("a: A\nb: B")).unwrap();
        assert_eq!(paths(&flattened), vec!["a", "b"]);
        assert_eq!(flattened["a"], Value::String("A".to_string()));
    }

    #[test]
    fn test_flatten_three_levels_matches_level_by_level() {
        let nested = parse(
            r#"
Db:
  Lang:
    php: PHP
    rs: Rust
  Engine:
    pg: Postgres
"#,
        );
        let flattened = flatten(&nested).unwrap();

        // Flatten the innermost levels first, then join them under their parents manually
        let mut manual: IndexMap<String, Value> = IndexMap::new();
        for (parent, child) in [("Db.Lang", "Lang"), ("Db.Engine", "Engine")] {
            let inner = flatten(nested["Db"][child].as_mapping().unwrap()).unwrap();
            for (path, value) in inner {
                manual.insert(format!("{parent}.{path}"), value);
            }
        }

        assert_eq!(flattened, manual);
        assert_eq!(
            paths(&flattened),
            vec!["Db.Lang.php", "Db.Lang.rs", "Db.Engine.pg"]
        );
    }

    #[test]
    fn test_group_marker_is_not_expanded() {
        let flattened = flatten(&parse("G:\n  _:\n    max: 1\n  a: A")).unwrap();
        assert_eq!(paths(&flattened), vec!["G._", "G.a"]);
        assert!(flattened["G._"].is_mapping());
        assert_eq!(flattened["G._"]["max"], Value::Number(1.into()));
    }

    #[test]
    fn test_empty_mapping_is_a_leaf() {
        let flattened = flatten(&parse("G:\n  empty: {}\n  a: A")).unwrap();
        assert_eq!(paths(&flattened), vec!["G.empty", "G.a"]);
        assert!(flattened["G.empty"].as_mapping().unwrap().is_empty());
    }

    #[test]
    fn test_sequence_is_expanded_by_index() {
        let flattened = flatten(&parse("G: [First, Second]")).unwrap();
        assert_eq!(paths(&flattened), vec!["G.0", "G.1"]);
        assert_eq!(flattened["G.1"], Value::String("Second".to_string()));
    }

    #[test]
    fn test_numeric_and_boolean_keys_become_strings() {
        let flattened = flatten(&parse("G:\n  1: One\n  true: Yes")).unwrap();
        assert_eq!(paths(&flattened), vec!["G.1", "G.true"]);
    }

    #[test]
    fn test_unsupported_key_is_rejected() {
        let mut group = Mapping::new();
        group.insert(Value::Null, Value::String("X".to_string()));
        let mut root = Mapping::new();
        root.insert(Value::String("G".to_string()), Value::Mapping(group));

        let result = flatten(&root);
        assert!(matches!(result, Err(Error::UnsupportedKey(location)) if location == "G"));
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("Db.Lang.php"), ("Db.Lang", "php"));
        assert_eq!(split_path("php"), ("", "php"));
        assert_eq!(split_path("G._"), ("G", "_"));
    }
}
