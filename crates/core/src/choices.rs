//! Choice model built from a flattened choice definition.
//!
//! Leaves become [`Choice`]s, `_` records become [`Group`] metadata for their
//! namespace, and every namespace gets a header line in the rendered list.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::flatten::{flatten, split_path, GROUP_MARKER};

/// A selectable leaf of the choice definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Identifier, unique within its namespace only
    pub key: String,
    /// Dot-joined path of the ancestors, empty at root level
    pub namespace: String,
    pub display_name: String,
    pub readonly: bool,
    /// Keys that must be selected before this choice can be
    pub depends_on: Vec<String>,
    /// Listed in the `selected` metadata of its group
    pub preselected: bool,
}

impl Display for Choice {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.display_name)
    }
}

/// Metadata attached to a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub namespace: String,
    /// `None` means unbounded
    pub max_selections: Option<usize>,
    pub readonly_keys: IndexSet<String>,
    pub dependencies: IndexMap<String, Vec<String>>,
    pub preselected: IndexSet<String>,
}

impl Group {
    fn new(namespace: &str, max_selections: Option<usize>) -> Self {
        Self {
            namespace: namespace.to_string(),
            max_selections,
            readonly_keys: IndexSet::new(),
            dependencies: IndexMap::new(),
            preselected: IndexSet::new(),
        }
    }

    fn from_record(namespace: &str, value: &Value, default_max: Option<usize>) -> Result<Self> {
        let record: GroupRecord = match value {
            Value::Null => GroupRecord::default(),
            Value::Mapping(_) => serde_yaml::from_value(value.clone()).map_err(|original| {
                Error::MalformedGroup {
                    namespace: namespace.to_string(),
                    original,
                }
            })?,
            _ => return Err(Error::GroupNotAMapping(namespace.to_string())),
        };

        Ok(Self {
            namespace: namespace.to_string(),
            max_selections: record.max.or(default_max),
            readonly_keys: record.readonly.into_vec().into_iter().collect(),
            dependencies: record
                .depends
                .into_iter()
                .map(|(key, depends_on)| (key, depends_on.into_vec()))
                .collect(),
            preselected: record.selected.into_vec().into_iter().collect(),
        })
    }
}

/// Raw shape of a `_` entry.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct GroupRecord {
    max: Option<usize>,
    #[serde(default)]
    readonly: OneOrMany,
    #[serde(default)]
    depends: IndexMap<String, OneOrMany>,
    #[serde(default)]
    selected: OneOrMany,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl Default for OneOrMany {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// One line of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Header for a namespace, not toggleable
    Group(String),
    /// Index into [`ChoiceList::choices`]
    Choice(usize),
}

/// The flattened, addressable choice list with its group table.
///
/// Built once and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ChoiceList {
    choices: Vec<Choice>,
    groups: IndexMap<String, Group>,
    lines: Vec<Line>,
}

impl ChoiceList {
    /// Builds the list from a nested choice definition.
    ///
    /// # Errors
    ///
    /// Returns an error for unsupported keys or values, malformed group
    /// metadata, or a dependency on a key no choice carries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_choices_core::choices::ChoiceList;
    /// use rust_choices_core::config::SessionConfig;
    ///
    /// let config = serde_yaml::from_str("A: {x: X, y: Y}").unwrap();
    /// let list = ChoiceList::from_config(&config, &SessionConfig::default()).unwrap();
    /// assert_eq!(list.line_count(), 3);
    /// assert_eq!(list.choices()[0].namespace, "A");
    /// ```
    pub fn from_config(config: &Mapping, settings: &SessionConfig) -> Result<Self> {
        let mut flattened = flatten(config)?;
        if settings.sort {
            flattened.sort_keys();
        }

        Self::from_flattened(&flattened, settings.default_max_selections)
    }

    /// Builds the list from already flattened `path -> value` entries.
    ///
    /// # Errors
    ///
    /// See [`ChoiceList::from_config`].
    pub fn from_flattened(
        flattened: &IndexMap<String, Value>,
        default_max: Option<usize>,
    ) -> Result<Self> {
        // Group records apply to every sibling, wherever the `_` entry sits
        let mut groups: IndexMap<String, Group> = IndexMap::new();
        for (path, value) in flattened {
            let (namespace, key) = split_path(path);
            if key == GROUP_MARKER {
                groups.insert(
                    namespace.to_string(),
                    Group::from_record(namespace, value, default_max)?,
                );
            }
        }

        let mut choices: Vec<Choice> = Vec::new();
        let mut lines: Vec<Line> = Vec::new();
        let mut headers: HashSet<&str> = HashSet::new();

        for (path, value) in flattened {
            let (namespace, key) = split_path(path);

            // Root choices are listed without an empty header line
            if !namespace.is_empty() && headers.insert(namespace) {
                lines.push(Line::Group(namespace.to_string()));
            }

            let group = groups
                .entry(namespace.to_string())
                .or_insert_with(|| Group::new(namespace, default_max));

            if key == GROUP_MARKER {
                continue;
            }

            choices.push(Choice {
                key: key.to_string(),
                namespace: namespace.to_string(),
                display_name: display_name(path, key, value)?,
                readonly: group.readonly_keys.contains(key),
                depends_on: group.dependencies.get(key).cloned().unwrap_or_default(),
                preselected: group.preselected.contains(key),
            });
            lines.push(Line::Choice(choices.len() - 1));
        }

        let list = Self {
            choices,
            groups,
            lines,
        };
        list.validate()?;

        debug!(
            "Built {} choices in {} groups over {} lines",
            list.choices.len(),
            list.groups.len(),
            list.lines.len()
        );

        Ok(list)
    }

    fn validate(&self) -> Result<()> {
        for choice in &self.choices {
            for dependency in &choice.depends_on {
                if self.find_by_key(dependency).is_none() {
                    return Err(Error::UnknownDependency(
                        choice.key.clone(),
                        dependency.clone(),
                    ));
                }
            }
        }

        for group in self.groups.values() {
            let members: Vec<&str> = self
                .choices
                .iter()
                .filter(|choice| choice.namespace == group.namespace)
                .map(|choice| choice.key.as_str())
                .collect();

            let listed = group
                .readonly_keys
                .iter()
                .chain(group.preselected.iter())
                .chain(group.dependencies.keys());
            for key in listed {
                if !members.contains(&key.as_str()) {
                    warn!(
                        "Group `{}` lists `{}`, which is not one of its choices",
                        group.namespace, key
                    );
                }
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    #[must_use]
    pub fn choice(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }

    #[must_use]
    pub fn groups(&self) -> &IndexMap<String, Group> {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, namespace: &str) -> Option<&Group> {
        self.groups.get(namespace)
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// First choice carrying `key`, in any namespace.
    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.key == key)
    }

    /// First choice carrying `key` inside `namespace`.
    #[must_use]
    pub fn find_in_namespace(&self, namespace: &str, key: &str) -> Option<&Choice> {
        self.choices
            .iter()
            .find(|choice| choice.namespace == namespace && choice.key == key)
    }
}

fn display_name(path: &str, key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(name) => Ok(name.clone()),
        Value::Number(name) => Ok(name.to_string()),
        Value::Bool(name) => Ok(name.to_string()),
        Value::Null => Ok(key.to_string()),
        Value::Mapping(children) if children.is_empty() => Ok(key.to_string()),
        Value::Sequence(children) if children.is_empty() => Ok(key.to_string()),
        _ => Err(Error::UnsupportedValue(path.to_string())),
    }
}
