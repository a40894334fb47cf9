//! Validation of toggle requests.
//!
//! Both checks are pure functions of the choice list and the current
//! selection set and are evaluated on every toggle attempt.

use thiserror::Error;

use crate::choices::{Choice, ChoiceList};
use crate::config::DependencyScope;
use crate::selection::SelectionSet;

/// Reason a toggle was refused. The `Display` text is shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("Option cannot be changed")]
    ReadOnly,

    #[error("First remove child dependencies: {}", .0.join(", "))]
    OrphanedDependents(Vec<String>),

    #[error("Max selections allowed is: {}", .0)]
    MaxSelections(usize),

    #[error("Depends on: {}", .0.join(", "))]
    MissingDependencies(Vec<String>),
}

/// Checks whether `choice` may be removed from the selection.
///
/// Fails if another selected choice depends on it. With
/// [`DependencyScope::Global`] dependents are matched by key across the
/// whole list; with [`DependencyScope::Namespace`] only the choice's own
/// namespace is searched.
///
/// # Errors
///
/// Returns the [`Violation`] describing why the choice must stay selected.
pub fn can_deselect(
    choice: &Choice,
    list: &ChoiceList,
    selections: &SelectionSet,
) -> Result<(), Violation> {
    if choice.readonly {
        return Err(Violation::ReadOnly);
    }

    let dependents: Vec<String> = list
        .choices()
        .iter()
        .filter(|other| other.depends_on.contains(&choice.key))
        .filter(|other| match selections.scope() {
            DependencyScope::Global => true,
            DependencyScope::Namespace => other.namespace == choice.namespace,
        })
        .filter(|other| selections.contains(&other.key, &other.namespace))
        .map(|other| other.display_name.clone())
        .collect();

    if dependents.is_empty() {
        Ok(())
    } else {
        Err(Violation::OrphanedDependents(dependents))
    }
}

/// Checks whether `choice` may be added to the selection.
///
/// Capacity of the choice's group is checked first, then its dependencies.
///
/// # Errors
///
/// Returns the [`Violation`] describing why the choice cannot be selected.
pub fn can_select(
    choice: &Choice,
    list: &ChoiceList,
    selections: &SelectionSet,
) -> Result<(), Violation> {
    if choice.readonly {
        return Err(Violation::ReadOnly);
    }

    let max_selections = list
        .group(&choice.namespace)
        .and_then(|group| group.max_selections);
    if let Some(max_selections) = max_selections {
        if selections.count_in(&choice.namespace) >= max_selections {
            return Err(Violation::MaxSelections(max_selections));
        }
    }

    let missing: Vec<String> = choice
        .depends_on
        .iter()
        .filter(|dependency| !selections.contains(dependency, &choice.namespace))
        .map(|dependency| dependency_name(dependency, choice, list, selections.scope()))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Violation::MissingDependencies(missing))
    }
}

fn dependency_name(
    dependency: &str,
    choice: &Choice,
    list: &ChoiceList,
    scope: DependencyScope,
) -> String {
    let found = match scope {
        DependencyScope::Global => list.find_by_key(dependency),
        DependencyScope::Namespace => list
            .find_in_namespace(&choice.namespace, dependency)
            .or_else(|| list.find_by_key(dependency)),
    };

    found.map_or_else(
        || dependency.to_string(),
        |dependency| dependency.display_name.clone(),
    )
}
