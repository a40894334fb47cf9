//! Interactive session state: cursor position and the selection set.
//!
//! The session holds no terminal state. It answers what the current line is,
//! whether the cursor can move, and what a toggle on the current line does.
//! Drawing is left to the caller.

use log::{debug, info};
use serde_yaml::Mapping;

use crate::choices::{Choice, ChoiceList, Line};
use crate::config::{DependencyScope, SessionConfig};
use crate::constraints::{can_deselect, can_select, Violation};
use crate::error::Result;
use crate::selection::SelectionSet;

/// Outcome of toggling the current line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    /// The current line is a group header, or there are no lines
    Ignored,
    Selected,
    Deselected,
    /// Refused; the selection set is unchanged
    Rejected(Violation),
}

#[derive(Debug, Clone)]
pub struct Session {
    list: ChoiceList,
    selections: SelectionSet,
    cursor: usize,
}

impl Session {
    /// Starts a session over `list`, with preselected choices already
    /// selected and the cursor on the last line.
    #[must_use]
    pub fn new(list: ChoiceList, scope: DependencyScope) -> Self {
        let mut selections = SelectionSet::with_scope(scope);
        for choice in list.choices().iter().filter(|choice| choice.preselected) {
            selections.insert(&choice.key, &choice.namespace);
        }

        let cursor = list.line_count().saturating_sub(1);

        Self {
            list,
            selections,
            cursor,
        }
    }

    /// Builds the choice list from a nested definition and starts a session.
    ///
    /// # Errors
    ///
    /// Returns any configuration error from [`ChoiceList::from_config`].
    pub fn from_config(config: &Mapping, settings: &SessionConfig) -> Result<Self> {
        let list = ChoiceList::from_config(config, settings)?;
        Ok(Self::new(list, settings.dependency_scope))
    }

    #[must_use]
    pub fn list(&self) -> &ChoiceList {
        &self.list
    }

    #[must_use]
    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.list.line_count()
    }

    #[must_use]
    pub fn last_line(&self) -> usize {
        self.line_count().saturating_sub(1)
    }

    #[must_use]
    pub fn current_line(&self) -> Option<&Line> {
        self.list.line(self.cursor)
    }

    #[must_use]
    pub fn current_choice(&self) -> Option<&Choice> {
        match self.current_line()? {
            Line::Group(_) => None,
            Line::Choice(index) => self.list.choice(*index),
        }
    }

    #[must_use]
    pub fn is_selected(&self, choice: &Choice) -> bool {
        self.selections.contains(&choice.key, &choice.namespace)
    }

    #[must_use]
    pub fn can_go_up(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_go_down(&self) -> bool {
        self.cursor < self.last_line()
    }

    /// Moves the cursor one line up. Returns `false` at the first line.
    pub fn move_up(&mut self) -> bool {
        if !self.can_go_up() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Moves the cursor one line down. Returns `false` at the last line.
    pub fn move_down(&mut self) -> bool {
        if !self.can_go_down() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Toggles the choice under the cursor, subject to its constraints.
    pub fn toggle(&mut self) -> Toggle {
        let Some(choice) = self.current_choice() else {
            return Toggle::Ignored;
        };

        if self.is_selected(choice) {
            if let Err(violation) = can_deselect(choice, &self.list, &self.selections) {
                debug!("Refused to deselect `{}`: {violation}", choice.key);
                return Toggle::Rejected(violation);
            }

            let (key, namespace) = (choice.key.clone(), choice.namespace.clone());
            debug!("Deselected `{key}` in `{namespace}`");
            self.selections.remove(&key, &namespace);
            Toggle::Deselected
        } else {
            if let Err(violation) = can_select(choice, &self.list, &self.selections) {
                debug!("Refused to select `{}`: {violation}", choice.key);
                return Toggle::Rejected(violation);
            }

            let (key, namespace) = (choice.key.clone(), choice.namespace.clone());
            debug!("Selected `{key}` in `{namespace}`");
            self.selections.insert(&key, &namespace);
            Toggle::Selected
        }
    }

    /// Selected keys in the order they were added.
    #[must_use]
    pub fn selected_keys(&self) -> Vec<String> {
        let keys: Vec<String> = self.selections.keys().map(str::to_string).collect();
        info!("Selected {} choice(s)", keys.len());
        keys
    }
}
