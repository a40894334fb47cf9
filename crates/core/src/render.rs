use crate::choices::{Choice, Line};
use crate::error::Result;
use crate::session::Session;
use crate::templates::{TemplateKind, Templates};

/// How a redrawn line relates to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Plain rendering, used for the initial full draw
    None,
    /// The cursor is on this line
    Cursor,
    /// The cursor is leaving this line
    Clear,
}

/// Formats single lines of the choice list from the configured templates.
#[derive(Debug, Clone, Default)]
pub struct LineRenderer {
    templates: Templates,
}

impl LineRenderer {
    #[must_use]
    pub fn new(templates: Templates) -> Self {
        Self { templates }
    }

    pub fn group(&self, namespace: &str) -> Result<String> {
        self.templates.render(TemplateKind::Group, namespace)
    }

    pub fn choice(&self, choice: &Choice, selected: bool) -> Result<String> {
        let kind = if selected {
            TemplateKind::On
        } else {
            TemplateKind::Off
        };
        self.templates.render(kind, &choice.display_name)
    }

    pub fn error(&self, message: &str) -> Result<String> {
        self.templates.render(TemplateKind::Error, message)
    }

    /// Renders line `index` of the session with its live selection state.
    ///
    /// Returns an empty string for an index past the end of the list.
    pub fn line(&self, session: &Session, index: usize, highlight: Highlight) -> Result<String> {
        let text = match session.list().line(index) {
            Some(Line::Group(namespace)) => self.group(namespace)?,
            Some(Line::Choice(choice_index)) => match session.list().choice(*choice_index) {
                Some(choice) => self.choice(choice, session.is_selected(choice))?,
                None => String::new(),
            },
            None => String::new(),
        };

        match highlight {
            Highlight::None => Ok(text),
            Highlight::Cursor => self.templates.render(TemplateKind::Cursor, &text),
            Highlight::Clear => self.templates.render(TemplateKind::Clear, &text),
        }
    }

    /// Renders every line of the session without highlighting.
    pub fn all_lines(&self, session: &Session) -> Result<Vec<String>> {
        (0..session.line_count())
            .map(|index| self.line(session, index, Highlight::None))
            .collect()
    }
}
