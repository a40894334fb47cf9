//! Line templates used when drawing the choice list.
//!
//! Every kind of line has a template. A template is either a `leon` format
//! string using the single `{text}` placeholder, or a formatting function.
//! Templates are validated when they are set, so rendering never sees an
//! unknown kind or placeholder.

use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use log::debug;

use crate::error::{Error, Result};

/// The only placeholder a format template may reference
pub const TEXT_PLACEHOLDER: &str = "text";

/// Kind of line a template renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Namespace header line
    Group,
    /// Selected choice
    On,
    /// Unselected choice
    Off,
    /// Transient validation message
    Error,
    /// Wraps the line the cursor arrives on
    Cursor,
    /// Wraps the line the cursor leaves
    Clear,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 6] = [
        TemplateKind::Group,
        TemplateKind::On,
        TemplateKind::Off,
        TemplateKind::Error,
        TemplateKind::Cursor,
        TemplateKind::Clear,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::Group => "group",
            TemplateKind::On => "on",
            TemplateKind::Off => "off",
            TemplateKind::Error => "error",
            TemplateKind::Cursor => "cursor",
            TemplateKind::Clear => "clear",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn default_template(self) -> Template {
        let source = match self {
            TemplateKind::On => " [x] {text}",
            TemplateKind::Off => " [ ] {text}",
            TemplateKind::Group
            | TemplateKind::Error
            | TemplateKind::Cursor
            | TemplateKind::Clear => "{text}",
        };
        Template(Source::Format(source.to_string()))
    }
}

impl Display for TemplateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        TemplateKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| Error::UnknownTemplateKind(name.to_string()))
    }
}

/// A single line template.
///
/// Format templates can only be built through [`Template::format`], so every
/// template reaching a renderer has been validated.
#[derive(Clone)]
pub struct Template(Source);

#[derive(Clone)]
enum Source {
    /// `leon` format string, e.g. ` [x] {text}`
    Format(String),
    /// User supplied formatting function
    Function(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl Template {
    /// Creates a format template, validating its syntax and placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the string is not a valid template, or
    /// [`Error::UnknownPlaceholder`] if it references anything but `{text}`.
    pub fn format(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let unknown = leon::Template::parse(&source)?
            .keys()
            .map(|key| key.to_string())
            .find(|key| key != TEXT_PLACEHOLDER);

        match unknown {
            Some(key) => Err(Error::UnknownPlaceholder(source, key)),
            None => Ok(Self(Source::Format(source))),
        }
    }

    pub fn function(formatter: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Source::Function(Arc::new(formatter)))
    }

    /// The format string, or `None` for a function template.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        match &self.0 {
            Source::Format(source) => Some(source.as_str()),
            Source::Function(_) => None,
        }
    }

    /// Renders the template with `text` as its payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the format string fails to render.
    pub fn render(&self, text: &str) -> Result<String> {
        match &self.0 {
            Source::Format(source) => {
                let template = leon::Template::parse(source)?;
                let mut values: HashMap<String, String> = HashMap::new();
                values.insert(TEXT_PLACEHOLDER.to_string(), text.to_string());
                Ok(template.render(&values)?)
            }
            Source::Function(formatter) => Ok(formatter(text)),
        }
    }
}

impl Debug for Template {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Source::Format(source) => f.debug_tuple("Format").field(source).finish(),
            Source::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// The full set of templates, one per [`TemplateKind`].
#[derive(Debug, Clone)]
pub struct Templates {
    templates: [Template; 6],
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            templates: TemplateKind::ALL.map(TemplateKind::default_template),
        }
    }
}

impl Templates {
    /// Builds templates from `kind -> format` overrides on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTemplateKind`] for a kind that does not exist,
    /// or the validation error of an invalid format string.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_choices_core::templates::{TemplateKind, Templates};
    ///
    /// let templates = Templates::from_overrides([("on", " (*) {text}")]).unwrap();
    /// assert_eq!(templates.render(TemplateKind::On, "PHP").unwrap(), " (*) PHP");
    ///
    /// assert!(Templates::from_overrides([("bold", "{text}")]).is_err());
    /// ```
    pub fn from_overrides<I, K, V>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut templates = Self::default();
        for (kind, source) in overrides {
            let kind: TemplateKind = kind.as_ref().parse()?;
            let source = source.into();
            debug!("Overriding `{kind}` template with `{source}`");
            templates.set(kind, Template::format(source)?);
        }

        Ok(templates)
    }

    #[must_use]
    pub fn with(mut self, kind: TemplateKind, template: Template) -> Self {
        self.set(kind, template);
        self
    }

    pub fn set(&mut self, kind: TemplateKind, template: Template) {
        self.templates[kind.index()] = template;
    }

    #[must_use]
    pub fn get(&self, kind: TemplateKind) -> &Template {
        &self.templates[kind.index()]
    }

    /// Renders `text` with the template for `kind`.
    ///
    /// # Errors
    ///
    /// See [`Template::render`].
    pub fn render(&self, kind: TemplateKind, text: &str) -> Result<String> {
        self.get(kind).render(text)
    }
}
