use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("No choices were found in the choice definition YAML. Is `{}` empty?", .path)]
    EmptyChoiceDefinition { path: String },

    #[error("The choice definition YAML at `{}` must be a mapping at its root.", .path)]
    NotAMapping { path: String },

    #[error("Unsupported key under `{}`: keys must be strings, numbers or booleans", .0)]
    UnsupportedKey(String),

    #[error("Unsupported value at `{}`: choice labels must be strings, numbers or booleans", .0)]
    UnsupportedValue(String),

    #[error("Group metadata for namespace `{}` must be a mapping", .0)]
    GroupNotAMapping(String),

    #[error("Malformed group metadata for namespace `{}`: {}", .namespace, .original)]
    MalformedGroup {
        namespace: String,
        original: serde_yaml::Error,
    },

    #[error("Choice `{}` depends on `{}`, which is not a known choice", .0, .1)]
    UnknownDependency(String, String),

    #[error("Unknown template kind: \"{}\"", .0)]
    UnknownTemplateKind(String),

    #[error("Template override `{}` must be in the format kind=template", .0)]
    MalformedTemplateOverride(String),

    #[error("Template `{}` may only use the {{text}} placeholder, found `{}`", .0, .1)]
    UnknownPlaceholder(String, String),

    #[error("Error parsing template string: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering template string: {}", .0)]
    Render(#[from] RenderError),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn empty_choice_definition(path: String) -> Self {
        Self::EmptyChoiceDefinition { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
