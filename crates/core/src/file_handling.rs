//! Reading choice definition files.

use std::fs::File;

use log::debug;
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

/// Reads a nested choice definition from a YAML file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file contains invalid YAML
/// - The YAML root is not a mapping, or the mapping is empty
pub fn get_choice_definitions(path: &str) -> Result<Mapping> {
    let reader = get_reader("choice definition", path)?;

    // An empty document parses as `Null`
    let parsed: serde_yaml::Result<Value> = serde_yaml::from_reader(reader);
    let parsed = parsed.map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "choice definition".to_string(),
            path.to_string(),
            e,
        )
    })?;

    let definitions = match parsed {
        Value::Null => return Err(Error::empty_choice_definition(path.to_string())),
        Value::Mapping(definitions) => definitions,
        _ => {
            return Err(Error::NotAMapping {
                path: path.to_string(),
            })
        }
    };

    if definitions.is_empty() {
        return Err(Error::empty_choice_definition(path.to_string()));
    }

    debug!("Read {} top-level choice entries from `{path}`", definitions.len());

    Ok(definitions)
}
