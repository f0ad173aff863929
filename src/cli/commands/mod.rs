//! CLI command implementations

pub mod chunk;
pub mod compare;
pub mod fields;

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::error::CliError;
use crate::import::SchemaImporter;
use crate::models::{IshTypeFieldSetup, legacy_definitions};
use crate::session::{IshSession, SessionConfig};

/// Load input content from file or stdin
pub(crate) fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Load a schema file, or the legacy table when no file is given
pub(crate) fn load_setup(schema: Option<&str>) -> Result<IshTypeFieldSetup, CliError> {
    match schema {
        Some(input) => Ok(SchemaImporter::new().import(&load_input(input)?)?),
        None => Ok(IshTypeFieldSetup::new(legacy_definitions())),
    }
}

/// Build the session from an optional config file and schema
pub(crate) fn load_session(
    config: Option<&Path>,
    schema: Option<&str>,
) -> Result<IshSession, CliError> {
    let config = match config {
        Some(path) => SessionConfig::from_file(path)?,
        None => SessionConfig::default(),
    };
    Ok(IshSession::new(config, load_setup(schema)?)?)
}
