//! Field negotiation commands: requested, metadata, filter

use std::path::Path;
use tracing::warn;

use crate::cli::error::CliError;
use crate::models::{ActionMode, IshFields};

use super::{load_input, load_session};

/// Handle the requested command
pub fn handle_requested(
    config: Option<&Path>,
    schema: Option<&str>,
    entity_types: &[String],
    mode: ActionMode,
    fields: Option<&str>,
) -> Result<(), CliError> {
    let session = load_session(config, schema)?;
    let current = match fields {
        Some(input) => IshFields::requested_from_xml(&load_input(input)?)?,
        None => IshFields::new(),
    };
    let types: Vec<&str> = entity_types.iter().map(String::as_str).collect();

    let requested = session.requested_metadata_fields(&types, &current, mode);
    println!("{}", requested.to_xml());
    Ok(())
}

/// Handle the metadata command
pub fn handle_metadata(
    config: Option<&Path>,
    schema: Option<&str>,
    entity_types: &[String],
    mode: ActionMode,
    fields: &str,
) -> Result<(), CliError> {
    let session = load_session(config, schema)?;
    let current = IshFields::from_xml(&load_input(fields)?)?;
    let types: Vec<&str> = entity_types.iter().map(String::as_str).collect();

    let metadata = session.metadata_fields(&types, &current, mode);
    if mode == ActionMode::Create {
        let missing = session
            .type_field_setup()
            .missing_mandatory_fields(&types, &metadata);
        for field in missing.iter() {
            warn!(
                "Mandatory field {} {} is missing for create",
                field.name(),
                field.level()
            );
        }
    }
    println!("{}", metadata.to_xml());
    Ok(())
}

/// Handle the filter command
pub fn handle_filter(
    config: Option<&Path>,
    schema: Option<&str>,
    entity_types: &[String],
    fields: &str,
) -> Result<(), CliError> {
    let session = load_session(config, schema)?;
    let current = IshFields::from_xml(&load_input(fields)?)?;
    let types: Vec<&str> = entity_types.iter().map(String::as_str).collect();

    println!("{}", session.filter_fields(&types, &current).to_xml());
    Ok(())
}
