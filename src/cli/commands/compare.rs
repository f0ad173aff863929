//! Compare and export-schema command implementations

use crate::cli::error::CliError;
use crate::cli::output::format_comparison;
use crate::export::SchemaExporter;
use crate::models::IshTypeFieldSetup;

use super::load_setup;

/// Handle the compare command
///
/// Either side may be omitted to compare against the legacy table.
pub fn handle_compare(
    left: Option<&str>,
    right: Option<&str>,
    all: bool,
    json: bool,
) -> Result<(), CliError> {
    if left.is_none() && right.is_none() {
        return Err(CliError::InvalidArgument(
            "at least one schema file is required".to_string(),
        ));
    }
    let left = load_setup(left)?;
    let right = load_setup(right)?;

    let report = IshTypeFieldSetup::compare(&left, &right);
    println!("{}", format_comparison(&report, all, json)?);
    Ok(())
}

/// Handle the export-schema command
pub fn handle_export_schema(schema: Option<&str>) -> Result<(), CliError> {
    let setup = load_setup(schema)?;
    print!("{}", SchemaExporter::new().export(&setup));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::tests::{SCHEMA, temp_file};

    #[test]
    fn test_compare_needs_a_schema() {
        assert!(matches!(
            handle_compare(None, None, false, false),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_compare_file_against_legacy_table() {
        let schema = temp_file(SCHEMA);
        handle_compare(schema.path().to_str(), None, true, true).unwrap();
        handle_export_schema(schema.path().to_str()).unwrap();
    }
}
