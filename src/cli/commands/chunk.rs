//! Chunk command implementation

use std::path::Path;

use crate::batch::BatchPlanner;
use crate::cli::error::CliError;
use crate::cli::output::format_batches;
use crate::session::SessionConfig;

use super::load_input;

/// Handle the chunk command
///
/// Identifiers come from the arguments, or one per line from `input`. The
/// batch size defaults to the configured metadata batch size.
pub fn handle_chunk(
    config: Option<&Path>,
    size: Option<usize>,
    ids: &[String],
    input: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    let size = match size {
        Some(size) => size,
        None => match config {
            Some(path) => SessionConfig::from_file(path)?.metadata_batch_size,
            None => SessionConfig::default().metadata_batch_size,
        },
    };
    let planner = BatchPlanner::new(size)?;

    let mut items: Vec<String> = ids.to_vec();
    if let Some(input) = input {
        items.extend(
            load_input(input)?
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    let batches = planner.plan(&items);
    println!("{}", format_batches(&batches, json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::tests::temp_file;

    #[test]
    fn test_chunk_rejects_zero_size() {
        let ids = vec!["a".to_string()];
        assert!(matches!(
            handle_chunk(None, Some(0), &ids, None, false),
            Err(CliError::Batch(_))
        ));
    }

    #[test]
    fn test_chunk_reads_input_file() {
        let input = temp_file("GUID-1\n\nGUID-2\nGUID-3\n");
        handle_chunk(None, Some(2), &[], input.path().to_str(), true).unwrap();
    }
}
