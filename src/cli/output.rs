//! Output formatting for CLI

use crate::cli::error::CliError;
use crate::models::{ComparisonOutcome, TypeFieldComparison};

/// Format planned batches, one line per batch or as a JSON array
pub fn format_batches(batches: &[Vec<String>], json: bool) -> Result<String, CliError> {
    if json {
        return Ok(serde_json::to_string_pretty(batches)?);
    }

    let mut output = String::new();
    for (idx, batch) in batches.iter().enumerate() {
        output.push_str(&format!(
            "batch {} ({} items): {}\n",
            idx + 1,
            batch.len(),
            batch.join(",")
        ));
    }
    output.push_str(&format!("{} batch(es)", batches.len()));
    Ok(output)
}

fn outcome_label(outcome: ComparisonOutcome) -> &'static str {
    match outcome {
        ComparisonOutcome::Identical => "==",
        ComparisonOutcome::LeftDifferent => "<>",
        ComparisonOutcome::RightDifferent => "><",
        ComparisonOutcome::LeftOnly => "<=",
        ComparisonOutcome::RightOnly => "=>",
    }
}

/// Format a drift report; identical rows are skipped unless `all`
pub fn format_comparison(
    report: &[TypeFieldComparison],
    all: bool,
    json: bool,
) -> Result<String, CliError> {
    let rows: Vec<&TypeFieldComparison> = report
        .iter()
        .filter(|row| all || row.outcome != ComparisonOutcome::Identical)
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let mut output = String::new();
    for row in rows.iter() {
        let d = &row.definition;
        output.push_str(&format!(
            "{} {:<20} {:<10} {:<30} {:<30} {} {} {}\n",
            outcome_label(row.outcome),
            d.entity_type,
            d.level,
            d.name,
            d.type_shorthand(),
            d.mm_shorthand(),
            d.crus_shorthand(),
            d.sdb_shorthand()
        ));
    }
    let differences = report
        .iter()
        .filter(|row| row.outcome != ComparisonOutcome::Identical)
        .count();
    output.push_str(&format!(
        "{} definition row(s), {} difference(s)",
        report.len(),
        differences
    ));
    Ok(output)
}
