//! ishfields - field metadata helper for Content Management API clients

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ish_metadata_sdk::ActionMode;
use ish_metadata_sdk::cli::CliError;
use ish_metadata_sdk::cli::commands;

#[derive(Parser)]
#[command(name = "ishfields", version, about = "Field metadata negotiation and batch planning")]
struct Cli {
    /// Session configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split identifiers into batches
    Chunk {
        /// Batch size (defaults to the configured metadata batch size)
        #[arg(long)]
        size: Option<usize>,
        /// File with one identifier per line ('-' for stdin)
        #[arg(long)]
        input: Option<String>,
        #[arg(long)]
        json: bool,
        ids: Vec<String>,
    },
    /// Print the requested fields for an entity type
    Requested {
        /// Schema file (defaults to the legacy field table)
        #[arg(long)]
        schema: Option<String>,
        #[arg(long = "type", required = true)]
        entity_types: Vec<String>,
        #[arg(long, default_value = "read")]
        mode: ActionMode,
        /// Explicitly requested fields (<ishfields> XML, '-' for stdin)
        #[arg(long)]
        fields: Option<String>,
    },
    /// Print a write payload with disallowed fields removed
    Metadata {
        #[arg(long)]
        schema: Option<String>,
        #[arg(long = "type", required = true)]
        entity_types: Vec<String>,
        #[arg(long)]
        mode: ActionMode,
        /// Metadata fields (<ishfields> XML, '-' for stdin)
        #[arg(long)]
        fields: String,
    },
    /// Print search filter fields
    Filter {
        #[arg(long)]
        schema: Option<String>,
        #[arg(long = "type", required = true)]
        entity_types: Vec<String>,
        #[arg(long)]
        fields: String,
    },
    /// Compare two schema snapshots (RIGHT defaults to the legacy table)
    Compare {
        left: String,
        right: Option<String>,
        /// Include identical definitions
        #[arg(long)]
        all: bool,
        #[arg(long)]
        json: bool,
    },
    /// Print a schema snapshot (defaults to the legacy table)
    ExportSchema {
        #[arg(long)]
        schema: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Chunk {
            size,
            input,
            json,
            ids,
        } => commands::chunk::handle_chunk(config, size, &ids, input.as_deref(), json),
        Commands::Requested {
            schema,
            entity_types,
            mode,
            fields,
        } => commands::fields::handle_requested(
            config,
            schema.as_deref(),
            &entity_types,
            mode,
            fields.as_deref(),
        ),
        Commands::Metadata {
            schema,
            entity_types,
            mode,
            fields,
        } => commands::fields::handle_metadata(
            config,
            schema.as_deref(),
            &entity_types,
            mode,
            &fields,
        ),
        Commands::Filter {
            schema,
            entity_types,
            fields,
        } => commands::fields::handle_filter(config, schema.as_deref(), &entity_types, &fields),
        Commands::Compare {
            left,
            right,
            all,
            json,
        } => commands::compare::handle_compare(Some(&left), right.as_deref(), all, json),
        Commands::ExportSchema { schema } => {
            commands::compare::handle_export_schema(schema.as_deref())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli).map_err(|err| anyhow::anyhow!(err.user_message()))
}
