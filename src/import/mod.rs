//! Import functionality
//!
//! Provides parsers for the schema documents served by the remote side:
//! - Type field setup (per-entity-type field definitions)

pub mod schema;

pub use schema::{SchemaError, SchemaImporter};
