//! Export functionality
//!
//! Provides exporters for cached schema snapshots:
//! - Type field setup

pub mod schema;

pub use schema::SchemaExporter;
