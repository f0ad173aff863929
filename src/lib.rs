//! ISH Metadata SDK - field metadata model for Content Management API clients
//!
//! Provides unified interfaces for:
//! - Fields and field collections (metadata, requested, filter) and their XML form
//! - Per-entity-type field definitions and schema drift detection
//! - Requested/metadata/filter field negotiation per action mode
//! - Batch planning for bulk remote calls
//! - Session context and configuration

pub mod batch;
#[cfg(feature = "cli")]
pub mod cli;
pub mod export;
pub mod import;
pub mod models;
pub mod session;

// Re-export commonly used types
pub use batch::{BatchError, BatchPlanner, chunk};
pub use export::SchemaExporter;
pub use import::{SchemaError, SchemaImporter};
pub use session::{ConfigError, IshSession, SessionConfig};

// Re-export models
pub use models::enums::*;
pub use models::{
    ComparisonOutcome, FieldError, FieldKind, IshField, IshFields, IshTypeFieldDefinition,
    IshTypeFieldSetup, TypeFieldComparison, legacy_definitions,
};
