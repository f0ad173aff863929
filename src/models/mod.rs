//! Models module for the SDK
//!
//! Defines the field metadata model shared by every entity operation:
//! single fields, field collections, and the per-entity-type schema used to
//! validate and synthesize them.

pub mod enums;
pub mod error;
pub mod field;
pub mod fields;
pub mod legacy;
pub mod type_definition;
pub mod type_setup;
mod xml;

pub use enums::*;
pub use error::FieldError;
pub use field::{FieldKind, IshField};
pub use fields::IshFields;
pub use legacy::legacy_definitions;
pub use type_definition::IshTypeFieldDefinition;
pub use type_setup::{ComparisonOutcome, IshTypeFieldSetup, TypeFieldComparison};
