//! Error types for field metadata operations

use thiserror::Error;

use super::enums::{Level, ValueType};

/// Errors that can occur while building, parsing or querying fields
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// An `<ishfield>` fragment is missing a required attribute or is otherwise unusable
    #[error("Malformed field: {0}")]
    MalformedField(String),

    /// A wire token does not belong to the closed set of an enumeration
    #[error("Unknown {kind} value '{value}'")]
    UnknownEnumValue { kind: &'static str, value: String },

    /// `retrieve_first` found nothing for the identity key
    #[error("Field not found: name={name} level={level} valuetype={value_type}")]
    FieldNotFound {
        name: String,
        level: Level,
        value_type: ValueType,
    },

    /// XML reader error
    #[error("XML error: {0}")]
    Xml(String),
}

impl FieldError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        FieldError::UnknownEnumValue {
            kind,
            value: value.to_string(),
        }
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            FieldError::MalformedField(msg) => format!(
                "Malformed field: {msg}\n\nHint: every <ishfield> needs 'name' and 'level' attributes."
            ),
            FieldError::UnknownEnumValue { kind, value } => format!(
                "Unknown {kind} value '{value}'.\n\nHint: wire tokens are lower-case, e.g. level=\"logical\"."
            ),
            FieldError::FieldNotFound { name, level, .. } => format!(
                "Field {name} at level {level} is not present.\n\nHint: check the collection before calling retrieve_first."
            ),
            FieldError::Xml(_) => self.to_string(),
        }
    }
}
