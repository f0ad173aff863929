//! Field model: one named, leveled, typed metadata attribute

use tracing::debug;

use super::enums::{FilterOperator, Level, ValueAction, ValueType};
use super::error::FieldError;
use super::xml::{self, ParseAs};

/// What a field carries besides its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Value-bearing field, used in write payloads and read results
    Metadata { value: String },
    /// Value-less descriptor asking the remote side to return this field
    Requested,
    /// Value plus the comparison to apply when filtering
    Filter {
        value: String,
        operator: FilterOperator,
    },
}

/// A single metadata attribute
///
/// `(name, level, value_type)` is the identity key used by
/// [`IshFields`](super::fields::IshFields) for lookup and merge. The filter
/// operator is not part of the key.
///
/// # Example
///
/// ```rust
/// use ish_metadata_sdk::models::{IshField, Level, ValueType};
///
/// let field = IshField::metadata("FTITLE", Level::Logical, ValueType::Value, Some("Doc1"));
/// assert_eq!(field.to_xml(), r#"<ishfield name="FTITLE" level="logical">Doc1</ishfield>"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IshField {
    name: String,
    level: Level,
    value_type: ValueType,
    kind: FieldKind,
}

impl IshField {
    /// Create a value-bearing field; a `None` value is stored as `""`
    pub fn metadata(
        name: impl Into<String>,
        level: Level,
        value_type: ValueType,
        value: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            value_type,
            kind: FieldKind::Metadata {
                value: value.unwrap_or_default().to_string(),
            },
        }
    }

    /// Create a value-less requested field descriptor
    pub fn requested(name: impl Into<String>, level: Level, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            level,
            value_type,
            kind: FieldKind::Requested,
        }
    }

    /// Create a filter field
    pub fn filter(
        name: impl Into<String>,
        level: Level,
        value_type: ValueType,
        value: Option<&str>,
        operator: FilterOperator,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            value_type,
            kind: FieldKind::Filter {
                value: value.unwrap_or_default().to_string(),
                operator,
            },
        }
    }

    pub(crate) fn from_parts(
        name: String,
        level: Level,
        value_type: ValueType,
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            level,
            value_type,
            kind,
        }
    }

    /// Parse a single `<ishfield>` element
    ///
    /// `ishvaluetype` defaults to `value` when absent. An `ishoperator`
    /// attribute makes the result a filter field, otherwise it is a metadata
    /// field whose value is the element text.
    pub fn from_xml(fragment: &str) -> Result<Self, FieldError> {
        let mut fields = xml::read_fields(fragment, ParseAs::Valued)?;
        match fields.len() {
            1 => Ok(fields.remove(0)),
            0 => Err(FieldError::MalformedField(
                "no <ishfield> element found".to_string(),
            )),
            n => Err(FieldError::MalformedField(format!(
                "expected one <ishfield> element, found {n}"
            ))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// The carried value, `None` for requested descriptors
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Metadata { value } | FieldKind::Filter { value, .. } => Some(value),
            FieldKind::Requested => None,
        }
    }

    /// The filter operator, `None` unless this is a filter field
    pub fn operator(&self) -> Option<FilterOperator> {
        match &self.kind {
            FieldKind::Filter { operator, .. } => Some(*operator),
            _ => None,
        }
    }

    pub fn is_requested(&self) -> bool {
        matches!(self.kind, FieldKind::Requested)
    }

    pub fn is_filter(&self) -> bool {
        matches!(self.kind, FieldKind::Filter { .. })
    }

    /// Identity key used for lookup and merge
    pub fn key(&self) -> (&str, Level, ValueType) {
        (&self.name, self.level, self.value_type)
    }

    /// Whether this field matches `name` and `level` exactly and `value_type`
    /// as a pattern (`ValueType::All` matches every variant)
    pub fn matches(&self, name: &str, level: Level, value_type: ValueType) -> bool {
        self.name == name && self.level == level && value_type.matches(self.value_type)
    }

    /// Whether `other` has the same identity key
    pub fn same_key(&self, other: &IshField) -> bool {
        self.key() == other.key()
    }

    /// Combine `other`'s value into this field
    ///
    /// Only metadata-with-metadata and filter-with-filter joins change
    /// anything; every other pairing is ignored.
    pub fn join(&mut self, other: &IshField, action: ValueAction) {
        match (&mut self.kind, &other.kind) {
            (FieldKind::Metadata { value }, FieldKind::Metadata { value: incoming })
            | (FieldKind::Filter { value, .. }, FieldKind::Filter { value: incoming, .. }) => {
                match action {
                    ValueAction::Append => value.push_str(incoming),
                    ValueAction::Prepend => value.insert_str(0, incoming),
                    ValueAction::Overwrite => value.clone_from(incoming),
                }
            }
            _ => {
                debug!(
                    "Ignoring join of {} into {} at level {}: incompatible field kinds",
                    other.name, self.name, self.level
                );
            }
        }
    }

    /// Value-less copy with the same identity key
    pub fn to_requested_field(&self) -> IshField {
        IshField::requested(self.name.clone(), self.level, self.value_type)
    }

    /// Filter copy carrying the current value
    ///
    /// A field that already is a filter keeps its own operator.
    pub fn to_filter_field(&self, operator: FilterOperator) -> IshField {
        let operator = self.operator().unwrap_or(operator);
        IshField::filter(
            self.name.clone(),
            self.level,
            self.value_type,
            self.value(),
            operator,
        )
    }

    /// Serialize to an `<ishfield>` element
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        xml::write_field(self, &mut out);
        out
    }
}
