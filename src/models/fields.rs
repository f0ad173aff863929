//! Ordered, identity-keyed field collection

use super::enums::{FilterOperator, Level, ValueAction, ValueType};
use super::error::FieldError;
use super::field::IshField;
use super::xml::{self, FIELDS_ELEMENT, ParseAs};

/// Ordered container of [`IshField`]s
///
/// Insertion order is preserved so XML output is stable. `add_or_update_field`
/// keeps at most one field per `(name, level, value_type)` key, while
/// `add_field` appends unconditionally (filter lists legitimately repeat a
/// key with different operators).
///
/// Not synchronized; one owner mutates it at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IshFields {
    fields: Vec<IshField>,
}

impl IshFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse value-bearing fields from an `<ishfields>` fragment
    pub fn from_xml(xml: &str) -> Result<Self, FieldError> {
        Ok(Self {
            fields: xml::read_fields(xml, ParseAs::Valued)?,
        })
    }

    /// Parse a requested-field list; element text is ignored
    pub fn requested_from_xml(xml: &str) -> Result<Self, FieldError> {
        Ok(Self {
            fields: xml::read_fields(xml, ParseAs::Requested)?,
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IshField> {
        self.fields.iter()
    }

    pub fn fields(&self) -> &[IshField] {
        &self.fields
    }

    /// Append without deduplication
    pub fn add_field(&mut self, field: IshField) -> &mut Self {
        self.fields.push(field);
        self
    }

    /// Replace the field with the same identity key in place, or append
    pub fn add_or_update_field(&mut self, field: IshField) -> &mut Self {
        match self.position(&field) {
            Some(index) => self.fields[index] = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Join into the field with the same identity key, or append
    pub fn join_field(&mut self, field: IshField, action: ValueAction) -> &mut Self {
        match self.position(&field) {
            Some(index) => self.fields[index].join(&field, action),
            None => self.fields.push(field),
        }
        self
    }

    /// `add_or_update_field` for every field of `other`, in order
    pub fn merge(&mut self, other: &IshFields) -> &mut Self {
        for field in other.iter() {
            self.add_or_update_field(field.clone());
        }
        self
    }

    /// Remove every field matching `name` and `level` whose value type matches
    /// `value_type` (`ValueType::All` ignores the value type)
    ///
    /// Returns how many fields were removed; zero is not an error.
    pub fn remove_field(&mut self, name: &str, level: Level, value_type: ValueType) -> usize {
        let before = self.fields.len();
        self.fields
            .retain(|field| !field.matches(name, level, value_type));
        before - self.fields.len()
    }

    /// All fields matching the key, in collection order
    pub fn retrieve(&self, name: &str, level: Level, value_type: ValueType) -> Vec<&IshField> {
        self.fields
            .iter()
            .filter(|field| field.matches(name, level, value_type))
            .collect()
    }

    /// First field matching the key
    ///
    /// Callers that probe optional fields should check `contains` first or
    /// use [`get_field_value`](Self::get_field_value).
    pub fn retrieve_first(
        &self,
        name: &str,
        level: Level,
        value_type: ValueType,
    ) -> Result<&IshField, FieldError> {
        self.fields
            .iter()
            .find(|field| field.matches(name, level, value_type))
            .ok_or_else(|| FieldError::FieldNotFound {
                name: name.to_string(),
                level,
                value_type,
            })
    }

    /// Fields at `level`, in collection order
    pub fn retrieve_by_level(&self, level: Level) -> Vec<&IshField> {
        self.fields
            .iter()
            .filter(|field| field.level() == level)
            .collect()
    }

    pub fn contains(&self, name: &str, level: Level, value_type: ValueType) -> bool {
        self.fields
            .iter()
            .any(|field| field.matches(name, level, value_type))
    }

    /// Whether a field with exactly `field`'s identity key is present
    pub fn contains_key(&self, field: &IshField) -> bool {
        self.position(field).is_some()
    }

    /// Value of the first matching field, or `""` when absent or value-less
    pub fn get_field_value(&self, name: &str, level: Level, value_type: ValueType) -> String {
        self.fields
            .iter()
            .find(|field| field.matches(name, level, value_type))
            .and_then(|field| field.value())
            .unwrap_or_default()
            .to_string()
    }

    /// Value-less descriptors of every field, optionally restricted to `level`
    ///
    /// Duplicate identity keys collapse to their first occurrence; `All` is
    /// its own key here, not a wildcard.
    pub fn to_requested_fields(&self, level: Option<Level>) -> IshFields {
        let mut requested = IshFields::new();
        for field in self.fields.iter() {
            if level.is_some_and(|level| field.level() != level) {
                continue;
            }
            if !requested.contains_key(field) {
                requested.add_field(field.to_requested_field());
            }
        }
        requested
    }

    /// Filter copies of every field; existing filters keep their operator
    pub fn to_filter_fields(&self, operator: FilterOperator) -> IshFields {
        IshFields {
            fields: self
                .fields
                .iter()
                .map(|field| field.to_filter_field(operator))
                .collect(),
        }
    }

    /// Serialize to `<ishfields>...</ishfields>` in insertion order
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(FIELDS_ELEMENT);
        if self.fields.is_empty() {
            out.push_str("/>");
            return out;
        }
        out.push('>');
        for field in self.fields.iter() {
            xml::write_field(field, &mut out);
        }
        out.push_str("</");
        out.push_str(FIELDS_ELEMENT);
        out.push('>');
        out
    }

    fn position(&self, field: &IshField) -> Option<usize> {
        self.fields.iter().position(|existing| existing.same_key(field))
    }
}

impl From<Vec<IshField>> for IshFields {
    fn from(fields: Vec<IshField>) -> Self {
        Self { fields }
    }
}

impl FromIterator<IshField> for IshFields {
    fn from_iter<I: IntoIterator<Item = IshField>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for IshFields {
    type Item = IshField;
    type IntoIter = std::vec::IntoIter<IshField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a IshFields {
    type Item = &'a IshField;
    type IntoIter = std::slice::Iter<'a, IshField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
