//! Schema description of one field for one entity type

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::enums::{ActionMode, DataType, Level};

/// Field definition as served by the remote schema
///
/// Keyed by `(entity_type, level, name)`. Loaded once per session and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IshTypeFieldDefinition {
    /// Entity type this definition belongs to (e.g. "ISHUser", "ISHMasterDoc")
    pub entity_type: String,
    pub level: Level,
    pub name: String,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub is_multi_value: bool,
    #[serde(default)]
    pub allow_on_read: bool,
    #[serde(default)]
    pub allow_on_create: bool,
    #[serde(default)]
    pub allow_on_update: bool,
    #[serde(default)]
    pub allow_on_search: bool,
    /// Maintained by the server (audit, ownership, computed identifiers)
    #[serde(default)]
    pub is_system: bool,
    #[serde(default)]
    pub is_basic: bool,
    #[serde(default)]
    pub is_descriptive: bool,
    /// List of values an `ishlov` field draws from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_lov: Option<String>,
    /// Entity types an `ishtype` field may point to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_types: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl IshTypeFieldDefinition {
    /// Create a definition with every flag off and data type `string`
    pub fn new(entity_type: impl Into<String>, level: Level, name: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            level,
            name: name.into(),
            data_type: DataType::String,
            is_mandatory: false,
            is_multi_value: false,
            allow_on_read: false,
            allow_on_create: false,
            allow_on_update: false,
            allow_on_search: false,
            is_system: false,
            is_basic: false,
            is_descriptive: false,
            reference_lov: None,
            reference_types: Vec::new(),
            description: String::new(),
        }
    }

    /// Set the four allow flags from a `CRUS` pattern, e.g. `"-RU-"`
    pub fn with_crus(mut self, crus: &str) -> Self {
        let flags: Vec<char> = crus.chars().collect();
        let on = |index: usize, flag: char| flags.get(index) == Some(&flag);
        self.allow_on_create = on(0, 'C');
        self.allow_on_read = on(1, 'R');
        self.allow_on_update = on(2, 'U');
        self.allow_on_search = on(3, 'S');
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.is_mandatory = true;
        self
    }

    pub fn multi_value(mut self) -> Self {
        self.is_multi_value = true;
        self
    }

    pub fn system(mut self) -> Self {
        self.is_system = true;
        self
    }

    pub fn basic(mut self) -> Self {
        self.is_basic = true;
        self
    }

    pub fn descriptive(mut self) -> Self {
        self.is_descriptive = true;
        self
    }

    pub fn with_reference_lov(mut self, lov: impl Into<String>) -> Self {
        self.data_type = DataType::IshLov;
        self.reference_lov = Some(lov.into());
        self
    }

    pub fn with_reference_types(mut self, types: &[&str]) -> Self {
        self.data_type = DataType::IshType;
        self.reference_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether the field may be used for `mode`
    ///
    /// `Find` requests fields for reading, `Search` filters on them.
    pub fn allows(&self, mode: ActionMode) -> bool {
        match mode {
            ActionMode::Read | ActionMode::Find => self.allow_on_read,
            ActionMode::Create => self.allow_on_create,
            ActionMode::Update => self.allow_on_update,
            ActionMode::Search => self.allow_on_search,
        }
    }

    /// Data type plus its reference target, e.g. `ishlov[DSTATUS]`
    pub fn type_shorthand(&self) -> String {
        match self.data_type {
            DataType::IshLov => format!(
                "{}[{}]",
                self.data_type,
                self.reference_lov.as_deref().unwrap_or_default()
            ),
            DataType::IshType => format!("{}[{}]", self.data_type, self.reference_types.join(",")),
            _ => self.data_type.to_string(),
        }
    }

    /// Mandatory and multi-value flags, e.g. `M-`
    pub fn mm_shorthand(&self) -> String {
        [(self.is_mandatory, 'M'), (self.is_multi_value, 'M')]
            .iter()
            .map(|(on, flag)| if *on { *flag } else { '-' })
            .collect()
    }

    /// Create/read/update/search flags, e.g. `CRU-`
    pub fn crus_shorthand(&self) -> String {
        [
            (self.allow_on_create, 'C'),
            (self.allow_on_read, 'R'),
            (self.allow_on_update, 'U'),
            (self.allow_on_search, 'S'),
        ]
        .iter()
        .map(|(on, flag)| if *on { *flag } else { '-' })
        .collect()
    }

    /// System/descriptive/basic flags, e.g. `S-B`
    pub fn sdb_shorthand(&self) -> String {
        [
            (self.is_system, 'S'),
            (self.is_descriptive, 'D'),
            (self.is_basic, 'B'),
        ]
        .iter()
        .map(|(on, flag)| if *on { *flag } else { '-' })
        .collect()
    }

    /// Ordering across the shorthands, then the description
    pub fn compare_to(&self, other: &IshTypeFieldDefinition) -> Ordering {
        self.compare_schema(other)
            .then_with(|| self.description.cmp(&other.description))
    }

    /// Same as [`compare_to`](Self::compare_to) without the description;
    /// `Equal` means no breaking difference
    pub fn compare_schema(&self, other: &IshTypeFieldDefinition) -> Ordering {
        self.type_shorthand()
            .cmp(&other.type_shorthand())
            .then_with(|| self.mm_shorthand().cmp(&other.mm_shorthand()))
            .then_with(|| self.crus_shorthand().cmp(&other.crus_shorthand()))
            .then_with(|| self.sdb_shorthand().cmp(&other.sdb_shorthand()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthands() {
        let definition = IshTypeFieldDefinition::new("ISHMasterDoc", Level::Lng, "FSTATUS")
            .with_reference_lov("DSTATUS")
            .with_crus("CRUS")
            .mandatory()
            .basic();

        assert_eq!(definition.type_shorthand(), "ishlov[DSTATUS]");
        assert_eq!(definition.mm_shorthand(), "M-");
        assert_eq!(definition.crus_shorthand(), "CRUS");
        assert_eq!(definition.sdb_shorthand(), "--B");
    }

    #[test]
    fn test_with_crus_partial() {
        let definition =
            IshTypeFieldDefinition::new("ISHUser", Level::None, "FISHPASSWORD").with_crus("C-U-");
        assert!(definition.allows(ActionMode::Create));
        assert!(!definition.allows(ActionMode::Read));
        assert!(!definition.allows(ActionMode::Find));
        assert!(definition.allows(ActionMode::Update));
        assert!(!definition.allows(ActionMode::Search));
    }

    #[test]
    fn test_description_only_difference() {
        let left = IshTypeFieldDefinition::new("ISHUser", Level::None, "FISHEMAIL")
            .with_crus("CRUS")
            .with_description("E-mail");
        let right = left.clone().with_description("Mail address");

        assert_eq!(left.compare_schema(&right), Ordering::Equal);
        assert_ne!(left.compare_to(&right), Ordering::Equal);
    }

    #[test]
    fn test_flag_difference_orders() {
        let left =
            IshTypeFieldDefinition::new("ISHUser", Level::None, "FISHEMAIL").with_crus("CRUS");
        let right = left.clone().with_crus("-RUS");
        assert_ne!(left.compare_schema(&right), Ordering::Equal);
        assert_eq!(left.compare_to(&right), right.compare_to(&left).reverse());
    }
}
