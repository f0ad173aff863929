//! Enumerations shared by fields and type definitions
//!
//! Every enumeration that travels on the wire has a closed token table:
//! `as_str` gives the lower-case token and `FromStr` maps it back, failing
//! with [`FieldError::UnknownEnumValue`] on anything outside the table.

use serde::{Deserialize, Serialize};

use super::error::FieldError;

/// Structural granularity a field applies at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Card-less objects such as users, output formats, baselines
    None,
    /// Logical object (document object as a whole)
    Logical,
    /// Version of a logical object
    Version,
    /// Language card of a version
    Lng,
    Annotation,
    Reply,
    /// Detail record of a background task or event
    Detail,
    /// Progress record of an event
    Progress,
    /// Background task
    Task,
    /// Background task history entry
    History,
    /// Data blob attached to an event or task
    Data,
}

impl Level {
    pub const ALL: [Level; 11] = [
        Level::None,
        Level::Logical,
        Level::Version,
        Level::Lng,
        Level::Annotation,
        Level::Reply,
        Level::Detail,
        Level::Progress,
        Level::Task,
        Level::History,
        Level::Data,
    ];

    /// Wire token for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::None => "none",
            Level::Logical => "logical",
            Level::Version => "version",
            Level::Lng => "lng",
            Level::Annotation => "annotation",
            Level::Reply => "reply",
            Level::Detail => "detail",
            Level::Progress => "progress",
            Level::Task => "task",
            Level::History => "history",
            Level::Data => "data",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Level::None),
            "logical" => Ok(Level::Logical),
            "version" => Ok(Level::Version),
            "lng" => Ok(Level::Lng),
            "annotation" => Ok(Level::Annotation),
            "reply" => Ok(Level::Reply),
            "detail" => Ok(Level::Detail),
            "progress" => Ok(Level::Progress),
            "task" => Ok(Level::Task),
            "history" => Ok(Level::History),
            "data" => Ok(Level::Data),
            _ => Err(FieldError::unknown("level", s)),
        }
    }
}

/// How a field value is represented on the wire
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Display value (default, omitted on the wire)
    #[default]
    Value,
    /// Coded element name, e.g. a list-of-values element
    Element,
    /// Database identifier
    Id,
    /// Pattern value matching every other variant
    All,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Value => "value",
            ValueType::Element => "element",
            ValueType::Id => "id",
            ValueType::All => "all",
        }
    }

    /// Whether `other` is matched by this value type used as a pattern
    pub fn matches(&self, other: ValueType) -> bool {
        *self == ValueType::All || *self == other
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ValueType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "value" => Ok(ValueType::Value),
            "element" => Ok(ValueType::Element),
            "id" => Ok(ValueType::Id),
            "all" => Ok(ValueType::All),
            _ => Err(FieldError::unknown("valuetype", s)),
        }
    }
}

/// Comparison applied by a filter field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    #[default]
    Equal,
    NotEqual,
    In,
    NotIn,
    Like,
    NotLike,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Empty,
    NotEmpty,
    Between,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equal => "equal",
            FilterOperator::NotEqual => "notequal",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "notin",
            FilterOperator::Like => "like",
            FilterOperator::NotLike => "notlike",
            FilterOperator::GreaterThan => "greaterthan",
            FilterOperator::LessThan => "lessthan",
            FilterOperator::GreaterThanOrEqual => "greaterthanorequal",
            FilterOperator::LessThanOrEqual => "lessthanorequal",
            FilterOperator::Empty => "empty",
            FilterOperator::NotEmpty => "notempty",
            FilterOperator::Between => "between",
        }
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FilterOperator {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equal" => Ok(FilterOperator::Equal),
            "notequal" => Ok(FilterOperator::NotEqual),
            "in" => Ok(FilterOperator::In),
            "notin" => Ok(FilterOperator::NotIn),
            "like" => Ok(FilterOperator::Like),
            "notlike" => Ok(FilterOperator::NotLike),
            "greaterthan" => Ok(FilterOperator::GreaterThan),
            "lessthan" => Ok(FilterOperator::LessThan),
            "greaterthanorequal" => Ok(FilterOperator::GreaterThanOrEqual),
            "lessthanorequal" => Ok(FilterOperator::LessThanOrEqual),
            "empty" => Ok(FilterOperator::Empty),
            "notempty" => Ok(FilterOperator::NotEmpty),
            "between" => Ok(FilterOperator::Between),
            _ => Err(FieldError::unknown("operator", s)),
        }
    }
}

/// How a joined value combines with the existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueAction {
    /// `existing + incoming`
    Append,
    /// `incoming + existing`
    Prepend,
    /// `incoming`
    Overwrite,
}

/// Operation context used to decide which fields are legal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionMode {
    Read,
    Create,
    Update,
    /// Retrieval by filter; requested fields follow read rules
    Find,
    /// Filtering itself; fields follow search rules
    Search,
}

impl std::fmt::Display for ActionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionMode::Read => write!(f, "read"),
            ActionMode::Create => write!(f, "create"),
            ActionMode::Update => write!(f, "update"),
            ActionMode::Find => write!(f, "find"),
            ActionMode::Search => write!(f, "search"),
        }
    }
}

impl std::str::FromStr for ActionMode {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "read" => Ok(ActionMode::Read),
            "create" => Ok(ActionMode::Create),
            "update" => Ok(ActionMode::Update),
            "find" => Ok(ActionMode::Find),
            "search" => Ok(ActionMode::Search),
            _ => Err(FieldError::unknown("action mode", s)),
        }
    }
}

/// Data type of a field definition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    LongText,
    Number,
    DateTime,
    /// Reference to a list of values
    IshLov,
    /// Reference to one or more entity types
    IshType,
    /// Value provided by an external metadata binding
    IshMetadataBinding,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::LongText => "longtext",
            DataType::Number => "number",
            DataType::DateTime => "datetime",
            DataType::IshLov => "ishlov",
            DataType::IshType => "ishtype",
            DataType::IshMetadataBinding => "ishmetadatabinding",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DataType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(DataType::String),
            "longtext" => Ok(DataType::LongText),
            "number" => Ok(DataType::Number),
            "datetime" => Ok(DataType::DateTime),
            "ishlov" => Ok(DataType::IshLov),
            "ishtype" => Ok(DataType::IshType),
            "ishmetadatabinding" => Ok(DataType::IshMetadataBinding),
            _ => Err(FieldError::unknown("datatype", s)),
        }
    }
}

/// Session-level group used to synthesize default requested fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestedMetadataGroup {
    /// Only fields flagged descriptive
    Descriptive,
    /// Basic and descriptive fields
    #[default]
    Basic,
    /// Every readable field
    All,
}

impl std::str::FromStr for RequestedMetadataGroup {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "descriptive" => Ok(RequestedMetadataGroup::Descriptive),
            "basic" => Ok(RequestedMetadataGroup::Basic),
            "all" => Ok(RequestedMetadataGroup::All),
            _ => Err(FieldError::unknown("requested metadata group", s)),
        }
    }
}

/// What to do with fields the schema disallows for the current action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrictMetadataPreference {
    /// Drop, diagnostic at debug level
    SilentlyContinue,
    /// Drop, diagnostic at warn level
    #[default]
    Continue,
    /// Keep everything; no allow-flag filtering
    Off,
}

impl std::str::FromStr for StrictMetadataPreference {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silentlycontinue" => Ok(StrictMetadataPreference::SilentlyContinue),
            "continue" => Ok(StrictMetadataPreference::Continue),
            "off" => Ok(StrictMetadataPreference::Off),
            _ => Err(FieldError::unknown("strict metadata preference", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_tokens() {
        for level in Level::ALL {
            assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
        }
        assert_eq!("LOGICAL".parse::<Level>().unwrap(), Level::Logical);
    }

    #[test]
    fn test_unknown_level_token() {
        assert_eq!(
            "object".parse::<Level>(),
            Err(FieldError::UnknownEnumValue {
                kind: "level",
                value: "object".to_string()
            })
        );
    }

    #[test]
    fn test_value_type_pattern() {
        assert!(ValueType::All.matches(ValueType::Element));
        assert!(ValueType::Id.matches(ValueType::Id));
        assert!(!ValueType::Value.matches(ValueType::Id));
        assert_eq!(ValueType::default(), ValueType::Value);
    }

    #[test]
    fn test_operator_tokens() {
        assert_eq!(
            "greaterthanorequal".parse::<FilterOperator>().unwrap(),
            FilterOperator::GreaterThanOrEqual
        );
        assert!("approximately".parse::<FilterOperator>().is_err());
    }

    #[test]
    fn test_strict_preference_from_str() {
        assert_eq!(
            "SilentlyContinue".parse::<StrictMetadataPreference>().unwrap(),
            StrictMetadataPreference::SilentlyContinue
        );
        assert_eq!(
            StrictMetadataPreference::default(),
            StrictMetadataPreference::Continue
        );
    }
}
