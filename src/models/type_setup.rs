//! Per-entity-type schema and the field negotiation built on it
//!
//! [`IshTypeFieldSetup`] turns a caller's sparse field request into a set the
//! remote schema accepts for a given entity type and [`ActionMode`]:
//!
//! - **Requested fields** - caller requests plus session defaults the schema
//!   allows, deduplicated with the caller winning
//! - **Metadata fields** - write payloads with disallowed fields dropped
//! - **Filter fields** - search payloads checked against allow-on-search
//!
//! Fields the schema does not know pass through untouched so newer server
//! schemas keep working. Disallowed fields are dropped without an error; the
//! [`StrictMetadataPreference`] only decides how loudly that is logged, or
//! turns the filtering off.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use super::enums::{
    ActionMode, DataType, FilterOperator, Level, RequestedMetadataGroup, StrictMetadataPreference,
    ValueType,
};
use super::field::IshField;
use super::fields::IshFields;
use super::type_definition::IshTypeFieldDefinition;

type DefinitionKey = (String, Level, String);

/// Outcome of comparing two definition snapshots for one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonOutcome {
    /// Same schema on both sides (description may differ)
    Identical,
    /// Left side of a definition that differs
    LeftDifferent,
    /// Right side of a definition that differs
    RightDifferent,
    LeftOnly,
    RightOnly,
}

/// One row of a schema drift report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeFieldComparison {
    pub outcome: ComparisonOutcome,
    pub definition: IshTypeFieldDefinition,
}

/// How the schema judges one field for one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Allowance {
    Allowed,
    Disallowed,
    /// No definition for the field in any of the entity types
    Undefined,
}

/// Field definitions of every entity type in a session
#[derive(Debug, Clone, Default)]
pub struct IshTypeFieldSetup {
    definitions: BTreeMap<DefinitionKey, IshTypeFieldDefinition>,
    strict_metadata_preference: StrictMetadataPreference,
}

impl IshTypeFieldSetup {
    /// Build a setup from definitions; a repeated key keeps the last one
    pub fn new(definitions: Vec<IshTypeFieldDefinition>) -> Self {
        let mut map = BTreeMap::new();
        for definition in definitions {
            let key = (
                definition.entity_type.clone(),
                definition.level,
                definition.name.clone(),
            );
            if let Some(previous) = map.insert(key, definition) {
                warn!(
                    "Duplicate field definition {} {} on {}, keeping the last one",
                    previous.name, previous.level, previous.entity_type
                );
            }
        }
        Self {
            definitions: map,
            strict_metadata_preference: StrictMetadataPreference::default(),
        }
    }

    pub fn with_strict_metadata_preference(mut self, preference: StrictMetadataPreference) -> Self {
        self.strict_metadata_preference = preference;
        self
    }

    pub fn strict_metadata_preference(&self) -> StrictMetadataPreference {
        self.strict_metadata_preference
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Every definition, ordered by entity type, level, name
    pub fn definitions(&self) -> impl Iterator<Item = &IshTypeFieldDefinition> {
        self.definitions.values()
    }

    pub fn definition(
        &self,
        entity_type: &str,
        level: Level,
        name: &str,
    ) -> Option<&IshTypeFieldDefinition> {
        self.definitions
            .get(&(entity_type.to_string(), level, name.to_string()))
    }

    /// Definitions of one entity type, ordered by level and name
    pub fn definitions_for<'a>(
        &'a self,
        entity_type: &'a str,
    ) -> impl Iterator<Item = &'a IshTypeFieldDefinition> + 'a {
        self.definitions
            .values()
            .filter(move |definition| definition.entity_type == entity_type)
    }

    pub fn has_entity_type(&self, entity_type: &str) -> bool {
        self.definitions_for(entity_type).next().is_some()
    }

    /// Distinct entity types, sorted
    pub fn entity_types(&self) -> Vec<&str> {
        self.definitions
            .values()
            .map(|definition| definition.entity_type.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Requested fields for `mode`: `current` as descriptors, plus every
    /// default the schema allows
    ///
    /// Defaults unknown to a modeled entity type pass through. When none of
    /// `entity_types` has a schema, no defaults are added.
    pub fn to_ish_requested_metadata_fields(
        &self,
        defaults: &IshFields,
        entity_types: &[&str],
        current: &IshFields,
        mode: ActionMode,
    ) -> IshFields {
        let mut requested = current.to_requested_fields(None);
        let modeled = self.modeled_types(entity_types);
        if modeled.is_empty() {
            return requested;
        }

        for field in defaults.iter() {
            if requested.contains_key(field) {
                continue;
            }
            match self.allowance(&modeled, field, mode) {
                Allowance::Allowed | Allowance::Undefined => {
                    requested.add_field(field.to_requested_field());
                }
                Allowance::Disallowed => self.report_dropped(field, &modeled, mode),
            }
        }

        requested
    }

    /// `current` without the fields the schema disallows for `mode`
    ///
    /// Field kinds and order are kept; unknown fields pass through.
    pub fn to_ish_metadata_fields(
        &self,
        entity_types: &[&str],
        current: &IshFields,
        mode: ActionMode,
    ) -> IshFields {
        let modeled = self.modeled_types(entity_types);
        let mut metadata = IshFields::new();
        for field in current.iter() {
            match self.allowance(&modeled, field, mode) {
                Allowance::Allowed | Allowance::Undefined => {
                    metadata.add_field(field.clone());
                }
                Allowance::Disallowed => self.report_dropped(field, &modeled, mode),
            }
        }
        metadata
    }

    /// Filter fields for a search: searchable fields of `current` promoted
    /// with operator `Equal` unless they already carry one
    pub fn to_ish_metadata_filter_fields(
        &self,
        entity_types: &[&str],
        current: &IshFields,
    ) -> IshFields {
        self.to_ish_metadata_fields(entity_types, current, ActionMode::Search)
            .to_filter_fields(FilterOperator::Equal)
    }

    /// Readable fields of `entity_types` selected by `group`
    ///
    /// List-of-values fields are requested both as value and as element.
    pub fn default_requested_fields(
        &self,
        entity_types: &[&str],
        group: RequestedMetadataGroup,
    ) -> IshFields {
        let mut requested = IshFields::new();
        for entity_type in entity_types {
            for definition in self.definitions_for(entity_type) {
                let selected = match group {
                    RequestedMetadataGroup::Descriptive => definition.is_descriptive,
                    RequestedMetadataGroup::Basic => {
                        definition.is_basic || definition.is_descriptive
                    }
                    RequestedMetadataGroup::All => true,
                };
                if !selected || !definition.allow_on_read {
                    continue;
                }
                requested.add_or_update_field(IshField::requested(
                    definition.name.clone(),
                    definition.level,
                    ValueType::Value,
                ));
                if definition.data_type == DataType::IshLov {
                    requested.add_or_update_field(IshField::requested(
                        definition.name.clone(),
                        definition.level,
                        ValueType::Element,
                    ));
                }
            }
        }
        requested
    }

    /// Mandatory, creatable fields of `entity_types` missing from `current`
    pub fn missing_mandatory_fields(
        &self,
        entity_types: &[&str],
        current: &IshFields,
    ) -> IshFields {
        let mut missing = IshFields::new();
        for entity_type in entity_types {
            for definition in self.definitions_for(entity_type) {
                if !definition.is_mandatory || !definition.allow_on_create {
                    continue;
                }
                if !current.contains(&definition.name, definition.level, ValueType::All) {
                    missing.add_or_update_field(IshField::requested(
                        definition.name.clone(),
                        definition.level,
                        ValueType::Value,
                    ));
                }
            }
        }
        missing
    }

    /// Drift report between two snapshots, ordered by key
    ///
    /// Definitions whose schema matches but whose descriptions differ count
    /// as identical. A differing definition yields a `LeftDifferent` row
    /// followed by a `RightDifferent` row.
    pub fn compare(
        left: &IshTypeFieldSetup,
        right: &IshTypeFieldSetup,
    ) -> Vec<TypeFieldComparison> {
        let keys: BTreeSet<&DefinitionKey> =
            left.definitions.keys().chain(right.definitions.keys()).collect();

        let mut report = Vec::with_capacity(keys.len());
        for key in keys {
            match (left.definitions.get(key), right.definitions.get(key)) {
                (Some(l), Some(r)) if l.compare_schema(r).is_eq() => {
                    report.push(TypeFieldComparison {
                        outcome: ComparisonOutcome::Identical,
                        definition: l.clone(),
                    });
                }
                (Some(l), Some(r)) => {
                    report.push(TypeFieldComparison {
                        outcome: ComparisonOutcome::LeftDifferent,
                        definition: l.clone(),
                    });
                    report.push(TypeFieldComparison {
                        outcome: ComparisonOutcome::RightDifferent,
                        definition: r.clone(),
                    });
                }
                (Some(l), None) => report.push(TypeFieldComparison {
                    outcome: ComparisonOutcome::LeftOnly,
                    definition: l.clone(),
                }),
                (None, Some(r)) => report.push(TypeFieldComparison {
                    outcome: ComparisonOutcome::RightOnly,
                    definition: r.clone(),
                }),
                (None, None) => {}
            }
        }
        report
    }

    /// Entity types from `entity_types` that have at least one definition
    fn modeled_types<'a>(&self, entity_types: &[&'a str]) -> Vec<&'a str> {
        let mut modeled = Vec::with_capacity(entity_types.len());
        for entity_type in entity_types {
            if self.has_entity_type(entity_type) {
                modeled.push(*entity_type);
            } else {
                warn!(
                    "UnknownEntityTypeSchema: no field definitions loaded for {}",
                    entity_type
                );
            }
        }
        modeled
    }

    fn allowance(&self, entity_types: &[&str], field: &IshField, mode: ActionMode) -> Allowance {
        if self.strict_metadata_preference == StrictMetadataPreference::Off {
            return Allowance::Allowed;
        }
        let mut defined = false;
        for entity_type in entity_types {
            if let Some(definition) = self.definition(entity_type, field.level(), field.name()) {
                if definition.allows(mode) {
                    return Allowance::Allowed;
                }
                defined = true;
            }
        }
        if defined {
            Allowance::Disallowed
        } else {
            Allowance::Undefined
        }
    }

    fn report_dropped(&self, field: &IshField, entity_types: &[&str], mode: ActionMode) {
        match self.strict_metadata_preference {
            StrictMetadataPreference::SilentlyContinue => debug!(
                "Dropping field {} {} for {} on {}: not allowed by the schema",
                field.name(),
                field.level(),
                mode,
                entity_types.join(",")
            ),
            StrictMetadataPreference::Continue => warn!(
                "Dropping field {} {} for {} on {}: not allowed by the schema",
                field.name(),
                field.level(),
                mode,
                entity_types.join(",")
            ),
            StrictMetadataPreference::Off => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> IshTypeFieldSetup {
        IshTypeFieldSetup::new(vec![
            IshTypeFieldDefinition::new("ISHMasterDoc", Level::Logical, "FTITLE")
                .with_crus("CR-S")
                .mandatory()
                .descriptive(),
            IshTypeFieldDefinition::new("ISHMasterDoc", Level::Lng, "FSTATUS")
                .with_reference_lov("DSTATUS")
                .with_crus("CRUS")
                .basic(),
            IshTypeFieldDefinition::new("ISHMasterDoc", Level::Lng, "CREATED-ON")
                .with_data_type(DataType::DateTime)
                .with_crus("-R-S")
                .system(),
        ])
    }

    fn metadata(name: &str, level: Level, value: &str) -> IshField {
        IshField::metadata(name, level, ValueType::Value, Some(value))
    }

    #[test]
    fn test_metadata_drops_disallowed() {
        let mut current = IshFields::new();
        current
            .add_field(metadata("FTITLE", Level::Logical, "Doc1"))
            .add_field(metadata("CREATED-ON", Level::Lng, "01/01/2020"))
            .add_field(metadata("FNOTINSCHEMA", Level::Lng, "kept"));

        let created =
            setup().to_ish_metadata_fields(&["ISHMasterDoc"], &current, ActionMode::Create);
        let names: Vec<&str> = created.iter().map(IshField::name).collect();
        assert_eq!(names, vec!["FTITLE", "FNOTINSCHEMA"]);
    }

    #[test]
    fn test_strict_off_keeps_everything() {
        let mut current = IshFields::new();
        current.add_field(metadata("CREATED-ON", Level::Lng, "01/01/2020"));

        let setup = setup().with_strict_metadata_preference(StrictMetadataPreference::Off);
        let updated = setup.to_ish_metadata_fields(&["ISHMasterDoc"], &current, ActionMode::Update);
        assert_eq!(updated, current);
    }

    #[test]
    fn test_requested_current_wins_over_defaults() {
        let mut current = IshFields::new();
        current.add_field(metadata("FTITLE", Level::Logical, "ignored value"));

        let mut defaults = IshFields::new();
        defaults
            .add_field(IshField::requested("FTITLE", Level::Logical, ValueType::Value))
            .add_field(IshField::requested("FSTATUS", Level::Lng, ValueType::Element));

        let requested = setup().to_ish_requested_metadata_fields(
            &defaults,
            &["ISHMasterDoc"],
            &current,
            ActionMode::Read,
        );
        assert_eq!(requested.len(), 2);
        assert!(requested.iter().all(IshField::is_requested));
        assert_eq!(requested.fields()[0].name(), "FTITLE");
        assert_eq!(requested.fields()[1].value_type(), ValueType::Element);
    }

    #[test]
    fn test_requested_unknown_entity_type_adds_no_defaults() {
        let mut defaults = IshFields::new();
        defaults.add_field(IshField::requested("FTITLE", Level::Logical, ValueType::Value));

        let requested = setup().to_ish_requested_metadata_fields(
            &defaults,
            &["ISHBackgroundTask"],
            &IshFields::new(),
            ActionMode::Read,
        );
        assert!(requested.is_empty());
    }

    #[test]
    fn test_default_requested_fields_groups() {
        let setup = setup();
        let descriptive = setup.default_requested_fields(
            &["ISHMasterDoc"],
            RequestedMetadataGroup::Descriptive,
        );
        assert_eq!(descriptive.len(), 1);

        let basic =
            setup.default_requested_fields(&["ISHMasterDoc"], RequestedMetadataGroup::Basic);
        assert!(basic.contains("FSTATUS", Level::Lng, ValueType::Element));
        assert!(basic.contains("FSTATUS", Level::Lng, ValueType::Value));
        assert!(!basic.contains("CREATED-ON", Level::Lng, ValueType::All));

        let all = setup.default_requested_fields(&["ISHMasterDoc"], RequestedMetadataGroup::All);
        assert!(all.contains("CREATED-ON", Level::Lng, ValueType::Value));
    }

    #[test]
    fn test_missing_mandatory_fields() {
        let setup = setup();
        let missing = setup.missing_mandatory_fields(&["ISHMasterDoc"], &IshFields::new());
        assert_eq!(missing.len(), 1);
        assert_eq!(missing.fields()[0].name(), "FTITLE");

        let mut current = IshFields::new();
        current.add_field(metadata("FTITLE", Level::Logical, "Doc1"));
        assert!(setup.missing_mandatory_fields(&["ISHMasterDoc"], &current).is_empty());
    }
}
