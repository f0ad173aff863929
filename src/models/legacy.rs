//! Static field definitions for servers that cannot serve their schema
//!
//! Covers the common user, document object, output format and baseline
//! fields. Background task records are intentionally absent; they are only
//! partially modeled by the server as well.

use super::enums::{DataType, Level};
use super::type_definition::IshTypeFieldDefinition;

const DOCUMENT_OBJECTS: &[&str] = &[
    "ISHMasterDoc",
    "ISHModule",
    "ISHLibrary",
    "ISHTemplate",
    "ISHIllustration",
];
const USER: &[&str] = &["ISHUser"];
const OUTPUT_FORMAT: &[&str] = &["ISHOutputFormat"];
const BASELINE: &[&str] = &["ISHBaseline"];

/// `(entity types, level, name, data type, CRUS, MM, SDB, reference)`
type LegacyRow = (
    &'static [&'static str],
    Level,
    &'static str,
    DataType,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

#[rustfmt::skip]
const LEGACY_ROWS: &[LegacyRow] = &[
    (USER, Level::None, "USERNAME", DataType::String, "CR-S", "M-", "-DB", ""),
    (USER, Level::None, "FISHUSERDISPLAYNAME", DataType::String, "CRUS", "--", "-DB", ""),
    (USER, Level::None, "FISHEMAIL", DataType::String, "CRUS", "--", "--B", ""),
    (USER, Level::None, "FISHPASSWORD", DataType::String, "C-U-", "--", "S--", ""),
    (USER, Level::None, "FISHUSERTYPE", DataType::IshLov, "CRUS", "--", "--B", "USERTYPE"),
    (USER, Level::None, "FISHUSERROLES", DataType::IshType, "CRUS", "-M", "--B", "ISHUserRole"),
    (USER, Level::None, "FUSERGROUP", DataType::IshType, "CRUS", "-M", "--B", "ISHUserGroup"),
    (USER, Level::None, "FISHUSERDISABLED", DataType::IshLov, "CRUS", "--", "--B", "BOOLEAN"),
    (USER, Level::None, "FISHLOCKED", DataType::IshLov, "-RUS", "--", "S--", "BOOLEAN"),
    (USER, Level::None, "FISHLASTLOGINON", DataType::DateTime, "-R-S", "--", "S--", ""),
    (USER, Level::None, "FISHFAILEDATTEMPTS", DataType::Number, "-R-S", "--", "S--", ""),
    (USER, Level::None, "CREATED-ON", DataType::DateTime, "-R-S", "--", "S--", ""),
    (USER, Level::None, "MODIFIED-ON", DataType::DateTime, "-R-S", "--", "S--", ""),
    (DOCUMENT_OBJECTS, Level::Logical, "FTITLE", DataType::String, "CRUS", "M-", "-DB", ""),
    (DOCUMENT_OBJECTS, Level::Logical, "FDESCRIPTION", DataType::LongText, "CRUS", "--", "--B", ""),
    (DOCUMENT_OBJECTS, Level::Logical, "FUSERGROUP", DataType::IshType, "CRUS", "-M", "--B", "ISHUserGroup"),
    (DOCUMENT_OBJECTS, Level::Logical, "CREATED-ON", DataType::DateTime, "-R-S", "--", "S--", ""),
    (DOCUMENT_OBJECTS, Level::Version, "VERSION", DataType::String, "-R-S", "M-", "-DB", ""),
    (DOCUMENT_OBJECTS, Level::Version, "FBRANCH", DataType::String, "-R-S", "--", "S--", ""),
    (DOCUMENT_OBJECTS, Level::Lng, "DOC-LANGUAGE", DataType::IshLov, "CR-S", "M-", "-DB", "DLANGUAGE"),
    (DOCUMENT_OBJECTS, Level::Lng, "FSTATUS", DataType::IshLov, "CRUS", "M-", "-DB", "DSTATUS"),
    (DOCUMENT_OBJECTS, Level::Lng, "FAUTHOR", DataType::IshType, "CRUS", "M-", "--B", "ISHUser"),
    (DOCUMENT_OBJECTS, Level::Lng, "CHECKED-OUT", DataType::IshLov, "-R-S", "--", "S--", "BOOLEAN"),
    (DOCUMENT_OBJECTS, Level::Lng, "CHECKED-OUT-BY", DataType::IshType, "-R-S", "--", "S--", "ISHUser"),
    (DOCUMENT_OBJECTS, Level::Lng, "ED", DataType::String, "-R--", "--", "S--", ""),
    (DOCUMENT_OBJECTS, Level::Lng, "CREATED-ON", DataType::DateTime, "-R-S", "--", "S--", ""),
    (DOCUMENT_OBJECTS, Level::Lng, "MODIFIED-ON", DataType::DateTime, "-R-S", "--", "S--", ""),
    (OUTPUT_FORMAT, Level::None, "FISHOUTPUTFORMATNAME", DataType::String, "CR-S", "M-", "-DB", ""),
    (OUTPUT_FORMAT, Level::None, "FISHOUTPUTEDT", DataType::IshType, "CRUS", "M-", "--B", "ISHEDT"),
    (OUTPUT_FORMAT, Level::None, "FISHRESOLUTIONS", DataType::IshLov, "CRUS", "-M", "--B", "DRESOLUTION"),
    (OUTPUT_FORMAT, Level::None, "FISHCLEANUP", DataType::IshLov, "CRUS", "--", "--B", "BOOLEAN"),
    (BASELINE, Level::None, "FISHDOCUMENTRELEASE", DataType::String, "CRUS", "M-", "-DB", ""),
    (BASELINE, Level::None, "FISHBASELINEACTIVE", DataType::IshLov, "-RUS", "--", "--B", "BOOLEAN"),
    (BASELINE, Level::None, "CREATED-ON", DataType::DateTime, "-R-S", "--", "S--", ""),
];

/// Expand the legacy table into one definition per entity type
pub fn legacy_definitions() -> Vec<IshTypeFieldDefinition> {
    let mut definitions = Vec::new();
    for (entity_types, level, name, data_type, crus, mm, sdb, reference) in LEGACY_ROWS {
        for entity_type in entity_types.iter() {
            let mut definition = IshTypeFieldDefinition::new(*entity_type, *level, *name)
                .with_data_type(*data_type)
                .with_crus(crus);
            definition.is_mandatory = mm.starts_with('M');
            definition.is_multi_value = mm.ends_with('M');
            definition.is_system = sdb.contains('S');
            definition.is_descriptive = sdb.contains('D');
            definition.is_basic = sdb.contains('B');
            match data_type {
                DataType::IshLov => definition.reference_lov = Some(reference.to_string()),
                DataType::IshType => definition.reference_types = vec![reference.to_string()],
                _ => {}
            }
            definitions.push(definition);
        }
    }
    definitions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_table_round_trips_shorthands() {
        for definition in legacy_definitions() {
            let row = LEGACY_ROWS
                .iter()
                .find(|row| {
                    row.2 == definition.name
                        && row.1 == definition.level
                        && row.0.contains(&definition.entity_type.as_str())
                })
                .unwrap();
            assert_eq!(definition.crus_shorthand(), row.4);
            assert_eq!(definition.mm_shorthand(), row.5);
            assert_eq!(definition.sdb_shorthand(), row.6);
        }
    }

    #[test]
    fn test_password_is_write_only() {
        let password = legacy_definitions()
            .into_iter()
            .find(|d| d.name == "FISHPASSWORD")
            .unwrap();
        assert!(!password.allow_on_read);
        assert!(password.allow_on_create);
        assert!(password.is_system);
    }
}
