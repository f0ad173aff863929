//! Type field setup importer
//!
//! Loads the per-entity-type field definitions served by the remote schema:
//!
//! ```xml
//! <ishtypefieldsetup>
//!   <ishtypedefinition name="ISHUser">
//!     <ishfielddefinition name="FUSERGROUP" level="none" datatype="ishtype"
//!         ismultivalue="true" allowonread="true" allowoncreate="true">
//!       <description>User groups</description>
//!       <referencetype>ISHUserGroup</referencetype>
//!     </ishfielddefinition>
//!   </ishtypedefinition>
//! </ishtypefieldsetup>
//! ```

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::models::{DataType, FieldError, IshTypeFieldDefinition, IshTypeFieldSetup, Level};

/// Errors that can occur while loading field definitions
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A definition is missing required attributes or carries bad values
    #[error("Malformed field definition: {0}")]
    MalformedDefinition(String),

    /// Enumeration token error
    #[error(transparent)]
    Field(#[from] FieldError),

    /// XML reader error
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            SchemaError::MalformedDefinition(msg) => format!(
                "Malformed field definition: {msg}\n\nHint: <ishfielddefinition> needs 'name' and 'level' inside an <ishtypedefinition name=\"...\">."
            ),
            SchemaError::Field(err) => err.user_message(),
            _ => self.to_string(),
        }
    }
}

/// Child element whose text is being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    Description,
    ReferenceType,
}

/// Type field setup importer
#[derive(Debug, Default)]
pub struct SchemaImporter;

impl SchemaImporter {
    pub fn new() -> Self {
        Self
    }

    /// Parse schema XML into a [`IshTypeFieldSetup`]
    pub fn import(&self, xml_content: &str) -> Result<IshTypeFieldSetup, SchemaError> {
        let definitions = self.parse_definitions(xml_content)?;
        info!("Loaded {} field definitions", definitions.len());
        Ok(IshTypeFieldSetup::new(definitions))
    }

    /// Read and parse a schema file
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<IshTypeFieldSetup, SchemaError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let setup = self.import(&content)?;
        info!("Loaded field setup from {}", path.as_ref().display());
        Ok(setup)
    }

    /// Parse every `<ishfielddefinition>` in document order
    pub fn parse_definitions(
        &self,
        xml_content: &str,
    ) -> Result<Vec<IshTypeFieldDefinition>, SchemaError> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);

        let mut definitions = Vec::new();
        let mut entity_type: Option<String> = None;
        let mut open: Option<IshTypeFieldDefinition> = None;
        let mut text_target: Option<TextTarget> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"ishtypedefinition" => entity_type = Some(type_name(e)?),
                    b"ishfielddefinition" => {
                        open = Some(definition_from(e, entity_type.as_deref())?);
                    }
                    b"description" if open.is_some() => text_target = Some(TextTarget::Description),
                    b"referencetype" if open.is_some() => {
                        text_target = Some(TextTarget::ReferenceType)
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"ishtypedefinition" => entity_type = Some(type_name(e)?),
                    b"ishfielddefinition" => {
                        definitions.push(definition_from(e, entity_type.as_deref())?);
                    }
                    _ => {}
                },
                Ok(Event::Text(ref t)) => {
                    if let (Some(definition), Some(target)) = (open.as_mut(), text_target) {
                        let text = t
                            .unescape()
                            .map_err(|e| SchemaError::Xml(e.to_string()))?
                            .into_owned();
                        match target {
                            TextTarget::Description => definition.description = text,
                            TextTarget::ReferenceType => definition.reference_types.push(text),
                        }
                    }
                }
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"ishtypedefinition" => entity_type = None,
                    b"ishfielddefinition" => {
                        if let Some(definition) = open.take() {
                            definitions.push(definition);
                        }
                    }
                    b"description" | b"referencetype" => text_target = None,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(SchemaError::Xml(format!(
                        "parsing error at position {}: {}",
                        reader.error_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(definitions)
    }
}

fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, SchemaError> {
    let mut pairs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| SchemaError::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| SchemaError::Xml(e.to_string()))?
            .into_owned();
        pairs.push((key, value));
    }
    Ok(pairs)
}

fn type_name(e: &BytesStart<'_>) -> Result<String, SchemaError> {
    attributes(e)?
        .into_iter()
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            SchemaError::MalformedDefinition("<ishtypedefinition> without 'name'".to_string())
        })
}

fn parse_flag(name: &str, key: &str, value: &str) -> Result<bool, SchemaError> {
    match value.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(SchemaError::MalformedDefinition(format!(
            "field '{name}': attribute {key}=\"{value}\" is not a boolean"
        ))),
    }
}

fn definition_from(
    e: &BytesStart<'_>,
    entity_type: Option<&str>,
) -> Result<IshTypeFieldDefinition, SchemaError> {
    let attrs = attributes(e)?;
    let get = |key: &str| {
        attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    let name = get("name").filter(|n| !n.is_empty()).ok_or_else(|| {
        SchemaError::MalformedDefinition("<ishfielddefinition> without 'name'".to_string())
    })?;
    let entity_type = entity_type.ok_or_else(|| {
        SchemaError::MalformedDefinition(format!(
            "field '{name}' is not inside an <ishtypedefinition>"
        ))
    })?;
    let level = get("level")
        .ok_or_else(|| {
            SchemaError::MalformedDefinition(format!("field '{name}' is missing 'level'"))
        })?
        .parse::<Level>()?;

    let mut definition = IshTypeFieldDefinition::new(entity_type, level, name);
    if let Some(data_type) = get("datatype") {
        definition.data_type = data_type.parse::<DataType>()?;
    }

    for (key, value) in attrs.iter() {
        let flag = match key.as_str() {
            "ismandatory" => &mut definition.is_mandatory,
            "ismultivalue" => &mut definition.is_multi_value,
            "allowonread" => &mut definition.allow_on_read,
            "allowoncreate" => &mut definition.allow_on_create,
            "allowonupdate" => &mut definition.allow_on_update,
            "allowonsearch" => &mut definition.allow_on_search,
            "issystem" => &mut definition.is_system,
            "isbasic" => &mut definition.is_basic,
            "isdescriptive" => &mut definition.is_descriptive,
            _ => continue,
        };
        *flag = parse_flag(name, key, value)?;
    }

    if let Some(lov) = get("referencelov").filter(|lov| !lov.is_empty()) {
        definition.reference_lov = Some(lov.to_string());
    }

    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActionMode;

    const SCHEMA: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ishtypefieldsetup>
  <ishtypedefinition name="ISHUser">
    <ishfielddefinition name="FISHPASSWORD" level="none" allowoncreate="true"
        allowonupdate="true" issystem="true">
      <description>Password</description>
    </ishfielddefinition>
    <ishfielddefinition name="FUSERGROUP" level="none" datatype="ishtype"
        ismultivalue="true" allowonread="true" allowoncreate="true"
        allowonupdate="true" allowonsearch="true" isbasic="true">
      <referencetype>ISHUserGroup</referencetype>
      <referencetype>ISHUserRole</referencetype>
    </ishfielddefinition>
  </ishtypedefinition>
  <ishtypedefinition name="ISHMasterDoc">
    <ishfielddefinition name="FSTATUS" level="lng" datatype="ishlov"
        referencelov="DSTATUS" allowonread="true"/>
  </ishtypedefinition>
</ishtypefieldsetup>"#;

    #[test]
    fn test_parse_definitions() {
        let definitions = SchemaImporter::new().parse_definitions(SCHEMA).unwrap();
        assert_eq!(definitions.len(), 3);

        let password = &definitions[0];
        assert_eq!(password.entity_type, "ISHUser");
        assert_eq!(password.description, "Password");
        assert_eq!(password.data_type, DataType::String);
        assert!(!password.allows(ActionMode::Read));
        assert!(password.allows(ActionMode::Create));
        assert!(password.is_system);

        let group = &definitions[1];
        assert_eq!(group.reference_types, vec!["ISHUserGroup", "ISHUserRole"]);
        assert_eq!(group.type_shorthand(), "ishtype[ISHUserGroup,ISHUserRole]");

        let status = &definitions[2];
        assert_eq!(status.entity_type, "ISHMasterDoc");
        assert_eq!(status.level, Level::Lng);
        assert_eq!(status.reference_lov.as_deref(), Some("DSTATUS"));
    }

    #[test]
    fn test_unknown_level_fails() {
        let xml = r#"<ishtypefieldsetup><ishtypedefinition name="ISHUser">
            <ishfielddefinition name="X" level="shelf"/></ishtypedefinition></ishtypefieldsetup>"#;
        let err = SchemaImporter::new().parse_definitions(xml).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Field(FieldError::UnknownEnumValue { kind: "level", .. })
        ));
    }

    #[test]
    fn test_bad_boolean_fails() {
        let xml = r#"<ishtypefieldsetup><ishtypedefinition name="ISHUser">
            <ishfielddefinition name="X" level="none" allowonread="maybe"/>
            </ishtypedefinition></ishtypefieldsetup>"#;
        let err = SchemaImporter::new().parse_definitions(xml).unwrap_err();
        assert!(matches!(err, SchemaError::MalformedDefinition(_)));
    }

    #[test]
    fn test_field_outside_type_fails() {
        let xml = r#"<ishtypefieldsetup>
            <ishfielddefinition name="X" level="none"/>
            </ishtypefieldsetup>"#;
        assert!(SchemaImporter::new().parse_definitions(xml).is_err());
    }
}
