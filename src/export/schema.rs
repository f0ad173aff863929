//! Type field setup exporter
//!
//! Writes a setup in the same XML shape [`SchemaImporter`] reads, so a
//! snapshot can be cached client-side and compared with the live schema later.
//!
//! [`SchemaImporter`]: crate::import::SchemaImporter

use quick_xml::escape::escape;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::models::{IshTypeFieldDefinition, IshTypeFieldSetup};

/// Type field setup exporter
#[derive(Debug, Default)]
pub struct SchemaExporter;

impl SchemaExporter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize every definition, grouped per entity type
    pub fn export(&self, setup: &IshTypeFieldSetup) -> String {
        let mut out = String::from("<ishtypefieldsetup>\n");
        let mut current_type: Option<&str> = None;

        for definition in setup.definitions() {
            if current_type != Some(definition.entity_type.as_str()) {
                if current_type.is_some() {
                    out.push_str("  </ishtypedefinition>\n");
                }
                let _ = writeln!(
                    out,
                    "  <ishtypedefinition name=\"{}\">",
                    escape(definition.entity_type.as_str())
                );
                current_type = Some(definition.entity_type.as_str());
            }
            write_definition(definition, &mut out);
        }

        if current_type.is_some() {
            out.push_str("  </ishtypedefinition>\n");
        }
        out.push_str("</ishtypefieldsetup>\n");
        out
    }

    /// Export to a file
    pub fn export_file(
        &self,
        setup: &IshTypeFieldSetup,
        path: impl AsRef<Path>,
    ) -> std::io::Result<()> {
        std::fs::write(path.as_ref(), self.export(setup))?;
        info!(
            "Saved {} field definitions to {}",
            setup.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}

fn write_definition(definition: &IshTypeFieldDefinition, out: &mut String) {
    let _ = write!(
        out,
        "    <ishfielddefinition name=\"{}\" level=\"{}\" datatype=\"{}\"",
        escape(definition.name.as_str()),
        definition.level,
        definition.data_type
    );

    let flags = [
        ("ismandatory", definition.is_mandatory),
        ("ismultivalue", definition.is_multi_value),
        ("allowonread", definition.allow_on_read),
        ("allowoncreate", definition.allow_on_create),
        ("allowonupdate", definition.allow_on_update),
        ("allowonsearch", definition.allow_on_search),
        ("issystem", definition.is_system),
        ("isbasic", definition.is_basic),
        ("isdescriptive", definition.is_descriptive),
    ];
    for (key, on) in flags {
        let _ = write!(out, " {key}=\"{on}\"");
    }
    if let Some(lov) = &definition.reference_lov {
        let _ = write!(out, " referencelov=\"{}\"", escape(lov.as_str()));
    }

    if definition.description.is_empty() && definition.reference_types.is_empty() {
        out.push_str("/>\n");
        return;
    }

    out.push_str(">\n");
    if !definition.description.is_empty() {
        let _ = writeln!(
            out,
            "      <description>{}</description>",
            escape(definition.description.as_str())
        );
    }
    for reference in definition.reference_types.iter() {
        let _ = writeln!(
            out,
            "      <referencetype>{}</referencetype>",
            escape(reference.as_str())
        );
    }
    out.push_str("    </ishfielddefinition>\n");
}
