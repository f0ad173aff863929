//! `<ishfield>` wire fragment reading and writing

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

use super::enums::{FilterOperator, Level, ValueType};
use super::error::FieldError;
use super::field::{FieldKind, IshField};

pub(crate) const FIELD_ELEMENT: &str = "ishfield";
pub(crate) const FIELDS_ELEMENT: &str = "ishfields";

/// How parsed `<ishfield>` elements are materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseAs {
    /// Filter when `ishoperator` is present, metadata otherwise
    Valued,
    /// Value-less descriptors; body text is ignored
    Requested,
}

/// Attributes and body collected for one open `<ishfield>`
#[derive(Debug, Default)]
struct PendingField {
    name: Option<String>,
    level: Option<String>,
    value_type: Option<String>,
    operator: Option<String>,
    value: String,
}

impl PendingField {
    fn from_start(e: &BytesStart<'_>) -> Result<Self, FieldError> {
        let mut pending = PendingField::default();
        for attr in e.attributes() {
            let attr = attr.map_err(|e| FieldError::Xml(e.to_string()))?;
            let value = attr
                .unescape_value()
                .map_err(|e| FieldError::Xml(e.to_string()))?
                .into_owned();
            match attr.key.as_ref() {
                b"name" => pending.name = Some(value),
                b"level" => pending.level = Some(value),
                b"ishvaluetype" => pending.value_type = Some(value),
                b"ishoperator" => pending.operator = Some(value),
                _ => {}
            }
        }
        Ok(pending)
    }

    fn finish(self, parse_as: ParseAs) -> Result<IshField, FieldError> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(FieldError::MalformedField(
                    "missing 'name' attribute".to_string(),
                ));
            }
        };
        let level = self.level.ok_or_else(|| {
            FieldError::MalformedField(format!("field '{name}' is missing 'level' attribute"))
        })?;
        let level = level
            .parse::<Level>()
            .map_err(|e| FieldError::MalformedField(format!("field '{name}': {e}")))?;
        let value_type = match self.value_type {
            Some(token) => token.parse::<ValueType>().map_err(|e| {
                FieldError::MalformedField(format!("field '{name}': {e}"))
            })?,
            None => ValueType::default(),
        };

        let kind = match (parse_as, self.operator) {
            (ParseAs::Requested, _) => FieldKind::Requested,
            (ParseAs::Valued, Some(token)) => FieldKind::Filter {
                value: self.value,
                operator: token.parse::<FilterOperator>().map_err(|e| {
                    FieldError::MalformedField(format!("field '{name}': {e}"))
                })?,
            },
            (ParseAs::Valued, None) => FieldKind::Metadata { value: self.value },
        };

        Ok(IshField::from_parts(name, level, value_type, kind))
    }
}

fn is_field_element(e: &BytesStart<'_>) -> bool {
    e.local_name().as_ref() == FIELD_ELEMENT.as_bytes()
}

/// Read every `<ishfield>` element of `xml`, in document order
///
/// Any wrapper element is accepted around the fields. The first malformed
/// field aborts the whole read.
pub(crate) fn read_fields(xml: &str, parse_as: ParseAs) -> Result<Vec<IshField>, FieldError> {
    let mut reader = Reader::from_str(xml);
    let mut fields = Vec::new();
    let mut open: Option<PendingField> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if open.is_some() {
                    return Err(FieldError::MalformedField(format!(
                        "unexpected element <{}> inside <{FIELD_ELEMENT}>",
                        String::from_utf8_lossy(e.local_name().as_ref())
                    )));
                }
                if is_field_element(e) {
                    open = Some(PendingField::from_start(e)?);
                }
            }
            Ok(Event::Empty(ref e)) => {
                if open.is_some() {
                    return Err(FieldError::MalformedField(format!(
                        "unexpected element <{}> inside <{FIELD_ELEMENT}>",
                        String::from_utf8_lossy(e.local_name().as_ref())
                    )));
                }
                if is_field_element(e) {
                    fields.push(PendingField::from_start(e)?.finish(parse_as)?);
                }
            }
            Ok(Event::Text(ref t)) => {
                if let Some(pending) = open.as_mut() {
                    let text = t.unescape().map_err(|e| FieldError::Xml(e.to_string()))?;
                    pending.value.push_str(&text);
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(pending) = open.as_mut() {
                    pending
                        .value
                        .push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == FIELD_ELEMENT.as_bytes() {
                    if let Some(pending) = open.take() {
                        fields.push(pending.finish(parse_as)?);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(FieldError::Xml(format!(
                    "parsing error at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    if open.is_some() {
        return Err(FieldError::MalformedField(format!(
            "unterminated <{FIELD_ELEMENT}> element"
        )));
    }

    Ok(fields)
}

/// Append the `<ishfield>` element for `field` to `out`
pub(crate) fn write_field(field: &IshField, out: &mut String) {
    out.push('<');
    out.push_str(FIELD_ELEMENT);
    push_attribute(out, "name", field.name());
    push_attribute(out, "level", field.level().as_str());
    if field.value_type() != ValueType::Value {
        push_attribute(out, "ishvaluetype", field.value_type().as_str());
    }
    if let Some(operator) = field.operator() {
        push_attribute(out, "ishoperator", operator.as_str());
    }

    match field.value() {
        Some(value) if !value.is_empty() => {
            out.push('>');
            out.push_str(&escape(value));
            out.push_str("</");
            out.push_str(FIELD_ELEMENT);
            out.push('>');
        }
        _ => out.push_str("/>"),
    }
}

fn push_attribute(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}
