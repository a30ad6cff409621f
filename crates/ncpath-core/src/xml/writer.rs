use crate::errors::{NcError, Result};
use crate::model::{Mapping, Node};
use quick_xml::escape::escape;

pub const ATTRIBUTE_PREFIX: &str = "@";
pub const TEXT_KEY: &str = "#text";

/// Serialize a mapping as a sequence of sibling elements (no single root
/// is required because the caller wraps the result in an envelope).
///
/// # Errors
///
/// `Serialization` for shapes XML cannot carry: attributes at the top
/// level, invalid element names, nested sequences, non-scalar attribute or
/// text values.
pub fn write_fragment(mapping: &Mapping) -> Result<String> {
    let mut out = String::new();
    for (key, value) in mapping.iter() {
        if key.starts_with(ATTRIBUTE_PREFIX) || key == TEXT_KEY {
            return Err(NcError::serialization(format!(
                "'{}' has no enclosing element to attach to",
                key
            )));
        }
        write_element(&mut out, key, value)?;
    }
    Ok(out)
}

fn write_element(out: &mut String, name: &str, node: &Node) -> Result<()> {
    if !is_xml_name(name) {
        return Err(NcError::serialization(format!(
            "'{}' is not a valid element name",
            name
        )));
    }
    match node {
        Node::Scalar(text) if text.is_empty() => {
            out.push('<');
            out.push_str(name);
            out.push_str("/>");
        }
        Node::Scalar(text) => {
            out.push('<');
            out.push_str(name);
            out.push('>');
            out.push_str(&escape(text.as_str()));
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Node::Mapping(m) => write_mapping_element(out, name, m)?,
        Node::Sequence(items) => {
            for item in items {
                if let Node::Sequence(_) = item {
                    return Err(NcError::serialization(format!(
                        "'{}' holds a list nested directly in a list",
                        name
                    )));
                }
                write_element(out, name, item)?;
            }
        }
    }
    Ok(())
}

fn write_mapping_element(out: &mut String, name: &str, m: &Mapping) -> Result<()> {
    out.push('<');
    out.push_str(name);

    let mut text = None;
    for (key, value) in m.iter() {
        if let Some(attr) = key.strip_prefix(ATTRIBUTE_PREFIX) {
            let value = value.as_scalar().ok_or_else(|| {
                NcError::serialization(format!("attribute '{}' of '{}' is not a scalar", attr, name))
            })?;
            if !is_xml_name(attr) {
                return Err(NcError::serialization(format!(
                    "'{}' is not a valid attribute name",
                    attr
                )));
            }
            out.push(' ');
            out.push_str(attr);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        } else if key == TEXT_KEY {
            text = Some(value.as_scalar().ok_or_else(|| {
                NcError::serialization(format!("text of '{}' is not a scalar", name))
            })?);
        }
    }
    out.push('>');

    if let Some(text) = text {
        out.push_str(&escape(text));
    }
    for (key, value) in m.iter() {
        if key.starts_with(ATTRIBUTE_PREFIX) || key == TEXT_KEY {
            continue;
        }
        write_element(out, key, value)?;
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
    Ok(())
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}
