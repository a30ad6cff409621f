//! Read filter compilation
//!
//! Folds a path from its last segment outwards into a nested subtree
//! filter, then wraps it in the datastore element for the read mode.

use crate::errors::{NcError, Result};
use crate::model::{Path, ReadMode};
use crate::settings::Namespaces;
use quick_xml::escape::escape;
use std::fmt;

/// `<filter>` fragment for a single `<get>`/`<get-config>` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter(String);

impl Filter {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Nested selector for a path, without the datastore wrapper.
///
/// # Errors
///
/// `InvalidPredicatePosition` when a `key=value` segment is not the last one.
pub fn compile_selector(path: &Path) -> Result<String> {
    let segments = path.segments();
    let last = segments.len().saturating_sub(1);
    let mut selector = String::new();

    for (position, segment) in segments.iter().enumerate().rev() {
        selector = match segment.predicate() {
            Some(predicate) => {
                if position != last {
                    return Err(NcError::InvalidPredicatePosition {
                        segment: segment.token(),
                        position,
                    });
                }
                format!(
                    "<{key}>{value}</{key}>",
                    key = predicate.key,
                    value = escape(predicate.value.as_str())
                )
            }
            None => format!("<{name}>{inner}</{name}>", name = segment.name(), inner = selector),
        };
    }

    Ok(selector)
}

/// Complete read filter:
/// `<filter><{configure|state} xmlns="{ns}">{selector}</…></filter>`
///
/// # Errors
///
/// As [`compile_selector`].
pub fn compile_filter(path: &Path, mode: ReadMode, namespaces: &Namespaces) -> Result<Filter> {
    let selector = compile_selector(path)?;
    let root = mode.root_tag();
    Ok(Filter(format!(
        "<filter><{root} xmlns=\"{ns}\">{selector}</{root}></filter>",
        root = root,
        ns = escape(namespaces.for_mode(mode)),
        selector = selector
    )))
}
