//! Write composition: the structural inverse of projection
//!
//! A partial update for the node a path addresses is re-nested into the
//! full hierarchy the path implies. A `key=value` segment does not add a
//! level; it becomes the list key field of the entry being edited.

use crate::errors::{NcError, Result};
use crate::model::{Mapping, Node, Path};
use crate::settings::Namespaces;
use crate::xml::write_fragment;
use quick_xml::escape::escape;

/// Re-nest `update` under `path`.
///
/// # Errors
///
/// `Serialization` when a predicate segment has to be injected into
/// something other than a mapping.
pub fn compose_update(update: &Node, path: &Path) -> Result<Node> {
    let mut node = update.clone();
    for segment in path.segments().iter().rev() {
        node = match segment.predicate() {
            Some(predicate) => match node {
                Node::Mapping(mut m) => {
                    m.insert_first(predicate.key.clone(), Node::Scalar(predicate.value.clone()));
                    Node::Mapping(m)
                }
                other => {
                    return Err(NcError::serialization(format!(
                        "cannot add list key {} to a {} update",
                        segment.token(),
                        shape(&other)
                    )))
                }
            },
            None => Node::Mapping(Mapping::single(segment.name(), node)),
        };
    }
    Ok(node)
}

/// Full `<config>` fragment for an `<edit-config>`:
/// `<config><configure xmlns="{ns}">{xml}</configure></config>`
///
/// # Errors
///
/// `Serialization` when the composed tree has a shape XML cannot carry.
pub fn compose_config(update: &Node, path: &Path, namespaces: &Namespaces) -> Result<String> {
    let composed = compose_update(update, path)?;
    let body = match &composed {
        Node::Mapping(m) => write_fragment(m)?,
        other => {
            return Err(NcError::serialization(format!(
                "update for the datastore root must be a mapping, got a {}",
                shape(other)
            )))
        }
    };
    Ok(format!(
        "<config><configure xmlns=\"{ns}\">{body}</configure></config>",
        ns = escape(namespaces.configure.as_str()),
        body = body
    ))
}

fn shape(node: &Node) -> &'static str {
    match node {
        Node::Scalar(_) => "scalar",
        Node::Mapping(_) => "mapping",
        Node::Sequence(_) => "list",
    }
}
