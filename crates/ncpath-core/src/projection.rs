//! Reply projection
//!
//! Turns a raw `<rpc-reply>` into the subtree a path addresses:
//! 1. parse XML into a `Node` tree
//! 2. unwrap the envelope and the datastore wrapper (`configure`/`state`)
//! 3. drop namespace declarations at that level
//! 4. walk the path, resolving `key=value` predicates against lists
//! 5. key the result by the terminal segment as written
//! 6. reshape a terminal list as `{_count, 0, 1, …}`
//! 7. apply the reducer

use crate::errors::{NcError, Result};
use crate::model::{Mapping, Node, Path, PathSegment, Predicate, ReadMode};
use crate::reduce::{reduce, ReduceSpec};
use crate::xml::parse_document;

pub const COUNT_KEY: &str = "_count";

const ENVELOPE_ROOT: &str = "rpc-reply";
const ENVELOPE_BODIES: [&str; 2] = ["data", "config"];

/// Project `reply` onto `path`.
///
/// # Errors
///
/// - `MalformedReply` when the reply is not well-formed XML
/// - `PathNotFound` when a plain segment names a missing child
/// - `PredicateRequired` when a plain segment reaches a list
/// - `PredicateNotFound` when no list element matches a predicate
pub fn project(
    reply: &str,
    path: &Path,
    mode: ReadMode,
    reduce_spec: Option<&ReduceSpec>,
) -> Result<Node> {
    let datastore = datastore_root(reply, mode)?;
    let selected = navigate(datastore, path)?;

    let result = match path.last() {
        Some(terminal) => Node::Mapping(Mapping::single(terminal.token(), index_sequence(selected))),
        None => selected,
    };

    Ok(match reduce_spec {
        Some(spec) if !spec.is_noop() => reduce(&result, spec),
        _ => result,
    })
}

/// The reply's data body without any stripping or navigation.
///
/// # Errors
///
/// `MalformedReply` when the reply is not well-formed XML.
pub fn project_raw(reply: &str) -> Result<Node> {
    let document = parse_document(reply)?;
    Ok(unwrap_envelope(Node::Mapping(document)))
}

fn datastore_root(reply: &str, mode: ReadMode) -> Result<Node> {
    let body = project_raw(reply)?;
    let mut root = match body {
        Node::Mapping(mut m) => match m.remove(mode.root_tag()) {
            Some(Node::Mapping(inner)) => inner,
            _ => Mapping::new(),
        },
        _ => Mapping::new(),
    };
    root.remove_where(|k| k == "@xmlns" || k.starts_with("@xmlns:"));
    Ok(Node::Mapping(root))
}

fn unwrap_envelope(node: Node) -> Node {
    let mut node = descend_if_present(node, ENVELOPE_ROOT);
    for body in ENVELOPE_BODIES {
        if node.as_mapping().is_some_and(|m| m.contains_key(body)) {
            node = descend_if_present(node, body);
            break;
        }
    }
    match node {
        Node::Scalar(s) if s.is_empty() => Node::empty_mapping(),
        other => other,
    }
}

fn descend_if_present(node: Node, key: &str) -> Node {
    match node {
        Node::Mapping(mut m) => match m.remove(key) {
            Some(inner) => inner,
            None => Node::Mapping(m),
        },
        other => other,
    }
}

fn navigate(root: Node, path: &Path) -> Result<Node> {
    let mut current = root;
    for (idx, segment) in path.segments().iter().enumerate() {
        let parent = path.prefix_display(idx);
        current = match segment.predicate() {
            Some(predicate) => select(current, predicate, parent)?,
            None => descend(current, segment, parent)?,
        };
    }
    Ok(current)
}

fn descend(current: Node, segment: &PathSegment, parent: String) -> Result<Node> {
    match current {
        Node::Mapping(mut m) => m.remove(segment.name()).ok_or(NcError::PathNotFound {
            segment: segment.name().to_string(),
            parent,
        }),
        Node::Sequence(_) => Err(NcError::PredicateRequired {
            segment: segment.name().to_string(),
            parent,
        }),
        Node::Scalar(_) => Err(NcError::PathNotFound {
            segment: segment.name().to_string(),
            parent,
        }),
    }
}

fn select(current: Node, predicate: &Predicate, parent: String) -> Result<Node> {
    let not_found = || NcError::PredicateNotFound {
        key: predicate.key.clone(),
        value: predicate.value.clone(),
        parent: parent.clone(),
    };
    match current {
        Node::Sequence(items) => items
            .into_iter()
            .find(|item| matches_predicate(item, predicate))
            .ok_or_else(not_found),
        // A list with a single entry parses as a plain mapping.
        node @ Node::Mapping(_) if matches_predicate(&node, predicate) => Ok(node),
        _ => Err(not_found()),
    }
}

fn matches_predicate(node: &Node, predicate: &Predicate) -> bool {
    node.as_mapping()
        .and_then(|m| m.get(&predicate.key))
        .and_then(Node::text)
        .is_some_and(|v| v == predicate.value)
}

fn index_sequence(node: Node) -> Node {
    match node {
        Node::Sequence(items) => {
            let mut m = Mapping::new();
            m.insert(COUNT_KEY, Node::Scalar(items.len().to_string()));
            for (idx, item) in items.into_iter().enumerate() {
                m.insert(idx.to_string(), item);
            }
            Node::Mapping(m)
        }
        other => other,
    }
}
