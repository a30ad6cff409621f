//! Depth and exclusion bounding of result trees

use crate::model::{Mapping, Node};
use std::collections::BTreeSet;

/// Bounds applied to a result tree before it is handed back.
/// `max_depth` of `None` or `Some(0)` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReduceSpec {
    pub max_depth: Option<usize>,
    pub exclude_keys: BTreeSet<String>,
}

impl ReduceSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn exclude(mut self, key: impl Into<String>) -> Self {
        self.exclude_keys.insert(key.into());
        self
    }

    fn budget(&self) -> Option<usize> {
        self.max_depth.filter(|d| *d > 0)
    }

    /// True when reducing would return the input unchanged
    pub fn is_noop(&self) -> bool {
        self.budget().is_none() && self.exclude_keys.is_empty()
    }
}

/// Rebuild `node` under `spec`. Non-mapping input is returned as is.
///
/// A child mapping costs one level; one that is past the budget, or that
/// reduces to nothing, is omitted. A sequence costs a single level shared
/// by all of its elements. Scalars, and lists made only of scalars, never
/// cost depth.
pub fn reduce(node: &Node, spec: &ReduceSpec) -> Node {
    match node {
        Node::Mapping(m) => Node::Mapping(reduce_mapping(m, spec.budget(), spec)),
        other => other.clone(),
    }
}

fn reduce_mapping(m: &Mapping, budget: Option<usize>, spec: &ReduceSpec) -> Mapping {
    let mut out = Mapping::new();
    for (key, value) in m.iter() {
        if spec.exclude_keys.contains(key) {
            continue;
        }
        if let Some(reduced) = reduce_child(value, budget, spec) {
            out.insert(key, reduced);
        }
    }
    out
}

fn reduce_child(value: &Node, budget: Option<usize>, spec: &ReduceSpec) -> Option<Node> {
    match value {
        Node::Scalar(_) => Some(value.clone()),
        Node::Mapping(m) => {
            let remaining = descend(budget)?;
            let reduced = reduce_mapping(m, remaining, spec);
            (!reduced.is_empty()).then_some(Node::Mapping(reduced))
        }
        Node::Sequence(items) if is_leaf_list(items) => Some(value.clone()),
        Node::Sequence(items) => {
            let remaining = descend(budget)?;
            let reduced = reduce_sequence(items, remaining, spec);
            (!reduced.is_empty()).then_some(Node::Sequence(reduced))
        }
    }
}

fn reduce_sequence(items: &[Node], remaining: Option<usize>, spec: &ReduceSpec) -> Vec<Node> {
    items
        .iter()
        .filter_map(|item| match item {
            Node::Scalar(_) => Some(item.clone()),
            Node::Mapping(m) => {
                let reduced = reduce_mapping(m, remaining, spec);
                (!reduced.is_empty()).then_some(Node::Mapping(reduced))
            }
            Node::Sequence(inner) => {
                let reduced = reduce_sequence(inner, remaining, spec);
                (!reduced.is_empty()).then_some(Node::Sequence(reduced))
            }
        })
        .collect()
}

fn is_leaf_list(items: &[Node]) -> bool {
    !items.is_empty() && items.iter().all(|i| matches!(i, Node::Scalar(_)))
}

/// `None` when no level is left; otherwise the budget one level down
/// (`Some(None)` for unlimited).
fn descend(budget: Option<usize>) -> Option<Option<usize>> {
    match budget {
        None => Some(None),
        Some(0) => None,
        Some(n) => Some(Some(n - 1)),
    }
}
