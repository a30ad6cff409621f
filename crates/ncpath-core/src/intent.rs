//! Intent files: declarative per-path configuration targeted at hosts
//!
//! An intent file is a YAML mapping carrying its own metadata:
//!
//! ```yaml
//! _path: router/interface/interface-name=to_sr2
//! _target_scope: GROUP          # GLOBAL | GROUP | HOST
//! _target_groups: [core]
//! description: uplink to sr2
//! ```
//!
//! Intents for the same path are deep-merged with host intents taking
//! precedence over group intents, and group over global. Within one scope
//! the file that sorts first wins.

use crate::errors::{NcError, Result};
use crate::model::path::DEFAULT_SEPARATOR;
use crate::model::{Mapping, Node, Path};
use crate::{log_op_end, log_op_error, log_op_start};
use std::collections::BTreeSet;
use std::time::Instant;

pub const PATH_KEY: &str = "_path";
pub const TARGET_PREFIX: &str = "_target";
const TARGET_SCOPE: &str = "_target_scope";
const TARGET_GROUPS: &str = "_target_groups";
const TARGET_HOST: &str = "_target_host";

/// The host intents are resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostContext {
    pub name: String,
    pub groups: BTreeSet<String>,
}

impl HostContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: BTreeSet::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.insert(group.into());
        self
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Global,
    Group,
    Host,
}

/// One resolved intent: the update to apply at `path`.
#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub raw_path: String,
    pub path: Path,
    pub data: Node,
}

/// Intents resolved for one host, in first-seen path order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntentSet {
    intents: Vec<Intent>,
}

impl IntentSet {
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter()
    }

    pub fn get(&self, raw_path: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.raw_path == raw_path)
    }

    /// `{path: data, ...}`
    pub fn to_node(&self) -> Node {
        Node::Mapping(
            self.intents
                .iter()
                .map(|i| (i.raw_path.clone(), i.data.clone()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a IntentSet {
    type Item = &'a Intent;
    type IntoIter = std::slice::Iter<'a, Intent>;

    fn into_iter(self) -> Self::IntoIter {
        self.intents.iter()
    }
}

/// Read one YAML document.
///
/// # Errors
///
/// `Io` when the file cannot be read, `InvalidIntent` when it is not YAML
/// or has duplicate keys.
pub fn load_yaml(file: &std::path::Path) -> Result<Node> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| NcError::io(format!("read {}", file.display()), e))?;
    serde_yaml::from_str(&text).map_err(|e| NcError::InvalidIntent {
        file: file.display().to_string(),
        reason: e.to_string(),
    })
}

/// Resolve the intents under `dir` that target `host`, reading `_path`
/// with the default `/` separator.
///
/// # Errors
///
/// As [`load_intent_with_separator`].
pub fn load_intent(dir: &std::path::Path, host: &HostContext) -> Result<IntentSet> {
    load_intent_with_separator(dir, host, DEFAULT_SEPARATOR)
}

/// Resolve the intents under `dir` that target `host`.
///
/// Every `*.yaml`/`*.yml` file below `dir` is read in path order. Files
/// without `_path` are ignored; `_path` is lexed with `separator`.
///
/// # Errors
///
/// - `Io` when the directory or a file cannot be read
/// - `InvalidIntent` for unparsable YAML, a missing or unknown
///   `_target_scope`, or a `_path` that does not lex
pub fn load_intent_with_separator(
    dir: &std::path::Path,
    host: &HostContext,
    separator: char,
) -> Result<IntentSet> {
    log_op_start!(
        "load_intent",
        dir = %dir.display(),
        host = host.name.as_str()
    );
    let start = Instant::now();

    let result = load_intent_impl(dir, host, separator).map_err(|e| {
        log_op_error!(
            "load_intent",
            e,
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "load_intent",
        duration_ms = start.elapsed().as_millis() as u64,
        intents = result.len() as u64
    );
    Ok(result)
}

fn load_intent_impl(
    dir: &std::path::Path,
    host: &HostContext,
    separator: char,
) -> Result<IntentSet> {
    let mut files = Vec::new();
    collect_yaml_files(dir, &mut files)?;
    files.sort();

    let mut global = Mapping::new();
    let mut group = Mapping::new();
    let mut host_bucket = Mapping::new();

    for file in &files {
        let document = match load_yaml(file)? {
            Node::Mapping(m) if m.contains_key(PATH_KEY) => m,
            _ => {
                tracing::debug!(file = %file.display(), "skipping file without _path");
                continue;
            }
        };
        let invalid = |reason: String| NcError::InvalidIntent {
            file: file.display().to_string(),
            reason,
        };

        let raw_path = document
            .get(PATH_KEY)
            .and_then(Node::as_scalar)
            .ok_or_else(|| invalid(format!("{} must be a string", PATH_KEY)))?
            .to_string();
        let scope = parse_scope(document.get(TARGET_SCOPE)).map_err(invalid)?;

        let targeted = match scope {
            Scope::Global => Some(&mut global),
            Scope::Group => target_groups(&document)
                .iter()
                .any(|g| host.in_group(g))
                .then_some(&mut group),
            Scope::Host => (document.get(TARGET_HOST).and_then(Node::as_scalar)
                == Some(host.name.as_str()))
            .then_some(&mut host_bucket),
        };

        if let Some(bucket) = targeted {
            tracing::debug!(file = %file.display(), path = raw_path.as_str(), ?scope, "intent selected");
            let entry = Mapping::single(raw_path, Node::Mapping(document));
            merge(bucket, &entry);
        }
    }

    merge(&mut group, &global);
    merge(&mut host_bucket, &group);

    let mut intents = Vec::with_capacity(host_bucket.len());
    for (raw_path, data) in host_bucket {
        let path =
            Path::parse_with_separator(&raw_path, separator).map_err(|e| NcError::InvalidIntent {
                file: dir.display().to_string(),
                reason: e.to_string(),
            })?;
        let data = match data {
            Node::Mapping(mut m) => {
                m.remove_where(|k| k == PATH_KEY || k.starts_with(TARGET_PREFIX));
                Node::Mapping(m)
            }
            other => other,
        };
        intents.push(Intent {
            raw_path,
            path,
            data,
        });
    }
    Ok(IntentSet { intents })
}

/// Deep merge `from` into `into`. On conflicts `into` wins; mappings on
/// both sides are merged recursively.
pub fn merge(into: &mut Mapping, from: &Mapping) {
    for (key, value) in from.iter() {
        match (into.entry_mut(key), value) {
            (Some(Node::Mapping(existing)), Node::Mapping(incoming)) => merge(existing, incoming),
            (Some(_), _) => {}
            (None, _) => into.insert(key, value.clone()),
        }
    }
}

fn parse_scope(value: Option<&Node>) -> std::result::Result<Scope, String> {
    let raw = value
        .and_then(Node::as_scalar)
        .ok_or_else(|| format!("{} is required", TARGET_SCOPE))?;
    match raw.to_ascii_uppercase().as_str() {
        "GLOBAL" => Ok(Scope::Global),
        "GROUP" => Ok(Scope::Group),
        "HOST" => Ok(Scope::Host),
        _ => Err(format!(
            "unknown {} '{}', expected GLOBAL, GROUP or HOST",
            TARGET_SCOPE, raw
        )),
    }
}

fn target_groups(document: &Mapping) -> Vec<&str> {
    match document.get(TARGET_GROUPS) {
        Some(Node::Sequence(items)) => items.iter().filter_map(Node::as_scalar).collect(),
        Some(Node::Scalar(single)) => vec![single.as_str()],
        _ => Vec::new(),
    }
}

fn collect_yaml_files(dir: &std::path::Path, out: &mut Vec<std::path::PathBuf>) -> Result<()> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| NcError::io(format!("read dir {}", dir.display()), e))?;
    for entry in entries {
        let path = entry
            .map_err(|e| NcError::io(format!("read dir {}", dir.display()), e))?
            .path();
        if path.is_dir() {
            collect_yaml_files(&path, out)?;
        } else if matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        ) {
            out.push(path);
        }
    }
    Ok(())
}
