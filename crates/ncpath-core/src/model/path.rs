//! Path lexing: `router/interface/interface-name=to_sr2` into typed segments.

use crate::errors::{NcError, Result};
use std::fmt;

pub const DEFAULT_SEPARATOR: char = '/';

/// `key=value` selector for one element of a keyed list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    pub key: String,
    pub value: String,
}

/// One step of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    name: String,
    predicate: Option<Predicate>,
}

impl PathSegment {
    /// Plain segment addressing a child by tag name
    ///
    /// # Errors
    ///
    /// `MalformedPath` unless `name` is a non-empty run of `[A-Za-z0-9_.-]`.
    pub fn plain(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        check_name(&name, &name, "segment name")?;
        Ok(Self {
            name,
            predicate: None,
        })
    }

    /// Predicate segment; the segment's name is the predicate key. The value
    /// is free text and is escaped wherever it is written out.
    ///
    /// # Errors
    ///
    /// `MalformedPath` for an empty or invalid key.
    pub fn keyed(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let value = value.into();
        check_name(&format!("{}={}", key, value), &key, "predicate key")?;
        Ok(Self::predicate_unchecked(key, value))
    }

    fn predicate_unchecked(key: String, value: String) -> Self {
        Self {
            name: key.clone(),
            predicate: Some(Predicate { key, value }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    pub fn is_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    /// The segment as written in a path string
    pub fn token(&self) -> String {
        match &self.predicate {
            Some(p) => format!("{}={}", p.key, p.value),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// Ordered segment sequence; empty means the whole datastore
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Parse with the default `/` separator
    ///
    /// # Errors
    ///
    /// As [`Path::parse_with_separator`].
    pub fn parse(raw: &str) -> Result<Self> {
        Self::parse_with_separator(raw, DEFAULT_SEPARATOR)
    }

    /// Parse a path string.
    ///
    /// Leading and trailing separators are ignored. A token with exactly one
    /// `=` is a predicate; every other token must be a bare name of
    /// `[A-Za-z0-9_.-]` characters.
    ///
    /// # Errors
    ///
    /// `MalformedPath` for an empty interior token, an empty predicate key or
    /// an invalid name.
    pub fn parse_with_separator(raw: &str, separator: char) -> Result<Self> {
        let trimmed = raw.trim_matches(separator);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let malformed = |reason: String| NcError::MalformedPath {
            path: raw.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        for (idx, token) in trimmed.split(separator).enumerate() {
            if token.is_empty() {
                return Err(malformed(format!("empty segment at position {}", idx)));
            }
            let segment = if token.matches('=').count() == 1 {
                let (key, value) = token.split_once('=').unwrap_or((token, ""));
                if key.is_empty() {
                    return Err(malformed(format!("predicate '{}' has an empty key", token)));
                }
                check_name(raw, key, "predicate key")?;
                PathSegment::predicate_unchecked(key.to_string(), value.to_string())
            } else {
                check_name(raw, token, "segment name")?;
                PathSegment {
                    name: token.to_string(),
                    predicate: None,
                }
            };
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Rendering of the first `n` segments, used to name the parent in
    /// navigation errors.
    pub(crate) fn prefix_display(&self, n: usize) -> String {
        if n == 0 {
            return "/".to_string();
        }
        self.segments[..n.min(self.segments.len())]
            .iter()
            .map(PathSegment::token)
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix_display(self.segments.len()))
    }
}

impl std::str::FromStr for Path {
    type Err = NcError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

fn check_name(path: &str, name: &str, what: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(NcError::MalformedPath {
            path: path.to_string(),
            reason: format!("invalid {} '{}'", what, name),
        })
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}
