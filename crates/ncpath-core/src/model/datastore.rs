//! Closed enumerations for datastore selection, validated at the boundary.

use crate::errors::NcError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named configuration store on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datastore {
    Running,
    Candidate,
    Startup,
}

impl Datastore {
    pub fn as_str(&self) -> &'static str {
        match self {
            Datastore::Running => "running",
            Datastore::Candidate => "candidate",
            Datastore::Startup => "startup",
        }
    }
}

impl fmt::Display for Datastore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Datastore {
    type Err = NcError;

    fn from_str(s: &str) -> Result<Self, NcError> {
        match s {
            "running" => Ok(Datastore::Running),
            "candidate" => Ok(Datastore::Candidate),
            "startup" => Ok(Datastore::Startup),
            other => Err(NcError::InvalidDatastore {
                value: other.to_string(),
                expected: "running, candidate, startup".to_string(),
            }),
        }
    }
}

/// Which tree a read addresses: configuration (`<get-config>`) or
/// operational state (`<get>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadMode {
    Config,
    State,
}

impl ReadMode {
    /// Tag of the datastore wrapper element in filters and replies
    pub fn root_tag(&self) -> &'static str {
        match self {
            ReadMode::Config => "configure",
            ReadMode::State => "state",
        }
    }
}

impl fmt::Display for ReadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReadMode::Config => "config",
            ReadMode::State => "state",
        })
    }
}

impl FromStr for ReadMode {
    type Err = NcError;

    fn from_str(s: &str) -> Result<Self, NcError> {
        match s {
            "config" | "configure" => Ok(ReadMode::Config),
            "state" => Ok(ReadMode::State),
            other => Err(NcError::InvalidDatastore {
                value: other.to_string(),
                expected: "config, state".to_string(),
            }),
        }
    }
}

/// `default-operation` of an `<edit-config>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultOperation {
    #[default]
    Merge,
    Replace,
    None,
}

impl DefaultOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultOperation::Merge => "merge",
            DefaultOperation::Replace => "replace",
            DefaultOperation::None => "none",
        }
    }
}

impl fmt::Display for DefaultOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefaultOperation {
    type Err = NcError;

    fn from_str(s: &str) -> Result<Self, NcError> {
        match s {
            "merge" => Ok(DefaultOperation::Merge),
            "replace" => Ok(DefaultOperation::Replace),
            "none" => Ok(DefaultOperation::None),
            other => Err(NcError::InvalidDatastore {
                value: other.to_string(),
                expected: "merge, replace, none".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::NcErrorKind;

    #[test]
    fn test_datastore_parse() {
        assert_eq!("candidate".parse::<Datastore>().unwrap(), Datastore::Candidate);
        let err = "scratch".parse::<Datastore>().unwrap_err();
        assert_eq!(err.kind(), NcErrorKind::InvalidDatastore);
    }

    #[test]
    fn test_read_mode_root_tags() {
        assert_eq!(ReadMode::Config.root_tag(), "configure");
        assert_eq!(ReadMode::State.root_tag(), "state");
        assert!("operational".parse::<ReadMode>().is_err());
    }

    #[test]
    fn test_datastore_display_round_trip() {
        for ds in [Datastore::Running, Datastore::Candidate, Datastore::Startup] {
            assert_eq!(ds.to_string().parse::<Datastore>().unwrap(), ds);
        }
    }
}
