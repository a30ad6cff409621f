//! Engine settings loaded from TOML
//!
//! ```toml
//! separator = "/"
//! default_operation = "merge"
//!
//! [namespaces]
//! configure = "urn:nokia.com:sros:ns:yang:sr:conf"
//! state = "urn:nokia.com:sros:ns:yang:sr:state"
//!
//! [logging]
//! profile = "production"
//! ```

use crate::errors::{NcError, Result};
use crate::logging_facility::Profile;
use crate::model::path::DEFAULT_SEPARATOR;
use crate::model::{DefaultOperation, ReadMode};
use serde::Deserialize;

pub const CONFIGURE_NAMESPACE: &str = "urn:nokia.com:sros:ns:yang:sr:conf";
pub const STATE_NAMESPACE: &str = "urn:nokia.com:sros:ns:yang:sr:state";

/// XML namespaces carried by the datastore wrapper elements
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Namespaces {
    pub configure: String,
    pub state: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        Self {
            configure: CONFIGURE_NAMESPACE.to_string(),
            state: STATE_NAMESPACE.to_string(),
        }
    }
}

impl Namespaces {
    pub fn for_mode(&self, mode: ReadMode) -> &str {
        match mode {
            ReadMode::Config => &self.configure,
            ReadMode::State => &self.state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub separator: char,
    pub namespaces: Namespaces,
    pub default_operation: DefaultOperation,
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            namespaces: Namespaces::default(),
            default_operation: DefaultOperation::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the TOML is malformed, a value has the wrong type
    /// or the separator is a character that can appear inside a segment.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text).map_err(|e| NcError::InvalidConfig {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// # Errors
    ///
    /// `Io` when the file cannot be read, otherwise as [`Settings::from_toml_str`].
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| NcError::io(format!("read settings {}", path.display()), e))?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        let sep = self.separator;
        if sep == '=' || sep.is_ascii_alphanumeric() || matches!(sep, '_' | '.' | '-') {
            return Err(NcError::InvalidConfig {
                message: format!("separator '{}' collides with segment characters", sep),
            });
        }
        Ok(())
    }
}
