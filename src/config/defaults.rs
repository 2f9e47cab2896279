//! Bundled default rule set.

use std::path::PathBuf;

use super::Config;
use crate::domain::ConfigError;

/// A read-only, in-binary rule document.
///
/// The manager loads defaults through this type rather than a global so that
/// callers and tests can supply their own.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedDefault {
    /// Name reported as the source of the loaded config
    pub name: &'static str,
    pub bytes: &'static [u8],
}

impl EmbeddedDefault {
    /// The rule set shipped with this crate.
    pub const BUNDLED: EmbeddedDefault = EmbeddedDefault {
        name: "default_rules.yaml",
        bytes: include_bytes!("default_rules.yaml"),
    };

    /// Source label recorded in the manager state.
    pub fn source_label(&self) -> String {
        format!("embedded:{}", self.name)
    }

    /// Document text, for writing a starter file.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.bytes).into_owned()
    }

    /// Parse the embedded document.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let path = PathBuf::from(self.source_label());
        if self.bytes.is_empty() {
            return Err(ConfigError::EmptyDocument { path });
        }
        serde_yaml::from_slice(self.bytes).map_err(|source| ConfigError::Parse { path, source })
    }
}
