//! Configuration lifecycle: load, validate, mutate, persist, diff and verify.

use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::defaults::EmbeddedDefault;
use super::diff;
use super::state::{ChangeRecord, ConfigurationState};
use super::types::TEST_EXCEPTION_NAME;
use super::{validation, Config};
use crate::domain::ConfigError;

/// Owns the active config and its state for one sequential workflow.
///
/// Not synchronized: share it across threads only behind a single owner or
/// an external lock.
#[derive(Debug)]
pub struct ConfigManager {
    config: Option<Config>,
    state: ConfigurationState,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a manager with nothing loaded.
    pub fn new() -> Self {
        Self {
            config: None,
            state: ConfigurationState::new(PathBuf::new(), None),
        }
    }

    /// Get the default rules file path.
    /// Always uses ~/.config/cleanup-rules/rules.yaml for cross-platform consistency.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("cleanup-rules")
            .join("rules.yaml")
    }

    /// Active config, if one has been loaded.
    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    pub fn state(&self) -> &ConfigurationState {
        &self.state
    }

    /// Changes recorded since the last load, oldest first.
    pub fn history(&self) -> &[ChangeRecord] {
        self.state.history()
    }

    /// Load configuration from file, replacing the active config.
    ///
    /// The active config is only replaced once the new document has parsed;
    /// a failed load leaves the manager as it was. Does not validate.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let (config, last_modified) = read_config(path)?;

        info!(
            "Loaded config from {}: {} services, {} exceptions",
            path.display(),
            config.services.len(),
            config.package_exceptions.len()
        );
        self.config = Some(config);
        self.state = ConfigurationState::new(path.to_path_buf(), last_modified);
        Ok(())
    }

    /// Load an embedded rule document, replacing the active config.
    pub fn load_default(&mut self, source: &EmbeddedDefault) -> Result<(), ConfigError> {
        let config = source.load()?;
        debug!("Loaded embedded config {}", source.name);
        self.config = Some(config);
        self.state = ConfigurationState::new(PathBuf::from(source.source_label()), None);
        Ok(())
    }

    /// Validate the active config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let config = self.active()?;
        validation::validate(config)?;
        Ok(())
    }

    /// Serialize the active config to `path`.
    ///
    /// Comments and formatting of the source document are not preserved.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self.active()?).map_err(ConfigError::Serialize)?;

        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Enable or disable the reserved `test_files` exception.
    pub fn update_test_exception(&mut self, enabled: bool) -> Result<(), ConfigError> {
        self.set_exception_enabled(TEST_EXCEPTION_NAME, enabled)
    }

    /// Set the enabled flag of the first exception named `name`.
    ///
    /// Always appends a change record, even when the value is unchanged.
    pub fn set_exception_enabled(&mut self, name: &str, enabled: bool) -> Result<(), ConfigError> {
        let config = self.config.as_mut().ok_or(ConfigError::NoConfigLoaded)?;
        let exception = config
            .package_exceptions
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| ConfigError::ExceptionNotFound {
                name: name.to_string(),
            })?;

        let old = exception.condition.enabled;
        exception.condition.enabled = enabled;

        let record = self
            .state
            .record(format!("{}.enabled", name), old, enabled);
        info!(
            "Changed {}: {} -> {}",
            record.field, record.old_value, record.new_value
        );
        Ok(())
    }

    /// Write the active config to a backup location.
    pub fn create_backup(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        debug!("Creating backup at {}", path.display());
        self.save(path)
    }

    /// Replace the active config with the contents of a backup.
    pub fn restore_from_backup(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        debug!("Restoring from backup {}", path.display());
        self.load(path)
    }

    /// Describe how the config at `other` differs from the active one.
    ///
    /// `other` is parsed into a separate config; the manager is not touched.
    pub fn compare_configurations(&self, other: impl AsRef<Path>) -> Result<Vec<String>, ConfigError> {
        let active = self.active()?;
        let (other_config, _) = read_config(other.as_ref())?;
        let differences = diff::compare(active, &other_config);

        debug!(
            "Compared with {}: {} differences",
            other.as_ref().display(),
            differences.len()
        );
        Ok(differences)
    }

    /// Check that the file at `path` loads and validates.
    ///
    /// Uses a throwaway manager so no caller state is involved.
    pub fn verify_config_change(path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let mut scratch = ConfigManager::new();
        scratch.load(path)?;
        if let Err(e) = scratch.validate() {
            warn!("Verification of {} failed: {}", path.display(), e);
            return Err(e);
        }

        info!("Verified {}", path.display());
        Ok(())
    }

    /// Write the bundled default document, comments included, to `path`.
    pub fn init_at(path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        fs::write(path, EmbeddedDefault::BUNDLED.text()).map_err(write_err)?;
        info!("Wrote default config to {}", path.display());
        Ok(())
    }

    fn active(&self) -> Result<&Config, ConfigError> {
        self.config.as_ref().ok_or(ConfigError::NoConfigLoaded)
    }
}

/// Read and parse a rules document, returning it with its modification time.
fn read_config(path: &Path) -> Result<(Config, Option<OffsetDateTime>), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyPath);
    }

    let read_err = |source: std::io::Error| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    };

    let content = fs::read(path).map_err(read_err)?;
    if content.is_empty() {
        return Err(ConfigError::EmptyDocument {
            path: path.to_path_buf(),
        });
    }

    let config: Config = serde_yaml::from_slice(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let last_modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(OffsetDateTime::from);

    Ok((config, last_modified))
}
