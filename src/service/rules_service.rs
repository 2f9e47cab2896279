//! Rule file commands on top of the configuration lifecycle.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::config::{ConfigManager, EmbeddedDefault};
use crate::service::output::OutputFormatter;

/// Runs CLI commands against one loaded rules file.
pub struct RulesService {
    manager: ConfigManager,
    /// Backing file, `None` when running on the bundled rules
    rules_path: Option<PathBuf>,
    output: OutputFormatter,
}

impl RulesService {
    /// Open the rules file to operate on.
    ///
    /// Resolution order: `config`, then [`ConfigManager::default_path`] if it
    /// exists, then the bundled rules.
    pub fn open(config: Option<&Path>, format: OutputFormat) -> Result<Self> {
        let rules_path = resolve_rules_path(config, &ConfigManager::default_path());
        let mut manager = ConfigManager::new();

        match &rules_path {
            Some(path) => manager
                .load(path)
                .with_context(|| format!("Failed to load rules file: {}", path.display()))?,
            None => {
                debug!("No rules file found, using bundled rules");
                manager
                    .load_default(&EmbeddedDefault::BUNDLED)
                    .context("Failed to load bundled rules")?
            }
        }

        Ok(Self {
            manager,
            rules_path,
            output: OutputFormatter::new(format),
        })
    }

    pub fn manager(&self) -> &ConfigManager {
        &self.manager
    }

    /// Validate the loaded rules.
    pub fn validate(&self) -> Result<String> {
        self.manager
            .validate()
            .with_context(|| format!("Invalid rules in {}", self.source().display()))?;
        Ok(self.output.message("Configuration is valid."))
    }

    /// Describe the loaded rules.
    pub fn show(&self) -> Result<String> {
        let config = self
            .manager
            .config()
            .ok_or_else(|| anyhow!("no configuration loaded"))?;
        self.output.config(self.source(), config)
    }

    /// Report whether `path` is exempt and why.
    pub fn check(&self, path: &str, is_file: bool) -> Result<String> {
        let config = self
            .manager
            .config()
            .ok_or_else(|| anyhow!("no configuration loaded"))?;
        let (exempt, reason) = if is_file {
            config.should_exempt_file(path)
        } else {
            config.should_exempt_package(path)
        };
        debug!("check {}: exempt={}", path, exempt);
        Ok(self.output.exemption(path, exempt, reason))
    }

    /// Toggle the test_files exception and persist the result.
    pub fn set_test_exception(&mut self, enabled: bool, output: Option<&Path>) -> Result<String> {
        let target = self.write_target(output)?;
        self.manager.update_test_exception(enabled)?;
        self.manager
            .save(&target)
            .with_context(|| format!("Failed to save rules to {}", target.display()))?;

        let record = self
            .manager
            .history()
            .last()
            .ok_or_else(|| anyhow!("change was not recorded"))?;
        self.output.change(record, &target)
    }

    /// Write a backup of the loaded rules.
    pub fn backup(&self, path: &Path) -> Result<String> {
        self.manager
            .create_backup(path)
            .with_context(|| format!("Failed to write backup: {}", path.display()))?;
        Ok(self
            .output
            .message(&format!("Backup written to {}", path.display())))
    }

    /// Restore rules from a backup and write them back to the rules file.
    ///
    /// The backup is verified first so a broken backup never replaces a
    /// working rules file.
    pub fn restore(&mut self, backup: &Path, output: Option<&Path>) -> Result<String> {
        let target = self.write_target(output)?;
        ConfigManager::verify_config_change(backup)
            .with_context(|| format!("Backup is not usable: {}", backup.display()))?;
        self.manager.restore_from_backup(backup)?;
        self.manager
            .save(&target)
            .with_context(|| format!("Failed to save rules to {}", target.display()))?;
        Ok(self.output.message(&format!(
            "Restored {} from {}",
            target.display(),
            backup.display()
        )))
    }

    /// List differences between the loaded rules and `other`.
    pub fn compare(&self, other: &Path) -> Result<String> {
        let differences = self
            .manager
            .compare_configurations(other)
            .with_context(|| format!("Failed to compare with {}", other.display()))?;
        Ok(self.output.differences(other, &differences))
    }

    fn source(&self) -> &Path {
        &self.manager.state().path
    }

    fn write_target(&self, output: Option<&Path>) -> Result<PathBuf> {
        output
            .map(Path::to_path_buf)
            .or_else(|| self.rules_path.clone())
            .ok_or_else(|| anyhow!("Using bundled rules; pass --output or --config to choose where to write"))
    }
}

/// Pick the rules file to load, if any.
fn resolve_rules_path(explicit: Option<&Path>, default_path: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if default_path.exists() => Some(default_path.to_path_buf()),
        None => None,
    }
}
