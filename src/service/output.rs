//! Output formatting for command results.
//!
//! Every command renders either human-readable text or a single JSON
//! document, selected by `--format`.

use anyhow::Result;
use serde_json::json;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::config::{ChangeRecord, Config};

/// Renders command results in the selected format.
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Create a new formatter for the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Plain status message.
    pub fn message(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Text => message.to_string(),
            OutputFormat::Json => json!({ "status": "ok", "message": message }).to_string(),
        }
    }

    /// Exemption decision for one path.
    pub fn exemption(&self, path: &str, exempt: bool, reason: &str) -> String {
        match self.format {
            OutputFormat::Text => {
                if exempt {
                    format!("exempt: {} ({})", path, reason)
                } else {
                    format!("not exempt: {}", path)
                }
            }
            OutputFormat::Json => json!({
                "path": path,
                "exempt": exempt,
                "reason": reason,
            })
            .to_string(),
        }
    }

    /// Differences against another rules file.
    pub fn differences(&self, other: &Path, differences: &[String]) -> String {
        match self.format {
            OutputFormat::Text => {
                if differences.is_empty() {
                    format!("No differences with {}", other.display())
                } else {
                    let mut out = format!(
                        "{} difference(s) with {}:",
                        differences.len(),
                        other.display()
                    );
                    for d in differences {
                        out.push_str("\n  - ");
                        out.push_str(d);
                    }
                    out
                }
            }
            OutputFormat::Json => json!({
                "other": other.display().to_string(),
                "differences": differences,
            })
            .to_string(),
        }
    }

    /// Summary of the loaded rules.
    pub fn config(&self, source: &Path, config: &Config) -> Result<String> {
        match self.format {
            OutputFormat::Text => {
                let mut out = format!("Rules from {}\n\nServices:", source.display());
                for service in &config.services {
                    let methods: Vec<&str> = service
                        .cleanup_methods
                        .iter()
                        .map(|m| m.method.as_str())
                        .collect();
                    out.push_str(&format!(
                        "\n  {} ({}) create: {} cleanup: {}",
                        service.service_name,
                        service.package_path,
                        service.creation_functions.join(", "),
                        methods.join(", ")
                    ));
                }
                out.push_str("\n\nExceptions:");
                for exception in &config.package_exceptions {
                    let state = if exception.condition.enabled {
                        "enabled"
                    } else {
                        "disabled"
                    };
                    out.push_str(&format!(
                        "\n  {} [{}] {} ({})",
                        exception.name, state, exception.pattern, exception.condition.condition_type
                    ));
                }
                Ok(out)
            }
            OutputFormat::Json => Ok(json!({
                "source": source.display().to_string(),
                "config": serde_json::to_value(config)?,
            })
            .to_string()),
        }
    }

    /// A recorded change and where it was persisted.
    pub fn change(&self, record: &ChangeRecord, saved_to: &Path) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(format!(
                "{}: {} -> {} (saved to {})",
                record.field,
                record.old_value,
                record.new_value,
                saved_to.display()
            )),
            OutputFormat::Json => Ok(json!({
                "change": serde_json::to_value(record)?,
                "saved_to": saved_to.display().to_string(),
            })
            .to_string()),
        }
    }
}
