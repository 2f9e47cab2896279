//! Per-manager metadata and the audited change history.

use serde::Serialize;
use std::path::PathBuf;
use time::OffsetDateTime;

/// Version tag stamped on every freshly loaded state.
pub const STATE_VERSION: &str = "1.0";

/// One audited mutation of the active config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    /// Dotted path of the touched field (e.g. `test_files.enabled`)
    pub field: String,
    pub old_value: String,
    pub new_value: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Metadata about the active config and everything done to it since load.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationState {
    /// Source the active config was loaded from
    pub path: PathBuf,

    /// Modification time of the backing file at load time
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_modified: Option<OffsetDateTime>,

    pub version: String,

    history: Vec<ChangeRecord>,
}

impl ConfigurationState {
    pub(crate) fn new(path: PathBuf, last_modified: Option<OffsetDateTime>) -> Self {
        Self {
            path,
            last_modified,
            version: STATE_VERSION.to_string(),
            history: Vec::new(),
        }
    }

    /// Recorded changes, oldest first.
    pub fn history(&self) -> &[ChangeRecord] {
        &self.history
    }

    /// Append a change stamped with the current time.
    ///
    /// Timestamps never go backwards: if the clock stepped back since the
    /// previous record, the previous timestamp is reused.
    pub(crate) fn record(
        &mut self,
        field: impl Into<String>,
        old_value: impl ToString,
        new_value: impl ToString,
    ) -> &ChangeRecord {
        self.record_at(field, old_value, new_value, OffsetDateTime::now_utc())
    }

    fn record_at(
        &mut self,
        field: impl Into<String>,
        old_value: impl ToString,
        new_value: impl ToString,
        now: OffsetDateTime,
    ) -> &ChangeRecord {
        let timestamp = match self.history.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };
        self.history.push(ChangeRecord {
            field: field.into(),
            old_value: old_value.to_string(),
            new_value: new_value.to_string(),
            timestamp,
        });
        &self.history[self.history.len() - 1]
    }
}
