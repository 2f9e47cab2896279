//! Error types for cleanup-rules.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the configuration lifecycle.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Load was given an empty path
    #[error("config path is empty")]
    EmptyPath,

    /// Backing file missing or unreadable
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Backing file is zero-length
    #[error("config file {} is empty", path.display())]
    EmptyDocument { path: PathBuf },

    /// Document is not structurally valid YAML for the rule model
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Rule model violates an invariant
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// Operation needs an active config
    #[error("no configuration loaded")]
    NoConfigLoaded,

    /// Named exception rule does not exist
    #[error("exception '{name}' not found")]
    ExceptionNotFound { name: String },

    /// Save or backup could not write
    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Verification target does not exist
    #[error("config file {} does not exist", path.display())]
    NotFound { path: PathBuf },

    /// Serialization of the active config failed
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

/// First invariant violation found in a config.
///
/// Variants carry the index and, where one exists, the name of the offending
/// rule so the message can be acted on directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("services: at least one service must be defined")]
    NoServices,

    #[error("service[{index}]: service_name cannot be empty")]
    EmptyServiceName { index: usize },

    #[error("service[{index}]({service}): package_path cannot be empty")]
    EmptyPackagePath { index: usize, service: String },

    #[error("service[{index}]({service}): no creation functions defined")]
    NoCreationFunctions { index: usize, service: String },

    #[error("service[{index}]({service}): no cleanup methods defined")]
    NoCleanupMethods { index: usize, service: String },

    #[error("service[{index}]({service}): cleanup_methods[{method_index}] method cannot be empty")]
    EmptyCleanupMethod {
        index: usize,
        service: String,
        method_index: usize,
    },

    #[error("package_exceptions[{index}]: name cannot be empty")]
    EmptyExceptionName { index: usize },

    #[error("package_exceptions[{index}]({name}): pattern cannot be empty")]
    EmptyPattern { index: usize, name: String },

    #[error("package_exceptions[{index}]({name}): invalid condition type '{kind}'")]
    InvalidConditionType {
        index: usize,
        name: String,
        kind: String,
    },
}
