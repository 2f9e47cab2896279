//! Configuration management module.
//!
//! Holds the rule model, its validation, the bundled defaults, and the
//! lifecycle manager that loads, mutates, diffs, backs up and restores rule
//! files while keeping a change history.

mod defaults;
mod diff;
mod service;
mod state;
mod types;
mod validation;

pub use defaults::EmbeddedDefault;
pub use diff::compare;
pub use service::ConfigManager;
pub use state::{ChangeRecord, ConfigurationState, STATE_VERSION};
pub use types::{
    CleanupMethod, ConditionType, Config, ExceptionCondition, PackageExceptionRule, ServiceRule,
    TEST_EXCEPTION_NAME,
};
pub use validation::validate;
