//! Service layer containing command orchestration.

pub mod output;
mod rules_service;

pub use output::OutputFormatter;
pub use rules_service::RulesService;
