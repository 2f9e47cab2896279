//! Rule model: services that must be cleaned up and path-based exceptions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::matches;

/// Reserved name of the exception that waives cleanup in test code.
pub const TEST_EXCEPTION_NAME: &str = "test_files";

/// Main configuration structure.
///
/// Missing fields deserialize to empty values; completeness is checked by
/// [`validate`](super::validate), not by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Client types that require cleanup
    pub services: Vec<ServiceRule>,

    /// Exception rules, evaluated in document order
    pub package_exceptions: Vec<PackageExceptionRule>,
}

/// A cloud client type requiring one or more cleanup calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceRule {
    /// Service identifier (e.g. "spanner")
    pub service_name: String,

    /// Import path of the client library
    pub package_path: String,

    /// Functions that create a client
    pub creation_functions: Vec<String>,

    /// Release operations, in declared order
    pub cleanup_methods: Vec<CleanupMethod>,
}

/// One release operation for a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupMethod {
    /// Method name (e.g. "Close")
    pub method: String,

    /// Whether the analyzer must see this call
    pub required: bool,

    pub description: String,
}

/// A path-pattern scoped waiver of the cleanup requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageExceptionRule {
    pub name: String,

    /// Restricted glob, see [`crate::domain::pattern`]
    pub pattern: String,

    pub condition: ExceptionCondition,
}

/// Applicability gate for an exception rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExceptionCondition {
    /// Raw condition type; see [`ConditionType`] for accepted values.
    /// Kept as a string so unknown types fail validation instead of parsing.
    #[serde(rename = "type")]
    pub condition_type: String,

    pub description: String,

    pub enabled: bool,
}

/// The fixed set of situations an exception may describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionType {
    /// Process exits shortly after use; the OS reclaims the client
    ShortLivedProgram,
    /// Client is reused across invocations of a cloud function
    CloudFunction,
    /// Test code
    TestCode,
}

impl ConditionType {
    /// All accepted condition types.
    pub const ALL: [ConditionType; 3] = [
        ConditionType::ShortLivedProgram,
        ConditionType::CloudFunction,
        ConditionType::TestCode,
    ];

    /// Document spelling of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::ShortLivedProgram => "short_lived_program",
            ConditionType::CloudFunction => "cloud_function",
            ConditionType::TestCode => "test_code",
        }
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConditionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown condition type: {}", s))
    }
}

impl ExceptionCondition {
    /// Parsed condition type, or `None` if the document holds an unknown one.
    pub fn kind(&self) -> Option<ConditionType> {
        self.condition_type.parse().ok()
    }
}

impl ServiceRule {
    /// Check whether `name` creates a client of this service.
    pub fn is_creation_function(&self, name: &str) -> bool {
        self.creation_functions.iter().any(|f| f == name)
    }

    /// Cleanup methods flagged as required, in declared order.
    pub fn required_cleanup_methods(&self) -> impl Iterator<Item = &CleanupMethod> {
        self.cleanup_methods.iter().filter(|m| m.required)
    }
}

impl PackageExceptionRule {
    /// Whether this rule is enabled and its pattern matches `path`.
    pub fn applies_to(&self, path: &str) -> bool {
        self.condition.enabled && matches(&self.pattern, path)
    }
}

impl Config {
    /// Find the service whose client library lives at `package_path`.
    pub fn find_service_by_package(&self, package_path: &str) -> Option<&ServiceRule> {
        self.services
            .iter()
            .find(|s| s.package_path == package_path)
    }

    /// First exception rule with the given name.
    pub fn find_exception(&self, name: &str) -> Option<&PackageExceptionRule> {
        self.package_exceptions.iter().find(|e| e.name == name)
    }

    /// Enabled exception rules, in document order.
    pub fn enabled_exceptions(&self) -> impl Iterator<Item = &PackageExceptionRule> {
        self.package_exceptions
            .iter()
            .filter(|e| e.condition.enabled)
    }

    /// First enabled exception (document order) whose pattern matches `path`.
    pub fn exemption_for(&self, path: &str) -> Option<&PackageExceptionRule> {
        self.package_exceptions.iter().find(|e| e.applies_to(path))
    }

    /// Decide whether a package path is exempt from cleanup checks.
    ///
    /// Returns the matched exception's description, or `(false, "")`.
    pub fn should_exempt_package(&self, package_path: &str) -> (bool, &str) {
        match self.exemption_for(package_path) {
            Some(rule) => (true, rule.condition.description.as_str()),
            None => (false, ""),
        }
    }

    /// Decide whether a source file is exempt from cleanup checks.
    ///
    /// Backslash separators are normalised so Windows paths match the same
    /// rules as slash-delimited ones.
    pub fn should_exempt_file(&self, file_path: &str) -> (bool, &str) {
        if file_path.contains('\\') {
            let normalized = file_path.replace('\\', "/");
            return match self.exemption_for(&normalized) {
                Some(rule) => (true, rule.condition.description.as_str()),
                None => (false, ""),
            };
        }
        self.should_exempt_package(file_path)
    }
}
