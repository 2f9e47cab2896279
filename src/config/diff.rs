//! Human-readable differences between two configs.

use super::Config;

/// List the differences between `active` and `other`, as seen from `active`.
///
/// Exceptions are matched by name (first occurrence in `other`). Each
/// exception in `active` is reported as removed or with its enabled,
/// pattern and description changes; exceptions only in `other` are reported
/// as added. Services are compared by count only.
pub fn compare(active: &Config, other: &Config) -> Vec<String> {
    let mut differences = Vec::new();

    for current in &active.package_exceptions {
        let Some(theirs) = other.find_exception(&current.name) else {
            differences.push(format!("exception '{}' removed", current.name));
            continue;
        };

        if current.condition.enabled != theirs.condition.enabled {
            differences.push(format!(
                "exception '{}': enabled changed from {} to {}",
                current.name, current.condition.enabled, theirs.condition.enabled
            ));
        }
        if current.pattern != theirs.pattern {
            differences.push(format!(
                "exception '{}': pattern changed from '{}' to '{}'",
                current.name, current.pattern, theirs.pattern
            ));
        }
        if current.condition.description != theirs.condition.description {
            differences.push(format!(
                "exception '{}': description changed from '{}' to '{}'",
                current.name, current.condition.description, theirs.condition.description
            ));
        }
    }

    for theirs in &other.package_exceptions {
        if active.find_exception(&theirs.name).is_none() {
            differences.push(format!("exception '{}' added", theirs.name));
        }
    }

    if active.services.len() != other.services.len() {
        differences.push(format!(
            "services count changed from {} to {}",
            active.services.len(),
            other.services.len()
        ));
    }

    differences
}
