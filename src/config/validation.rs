//! Configuration validation.

use crate::domain::ValidationError;

use super::Config;

/// Validate configuration.
///
/// Stops at the first violation, checking services before exceptions and
/// each list in document order.
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    if config.services.is_empty() {
        return Err(ValidationError::NoServices);
    }

    for (index, service) in config.services.iter().enumerate() {
        if service.service_name.is_empty() {
            return Err(ValidationError::EmptyServiceName { index });
        }
        let name = || service.service_name.clone();

        if service.package_path.is_empty() {
            return Err(ValidationError::EmptyPackagePath {
                index,
                service: name(),
            });
        }

        if service.creation_functions.is_empty() {
            return Err(ValidationError::NoCreationFunctions {
                index,
                service: name(),
            });
        }

        if service.cleanup_methods.is_empty() {
            return Err(ValidationError::NoCleanupMethods {
                index,
                service: name(),
            });
        }

        if let Some(method_index) = service.cleanup_methods.iter().position(|m| m.method.is_empty()) {
            return Err(ValidationError::EmptyCleanupMethod {
                index,
                service: name(),
                method_index,
            });
        }
    }

    for (index, exception) in config.package_exceptions.iter().enumerate() {
        if exception.name.is_empty() {
            return Err(ValidationError::EmptyExceptionName { index });
        }

        if exception.pattern.is_empty() {
            return Err(ValidationError::EmptyPattern {
                index,
                name: exception.name.clone(),
            });
        }

        if exception.condition.kind().is_none() {
            return Err(ValidationError::InvalidConditionType {
                index,
                name: exception.name.clone(),
                kind: exception.condition.condition_type.clone(),
            });
        }
    }

    Ok(())
}
