//! Configuration validation support

use config::ConfigError;
use serde::{Deserialize, Serialize};

/// Trait for validating configuration values
pub trait ValidateConfig: Serialize + for<'de> Deserialize<'de> {
    /// Validate the configuration
    ///
    /// Returns Ok(()) if valid, or an error describing what's wrong
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Common validation helpers
pub mod validators {
    use config::ConfigError;

    /// Validate that a string is not empty
    pub fn validate_not_empty(value: &str, field: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::Message(format!("{field}: cannot be empty")));
        }
        Ok(())
    }

    /// Validate that a value is within range
    pub fn validate_range<T: PartialOrd + std::fmt::Display>(
        value: T,
        min: T,
        max: T,
        field: &str,
    ) -> Result<(), ConfigError> {
        if value < min || value > max {
            return Err(ConfigError::Message(format!(
                "{field}: must be between {min} and {max}"
            )));
        }
        Ok(())
    }

    /// Validate a navigation target: a same-origin absolute path or an http(s) URL
    pub fn validate_logout_target(target: &str, field: &str) -> Result<(), ConfigError> {
        validate_not_empty(target, field)?;

        // "//host/path" is protocol-relative and leaves the origin
        if target.starts_with('/') && !target.starts_with("//") {
            return Ok(());
        }

        let url = url::Url::parse(target)
            .map_err(|e| ConfigError::Message(format!("{field}: invalid URL - {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ConfigError::Message(format!(
                "{field}: unsupported scheme '{scheme}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("lastActivity", "storage_key").is_ok());
        let err = validate_not_empty("   ", "storage_key").unwrap_err();
        assert!(err.to_string().contains("storage_key: cannot be empty"));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(5, 1, 10, "n").is_ok());
        assert!(validate_range(0, 1, 10, "n").is_err());
        assert!(validate_range(11, 1, 10, "n").is_err());
    }

    #[test]
    fn test_validate_logout_target() {
        assert!(validate_logout_target("/auth/logout", "logout_path").is_ok());
        assert!(validate_logout_target("https://example.com/logout", "logout_path").is_ok());

        assert!(validate_logout_target("auth/logout", "logout_path").is_err());
        assert!(validate_logout_target("//evil.example/logout", "logout_path").is_err());
        assert!(validate_logout_target("javascript:alert(1)", "logout_path").is_err());
        assert!(validate_logout_target("", "logout_path").is_err());
    }
}
