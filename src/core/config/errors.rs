//! Configuration error types and validation traits.

use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Error indicating that a configuration file could not be read or parsed.
    #[error("failed to load configuration from {}: {message}", .path.display())]
    LoadFailed {
        path: std::path::PathBuf,
        message: String,
    },

    /// Error indicating that a resource limit has been exceeded.
    #[error("resource limit exceeded: {message}")]
    ResourceLimitExceeded { message: String },
}

/// A trait for validating configuration parameters.
///
/// Implementors provide [`ConfigValidator::validate`] and
/// [`ConfigValidator::get_defaults`]; the remaining methods are reusable checks.
pub trait ConfigValidator {
    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Returns the default configuration.
    fn get_defaults() -> Self
    where
        Self: Sized;

    /// Validates a thread count.
    ///
    /// The count must be positive and no larger than the available parallelism
    /// times four.
    fn validate_thread_count(&self, thread_count: usize) -> Result<(), ConfigError> {
        if thread_count == 0 {
            return Err(ConfigError::InvalidConfig {
                message: "Thread count must be greater than 0".to_string(),
            });
        }

        let max_threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            * 4;
        if thread_count > max_threads {
            return Err(ConfigError::ResourceLimitExceeded {
                message: format!(
                    "Thread count {} exceeds maximum allowed {}",
                    thread_count, max_threads
                ),
            });
        }

        Ok(())
    }

    /// Validates that a usize value is positive.
    fn validate_positive_usize(&self, value: usize, field_name: &str) -> Result<(), ConfigError> {
        if value == 0 {
            return Err(ConfigError::InvalidConfig {
                message: format!("{} must be greater than 0", field_name),
            });
        }
        Ok(())
    }

    /// Validates that a string value is not blank.
    fn validate_non_empty(&self, value: &str, field_name: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidConfig {
                message: format!("{} must not be empty", field_name),
            });
        }
        Ok(())
    }
}

/// Extension trait for validating a configuration and handing it back.
pub trait ConfigValidatorExt: ConfigValidator + Sized {
    /// Validates and returns self, converting failures into the crate error.
    fn validate_and_wrap(self) -> Result<Self, crate::core::errors::GlyphError> {
        self.validate()?;
        Ok(self)
    }
}

impl<T: ConfigValidator> ConfigValidatorExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestValidator;

    impl ConfigValidator for TestValidator {
        fn validate(&self) -> Result<(), ConfigError> {
            Ok(())
        }

        fn get_defaults() -> Self {
            Self
        }
    }

    #[test]
    fn test_validate_thread_count() {
        let validator = TestValidator;
        assert!(validator.validate_thread_count(1).is_ok());
        assert!(validator.validate_thread_count(0).is_err());
        assert!(validator.validate_thread_count(usize::MAX).is_err());
    }

    #[test]
    fn test_validate_positive_usize() {
        let validator = TestValidator;
        assert!(validator.validate_positive_usize(1, "pool").is_ok());
        let err = validator.validate_positive_usize(0, "pool").unwrap_err();
        assert!(err.to_string().contains("pool must be greater than 0"));
    }

    #[test]
    fn test_validate_non_empty() {
        let validator = TestValidator;
        assert!(validator.validate_non_empty("mnist.onnx", "digit_model").is_ok());
        assert!(validator.validate_non_empty("  ", "digit_model").is_err());
    }
}
