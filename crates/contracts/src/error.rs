//! Layered error definitions
//!
//! Categorized by source: config, input and io

use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// Unified error type
///
/// "No alignment found" is deliberately absent: it is an
/// [`AlignmentOutcome`](crate::AlignmentOutcome), not a failure.
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Input Errors =====
    /// Caller supplied a value outside the accepted domain
    #[error("invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create invalid input error
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Convert `validator` output into a single validation error.
    ///
    /// Fields are visited in name order so the reported field is stable.
    /// Struct-level (schema) errors come last and are reported against
    /// `section` itself.
    pub fn from_validation(section: &str, errors: &ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(name, _)| {
            let name: &str = name.as_ref();
            (name == "__all__", name.to_string())
        });

        let Some((field, errs)) = fields.first() else {
            return Self::config_validation(section, errors.to_string());
        };

        let name: &str = field.as_ref();
        let path = if name == "__all__" {
            section.to_string()
        } else {
            format!("{section}.{name}")
        };
        let message = errs
            .first()
            .map(describe)
            .unwrap_or_else(|| "invalid value".to_string());

        Self::config_validation(path, message)
    }
}

fn describe(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => error.code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = ContractError::invalid_input("junk_bits", "must be >= 0, got -3");
        assert_eq!(
            err.to_string(),
            "invalid input for 'junk_bits': must be >= 0, got -3"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ContractError = io.into();
        assert!(matches!(err, ContractError::Io(_)));
    }
}
