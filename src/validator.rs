// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Form input validation.
//!
//! An identifier is accepted only if it is present, non-empty and made
//! entirely of ASCII letters, digits, `-` and `_`.

use thiserror::Error;
use tracing::debug;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing {0}")]
    MissingField(&'static str),

    #[error("ID contains invalid characters")]
    InvalidCharacters { field: &'static str, value: String },
}

impl ValidationError {
    /// The submitted value to echo back to the form, if any.
    pub fn echoed_value(&self) -> &str {
        match self {
            Self::MissingField(_) => "",
            Self::InvalidCharacters { value, .. } => value,
        }
    }
}

/// Result of validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Input is valid
    Valid,
    /// Input is invalid
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(e) => Some(e),
        }
    }
}

/// Validator for the demo form action.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormValidator;

impl FormValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate the `id` field.
    pub fn validate_id(&self, id: Option<&str>) -> ValidationResult {
        let id = match id {
            Some(id) if !id.is_empty() => id,
            _ => {
                debug!("Missing id field");
                return ValidationResult::Invalid(ValidationError::MissingField("id"));
            }
        };

        if !id.chars().all(is_id_char) {
            debug!(id = %id, "Id contains invalid characters");
            return ValidationResult::Invalid(ValidationError::InvalidCharacters {
                field: "id",
                value: id.to_string(),
            });
        }

        ValidationResult::Valid
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
