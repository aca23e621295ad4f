//! Validation utilities.

use crate::{CachewiseError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `CachewiseError` on failure.
    fn validate_request(&self) -> Result<(), CachewiseError> {
        self.validate().map_err(validation_errors_to_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `CachewiseError`.
#[must_use]
pub fn validation_errors_to_error(errors: ValidationErrors) -> CachewiseError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    CachewiseError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use crate::Salary;
    use bigdecimal::BigDecimal;
    use validator::ValidationError;

    /// Largest number of fractional digits a stored salary keeps.
    pub const SALARY_SCALE: i64 = 2;

    /// Integer digits a stored salary can hold (`DECIMAL(18, 2)`).
    const SALARY_INTEGER_DIGITS: u32 = 16;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that a salary is non-negative and fits the stored column.
    pub fn salary(value: &Salary) -> Result<(), ValidationError> {
        if value.is_negative() {
            return Err(ValidationError::new("negative_salary")
                .with_message("Salary cannot be negative".into()));
        }
        if value.fractional_digits() > SALARY_SCALE {
            return Err(ValidationError::new("salary_scale")
                .with_message("Salary cannot have more than two decimal places".into()));
        }
        if value.amount() >= &BigDecimal::from(10_i64.pow(SALARY_INTEGER_DIGITS)) {
            return Err(ValidationError::new("salary_range")
                .with_message("Salary is too large".into()));
        }
        Ok(())
    }
}
