//! Shared threshold validation helpers.
//!
//! Provides reusable range-checking functions used by multiple domain modules.

use crate::error::CoreError;

/// Validate that a count is within `[1, max]`.
///
/// `label` prefixes the error message, e.g. `"Planning"` produces
/// "Planning requires at least 1 item".
pub fn validate_count_range(count: usize, max: usize, label: &str) -> Result<(), CoreError> {
    if count == 0 {
        return Err(CoreError::Validation(format!(
            "{label} requires at least 1 item"
        )));
    }
    validate_max_count(count, max, label)
}

/// Validate that a count does not exceed `max`. Zero is accepted.
pub fn validate_max_count(count: usize, max: usize, label: &str) -> Result<(), CoreError> {
    if count > max {
        return Err(CoreError::Validation(format!(
            "{label} accepts at most {max} items, got {count}"
        )));
    }
    Ok(())
}

/// Validate that a weight (or any gram quantity) is finite and `>= 0.0`.
pub fn validate_non_negative(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!(
            "{name} must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    Ok(())
}
