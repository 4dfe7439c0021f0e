//! Input validation for cloud resource parameters.
//!
//! One pure function per (provider, field) pair. Each function trims its
//! input, accepts it and returns the canonical value, or fails with a
//! `ValidationError` carrying a human-readable reason. Everything here is
//! fail-closed: values are rejected unless affirmatively recognized, and
//! nothing is ever forwarded to a provider API unchecked.

pub mod aws;
pub mod common;
pub mod gcp;

use crate::error::ValidationError;

/// Trim and reject empty input with a field-specific message.
pub(crate) fn require_nonempty<'a>(
    value: &'a str,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed)
}
