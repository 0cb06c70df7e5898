use crate::utils::error::{RecordError, Result};

/// Checks a value's own invariants before it is used or written.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Rejects NaN and infinities.
pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(RecordError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

/// Rejects empty or whitespace-only strings.
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RecordError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// A value that is used as a single directory or file name.
pub fn validate_path_component(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if value.contains(['/', '\\', '\0']) || value == "." || value == ".." {
        return Err(RecordError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot contain path separators or null bytes".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("pulse_interval", 0.5).is_ok());
        assert!(validate_finite("pulse_interval", -2.0).is_ok());
        assert!(validate_finite("pulse_interval", f64::NAN).is_err());
        assert!(validate_finite("pulse_interval", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("id", "operator").is_ok());
        assert!(validate_non_empty_string("id", "").is_err());
        assert!(validate_non_empty_string("id", "   ").is_err());
    }

    #[test]
    fn test_validate_path_component() {
        assert!(validate_path_component("id", "admin").is_ok());
        assert!(validate_path_component("id", "a/b").is_err());
        assert!(validate_path_component("id", "a\\b").is_err());
        assert!(validate_path_component("id", "..").is_err());
    }
}
