//! Validation helpers
//! 
//! Custom validators used from `#[validate(custom = "...")]` attributes on the
//! request DTOs.

use validator::ValidationError;

use crate::models::TimeSlot;

/// Required text fields must contain something other than whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("This field is required".into());
        return Err(error);
    }
    Ok(())
}

/// Slots must parse as `HH:MM - HH:MM`
pub fn validate_time_slot(value: &str) -> Result<(), ValidationError> {
    value.parse::<TimeSlot>().map(|_| ()).map_err(|e| {
        let mut error = ValidationError::new("time_slot");
        error.add_param("value".into(), &value.to_string());
        error.message = Some(e.to_string().into());
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Plant A").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_validate_time_slot() {
        assert!(validate_time_slot("08:00 - 10:00").is_ok());
        assert!(validate_time_slot("morning").is_err());
    }
}
