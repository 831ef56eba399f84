//! Input validation utilities.

use regex::Regex;
use crate::types::UserError;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), UserError> {
    let email_regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .map_err(|_| UserError::InvalidEmail)?;

    if email.len() > 255 || !email_regex.is_match(email) {
        return Err(UserError::InvalidEmail);
    }

    Ok(())
}
