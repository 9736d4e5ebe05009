use crate::error::ApiError;
use validator::ValidateEmail;

/// Lowercase and trim an email so lookups are case insensitive
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate email format using the validator crate
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Err(ApiError::Validation("Email cannot be empty".to_string()));
    }

    if !email.validate_email() {
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }

    Ok(())
}

/// bcrypt ignores everything past this many bytes
pub const BCRYPT_MAX_PASSWORD_BYTES: usize = 72;

/// Validate password strength.
///
/// Length is counted in characters; the byte cap keeps two passwords that
/// differ only past byte 72 from hashing identically.
pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < 8 {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if password.len() > BCRYPT_MAX_PASSWORD_BYTES {
        return Err(ApiError::Validation(format!(
            "Password must be at most {BCRYPT_MAX_PASSWORD_BYTES} bytes long"
        )));
    }

    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_number = password.chars().any(|c| c.is_numeric());

    if !has_letter || !has_number {
        return Err(ApiError::Validation(
            "Password must contain at least one letter and one number".to_string(),
        ));
    }

    Ok(())
}
