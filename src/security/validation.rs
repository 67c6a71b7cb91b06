use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::Validation;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    // Requires at least one dot after @ for the TLD
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    ).unwrap()
});

pub const PASSWORD_MIN_LENGTH: usize = 7;
pub const PASSWORD_MAX_LENGTH: usize = 128;
pub const NAME_MAX_LENGTH: usize = 255;

/// Field rules shared by signup and profile updates
pub struct Validator;

impl Validator {
    /// Validates email address format
    ///
    /// ```
    /// use accounts::security::Validator;
    ///
    /// assert!(Validator::validate_email("userone@example.pl"));
    /// assert!(!Validator::validate_email("invalid-email"));
    /// ```
    pub fn validate_email(email: &str) -> bool {
        if email.is_empty() || email.len() > 255 {
            return false;
        }

        if email.contains("..") {
            return false;
        }

        EMAIL_REGEX.is_match(email)
    }

    /// Password rules: at least 7 characters once trimmed, at most 128, and
    /// it may not contain the word "password" in any casing.
    pub fn validate_password(password: &str) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let trimmed = password.trim();

        if trimmed.chars().count() < PASSWORD_MIN_LENGTH {
            errors.push(format!(
                "Password must be at least {PASSWORD_MIN_LENGTH} characters long"
            ));
        }

        if trimmed.chars().count() > PASSWORD_MAX_LENGTH {
            errors.push(format!(
                "Password must not exceed {PASSWORD_MAX_LENGTH} characters"
            ));
        }

        if trimmed.to_lowercase().contains("password") {
            errors.push("Password cannot contain \"password\"".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn validate_name(name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(format!("Name must not exceed {NAME_MAX_LENGTH} characters"));
        }
        Ok(())
    }

    /// Trims and lower-cases an email the way it is stored
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Record name/email/password problems on `validation`; email uniqueness
    /// is checked by the caller since it needs the database.
    pub fn check_profile(
        validation: &mut Validation,
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) {
        if let Some(name) = name {
            if let Err(message) = Self::validate_name(name) {
                validation.add("name", message);
            }
        }

        if let Some(email) = email {
            if email.is_empty() {
                validation.add("email", "Email is required");
            } else if !Self::validate_email(email) {
                validation.add("email", "Email is invalid");
            }
        }

        if let Some(password) = password {
            if let Err(messages) = Self::validate_password(password) {
                for message in messages {
                    validation.add("password", message);
                }
            }
        }
    }
}
