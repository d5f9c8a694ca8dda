//! Form validation that runs before any auth request is sent.

use crate::{CoreError, CoreResult};

use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;
use serde::Serialize;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords don't match";

/// Field-scoped messages, shown next to the offending input rather than
/// as a notification.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FormErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = [("email", &self.email), ("password", &self.password)]
            .into_iter()
            .filter_map(|(field, message)| message.as_ref().map(|m| format!("{field}: {m}")))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Credentials entered on the sign-in / sign-up form.
#[derive(Clone)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
}

impl AuthForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    #[track_caller]
    pub fn validate(&self, min_password_length: usize) -> CoreResult<()> {
        let errors = FormErrors {
            email: validate_email(&self.email).err(),
            password: validate_password(&self.password, min_password_length).err(),
        };

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidForm {
                errors,
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}

impl fmt::Debug for AuthForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// New password plus its confirmation, from the reset-password form.
#[derive(Clone)]
pub struct NewPasswordForm {
    pub password: String,
    pub confirm: String,
}

impl NewPasswordForm {
    #[track_caller]
    pub fn validate(&self, min_password_length: usize) -> CoreResult<()> {
        if self.password != self.confirm {
            return Err(CoreError::Validation {
                message: PASSWORDS_DO_NOT_MATCH.to_string(),
                field: Some("confirm".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        validate_password(&self.password, min_password_length).map_err(|message| {
            CoreError::Validation {
                message,
                field: Some("password".to_string()),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }
}

/// `validate_email` as a field-scoped [`CoreError::Validation`], for the
/// single-field forgot-password form.
#[track_caller]
pub fn require_valid_email(email: &str) -> CoreResult<()> {
    let location = ErrorLocation::from(Location::caller());

    validate_email(email).map_err(|message| CoreError::Validation {
        message,
        field: Some("email".to_string()),
        location,
    })
}

pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(EMAIL_REQUIRED.to_string());
    }
    if is_plausible_email(email) {
        Ok(())
    } else {
        Err(EMAIL_INVALID.to_string())
    }
}

pub fn validate_password(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
