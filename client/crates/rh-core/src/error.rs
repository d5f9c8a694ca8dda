use crate::FormErrors;

use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Invalid form: {errors} {location}")]
    InvalidForm {
        errors: FormErrors,
        location: ErrorLocation,
    },

    #[error("Invalid reward filter: {value} {location}")]
    InvalidRewardFilter {
        value: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
