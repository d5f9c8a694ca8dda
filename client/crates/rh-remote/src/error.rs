use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

const UNAUTHORIZED_CODES: &[&str] = &["bad_jwt", "session_not_found", "PGRST301", "PGRST303"];

/// Errors that can occur talking to the backend
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error: {message} (code: {code}) {location}")]
    Api {
        status: u16,
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },
}

impl RemoteError {
    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        RemoteError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        RemoteError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Create an API error with location
    #[track_caller]
    pub fn api_error(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        RemoteError::Api {
            status,
            code: code.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Machine-readable code: backend code for API errors, a transport
    /// category otherwise.
    pub fn code(&self) -> &str {
        match self {
            Self::Http { source, .. } if source.is_timeout() => "TIMEOUT",
            Self::Http { .. } => "NETWORK",
            Self::Api { code, .. } => code,
            Self::Json { .. } => "INVALID_RESPONSE",
        }
    }

    /// Message suitable for showing to the user verbatim.
    pub fn message(&self) -> &str {
        match self {
            Self::Http { message, .. } | Self::Api { message, .. } | Self::Json { message, .. } => {
                message
            }
        }
    }

    /// Whether the backend rejected the access token itself.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Api { status, code, .. } => {
                *status == 401 || UNAUTHORIZED_CODES.contains(&code.as_str())
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        RemoteError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for RemoteError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        RemoteError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, RemoteError>;
