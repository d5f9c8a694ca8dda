use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use rh_core::CoreError;
use rh_remote::RemoteError;
use thiserror::Error;

/// Errors from session management.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Rejected credentials, duplicate sign-up, expired session. The
    /// message is the backend's, verbatim.
    #[error("Authentication failed: {message} {location}")]
    Auth {
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Not signed in {location}")]
    NotAuthenticated { location: ErrorLocation },

    #[error("{source} {location}")]
    Validation {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Backend unavailable: {source} {location}")]
    Remote {
        #[source]
        source: RemoteError,
        location: ErrorLocation,
    },

    #[error("Failed to create directory at {path}: {source} {location}")]
    DirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to read session file at {path}: {source} {location}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to write session file at {path}: {source} {location}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to serialize session: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Atomic rename failed from {from} to {to}: {source} {location}")]
    AtomicRename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to backup corrupted file: {source} {location}")]
    BackupFailed {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl SessionError {
    /// Whether retrying the same action might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Remote { .. }
                | Self::FileRead { .. }
                | Self::FileWrite { .. }
                | Self::AtomicRename { .. }
        )
    }

    /// Text for a notification: backend messages pass through untouched.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth { message, .. } => message.clone(),
            Self::NotAuthenticated { .. } => {
                String::from("Your session has expired. Please sign in again.")
            }
            Self::Validation { source, .. } => match source {
                CoreError::Validation { message, .. } => message.clone(),
                CoreError::InvalidForm { errors, .. } => errors.to_string(),
                other => other.to_string(),
            },
            Self::Remote { source, .. } => source.message().to_string(),
            Self::DirCreation { .. }
            | Self::FileRead { .. }
            | Self::FileWrite { .. }
            | Self::Serialization { .. }
            | Self::AtomicRename { .. }
            | Self::BackupFailed { .. } => {
                String::from("Unable to save your session. Check disk space and file permissions.")
            }
        }
    }

    /// Creates Auth error at caller location.
    #[track_caller]
    pub fn auth(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Auth {
            code: code.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates NotAuthenticated error at caller location.
    #[track_caller]
    pub fn not_authenticated() -> Self {
        Self::NotAuthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates DirCreation error at caller location.
    #[track_caller]
    pub fn dir_creation(path: PathBuf, source: std::io::Error) -> Self {
        Self::DirCreation {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates FileRead error at caller location.
    #[track_caller]
    pub fn file_read(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileRead {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates FileWrite error at caller location.
    #[track_caller]
    pub fn file_write(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileWrite {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates AtomicRename error at caller location.
    #[track_caller]
    pub fn atomic_rename(from: PathBuf, to: PathBuf, source: std::io::Error) -> Self {
        Self::AtomicRename {
            from,
            to,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for SessionError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Validation {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Backend rejections become `Auth`; transport and decoding failures stay
/// `Remote`.
impl From<RemoteError> for SessionError {
    #[track_caller]
    fn from(source: RemoteError) -> Self {
        match source {
            RemoteError::Api { code, message, .. } => Self::Auth {
                code,
                message,
                location: ErrorLocation::from(Location::caller()),
            },
            source => Self::Remote {
                source,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

impl From<serde_json::Error> for SessionError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
