use std::panic::Location;

use error_location::ErrorLocation;
use rh_app::AppError;
use rh_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{source}")]
    Config {
        #[source]
        source: ConfigError,
        location: ErrorLocation,
    },

    #[error("{source}")]
    App {
        #[source]
        source: AppError,
        location: ErrorLocation,
    },

    #[error("Failed to initialize logger: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to read {what}: {source} {location}")]
    Input {
        what: &'static str,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to serialize output: {source} {location}")]
    Output {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Cannot open {requested}: redirected to {to} {location}")]
    Redirected {
        requested: &'static str,
        to: String,
        location: ErrorLocation,
    },
}

impl CliError {
    /// One line for stderr, without source locations.
    pub fn user_message(&self) -> String {
        match self {
            Self::App { source, .. } => source.user_message(),
            Self::Redirected { to, .. } if to == rh_app::guard::LOGIN_PATH => {
                String::from("Not signed in. Run `rewards login <email>` first.")
            }
            Self::Redirected { to, .. } if to == rh_app::guard::FORGOT_PASSWORD_PATH => {
                String::from(
                    "Invalid or expired reset session. Run `rewards forgot-password <email>`.",
                )
            }
            other => other.to_string(),
        }
    }

    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn input(what: &'static str, source: std::io::Error) -> Self {
        Self::Input {
            what,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn redirected(requested: &'static str, to: impl Into<String>) -> Self {
        Self::Redirected {
            requested,
            to: to.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for CliError {
    #[track_caller]
    fn from(source: ConfigError) -> Self {
        Self::Config {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<AppError> for CliError {
    #[track_caller]
    fn from(source: AppError) -> Self {
        Self::App {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Output {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
