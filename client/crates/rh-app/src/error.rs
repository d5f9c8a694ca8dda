use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use rh_config::ConfigError;
use rh_core::{RewardId, RewardStatus};
use rh_remote::RemoteError;
use rh_session::SessionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {source} {location}")]
    Config {
        #[source]
        source: ConfigError,
        location: ErrorLocation,
    },

    #[error("Session error: {source} {location}")]
    Session {
        #[source]
        source: SessionError,
        location: ErrorLocation,
    },

    /// Shared because cached failures are handed to every waiting reader.
    #[error("Remote error: {source} {location}")]
    Remote {
        #[source]
        source: Arc<RemoteError>,
        location: ErrorLocation,
    },

    #[error("Not signed in {location}")]
    NotAuthenticated { location: ErrorLocation },

    #[error("A {mutation} request is already in progress {location}")]
    MutationPending {
        mutation: &'static str,
        location: ErrorLocation,
    },

    #[error("Daily points already claimed today {location}")]
    AlreadyClaimedToday { location: ErrorLocation },

    #[error("Reward {reward_id} not found {location}")]
    RewardNotFound {
        reward_id: RewardId,
        location: ErrorLocation,
    },

    #[error("Reward {reward_id} is {} {location}", .status.as_str())]
    RewardUnavailable {
        reward_id: RewardId,
        status: RewardStatus,
        location: ErrorLocation,
    },
}

impl AppError {
    /// Text for a notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { source, .. } => source.to_string(),
            Self::Session { source, .. } => source.user_message(),
            Self::Remote { source, .. } => source.message().to_string(),
            Self::NotAuthenticated { .. } => String::from("Please sign in to continue."),
            Self::MutationPending { .. } => String::from("Please wait, still working on it."),
            Self::AlreadyClaimedToday { .. } => {
                String::from("You've already claimed your points today.")
            }
            Self::RewardNotFound { .. } => String::from("That reward no longer exists."),
            Self::RewardUnavailable { status, .. } => match status {
                RewardStatus::ComingSoon => String::from("This reward is coming soon."),
                _ => String::from("You don't have enough points for this reward yet."),
            },
        }
    }

    /// Whether the failure came from the backend's token check.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::NotAuthenticated { .. } => true,
            Self::Remote { source, .. } => source.is_unauthorized(),
            Self::Session { source, .. } => matches!(source, SessionError::NotAuthenticated { .. }),
            _ => false,
        }
    }

    #[track_caller]
    pub fn not_authenticated() -> Self {
        Self::NotAuthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn mutation_pending(mutation: &'static str) -> Self {
        Self::MutationPending {
            mutation,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn already_claimed_today() -> Self {
        Self::AlreadyClaimedToday {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn reward_not_found(reward_id: RewardId) -> Self {
        Self::RewardNotFound {
            reward_id,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn reward_unavailable(reward_id: RewardId, status: RewardStatus) -> Self {
        Self::RewardUnavailable {
            reward_id,
            status,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for AppError {
    #[track_caller]
    fn from(source: ConfigError) -> Self {
        Self::Config {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<SessionError> for AppError {
    #[track_caller]
    fn from(source: SessionError) -> Self {
        Self::Session {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<Arc<RemoteError>> for AppError {
    #[track_caller]
    fn from(source: Arc<RemoteError>) -> Self {
        Self::Remote {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<RemoteError> for AppError {
    #[track_caller]
    fn from(source: RemoteError) -> Self {
        Self::from(Arc::new(source))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
