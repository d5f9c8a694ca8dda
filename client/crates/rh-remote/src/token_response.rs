use chrono::{DateTime, Duration, Utc};
use rh_core::{AuthUser, Session};
use serde::Deserialize;

const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;
const DEFAULT_TOKEN_TYPE: &str = "bearer";

/// Session payload returned by the token, sign-up and refresh endpoints.
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Unix seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

impl TokenResponse {
    pub fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(|| {
                now + Duration::seconds(self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS))
            });

        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: self
                .token_type
                .unwrap_or_else(|| String::from(DEFAULT_TOKEN_TYPE)),
            expires_at,
            user: self.user,
        }
    }
}
