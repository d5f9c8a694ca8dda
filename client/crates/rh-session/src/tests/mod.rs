mod fake_backend;

use rh_core::{AuthUser, Session};

use chrono::{Duration, Utc};
use uuid::Uuid;

pub(crate) const USER_ID: &str = "00000000-0000-0000-0000-000000000001";

pub(crate) fn user() -> AuthUser {
    AuthUser {
        id: Uuid::parse_str(USER_ID).unwrap(),
        email: Some("explorer@example.com".to_string()),
    }
}

pub(crate) fn session_expiring_in(duration: Duration) -> Session {
    Session {
        access_token: "access-1".to_string(),
        refresh_token: Some("refresh-1".to_string()),
        token_type: "bearer".to_string(),
        expires_at: Utc::now() + duration,
        user: user(),
    }
}
