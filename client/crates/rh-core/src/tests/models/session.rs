use crate::{AuthUser, Session};

use chrono::{Duration, Utc};
use uuid::Uuid;

fn session_expiring_in(duration: Duration) -> Session {
    Session {
        access_token: "secret-access-token".to_string(),
        refresh_token: Some("secret-refresh-token".to_string()),
        token_type: "bearer".to_string(),
        expires_at: Utc::now() + duration,
        user: AuthUser {
            id: Uuid::new_v4(),
            email: Some("ada@example.com".to_string()),
        },
    }
}

#[test]
fn test_session_valid_for_an_hour_is_not_expired() {
    let session = session_expiring_in(Duration::hours(1));
    assert!(!session.is_expired(Utc::now()));
}

#[test]
fn test_session_inside_margin_is_expired() {
    let session = session_expiring_in(Duration::seconds(30));
    assert!(session.is_expired(Utc::now()));
}

#[test]
fn test_session_debug_hides_tokens() {
    let session = session_expiring_in(Duration::hours(1));
    let debug = format!("{session:?}");

    assert!(!debug.contains("secret-access-token"));
    assert!(!debug.contains("secret-refresh-token"));
    assert!(debug.contains("ada@example.com"));
}
