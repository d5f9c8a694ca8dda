use crate::Profile;

use chrono::{TimeZone, Utc};
use serde_json::json;

#[test]
fn test_profile_deserializes_full_row() {
    let profile: Profile = serde_json::from_value(json!({
        "id": "5b0c8a7e-1f2d-4c6b-9a3e-000000000001",
        "first_name": "Ada",
        "points_balance": 1250,
        "current_streak": 4,
        "last_check_in": "2026-10-15T08:30:00+00:00",
        "referral_count": 2,
        "referral_points": 50,
        "has_shared_stack": true,
        "created_at": "2026-01-01T00:00:00+00:00"
    }))
    .unwrap();

    assert_eq!(profile.first_name.as_deref(), Some("Ada"));
    assert_eq!(profile.points_balance, 1250);
    assert_eq!(profile.current_streak, 4);
    assert_eq!(
        profile.last_check_in,
        Some(Utc.with_ymd_and_hms(2026, 10, 15, 8, 30, 0).unwrap())
    );
    assert!(profile.has_shared_stack);
}

#[test]
fn test_profile_missing_counters_default_to_zero() {
    let profile: Profile = serde_json::from_value(json!({
        "id": "5b0c8a7e-1f2d-4c6b-9a3e-000000000001",
        "last_check_in": null
    }))
    .unwrap();

    assert_eq!(profile.points_balance, 0);
    assert_eq!(profile.current_streak, 0);
    assert_eq!(profile.referral_count, 0);
    assert!(profile.last_check_in.is_none());
    assert!(!profile.has_shared_stack);
}

#[test]
fn test_profile_null_counters_read_as_zero() {
    let profile: Profile = serde_json::from_value(json!({
        "id": "5b0c8a7e-1f2d-4c6b-9a3e-000000000001",
        "first_name": null,
        "points_balance": null,
        "current_streak": null,
        "last_check_in": null,
        "referral_count": null,
        "referral_points": null,
        "has_shared_stack": null
    }))
    .unwrap();

    assert_eq!(profile.points_balance, 0);
    assert_eq!(profile.current_streak, 0);
    assert_eq!(profile.referral_count, 0);
    assert_eq!(profile.referral_points, 0);
    assert!(!profile.has_shared_stack);
}

#[test]
fn test_profile_accepts_date_only_check_in() {
    let profile: Profile = serde_json::from_value(json!({
        "id": "5b0c8a7e-1f2d-4c6b-9a3e-000000000001",
        "last_check_in": "2026-10-15"
    }))
    .unwrap();

    assert_eq!(
        profile.last_check_in,
        Some(Utc.with_ymd_and_hms(2026, 10, 15, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_profile_accepts_postgres_timestamptz_text() {
    let profile: Profile = serde_json::from_value(json!({
        "id": "5b0c8a7e-1f2d-4c6b-9a3e-000000000001",
        "last_check_in": "2026-10-15 23:59:59.123+00"
    }))
    .unwrap();

    let check_in = profile.last_check_in.unwrap();
    assert_eq!(check_in.date_naive().to_string(), "2026-10-15");
}

#[test]
fn test_profile_rejects_garbage_check_in() {
    let result: Result<Profile, _> = serde_json::from_value(json!({
        "id": "5b0c8a7e-1f2d-4c6b-9a3e-000000000001",
        "last_check_in": "yesterday-ish"
    }));

    assert!(result.is_err());
}
