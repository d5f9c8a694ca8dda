use crate::QueryKey;

use uuid::Uuid;

#[test]
fn test_profile_key_display() {
    let id = Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap();
    assert_eq!(
        QueryKey::profile(id).to_string(),
        "profile:00000000-0000-0000-0000-000000000001"
    );
}

#[test]
fn test_rewards_key_display() {
    assert_eq!(QueryKey::Rewards.to_string(), "rewards");
}

#[test]
fn test_profile_keys_distinct_per_user() {
    assert_ne!(
        QueryKey::profile(Uuid::new_v4()),
        QueryKey::profile(Uuid::new_v4())
    );
}
