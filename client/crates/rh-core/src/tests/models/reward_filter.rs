use crate::{RewardFilter, RewardStatus};

use std::str::FromStr;

#[test]
fn test_reward_filter_as_str() {
    assert_eq!(RewardFilter::All.as_str(), "all");
    assert_eq!(RewardFilter::Unlocked.as_str(), "unlocked");
    assert_eq!(RewardFilter::Locked.as_str(), "locked");
    assert_eq!(RewardFilter::ComingSoon.as_str(), "coming_soon");
}

#[test]
fn test_reward_filter_from_str() {
    assert_eq!(RewardFilter::from_str("all").unwrap(), RewardFilter::All);
    assert_eq!(
        RewardFilter::from_str("coming-soon").unwrap(),
        RewardFilter::ComingSoon
    );
    assert_eq!(
        RewardFilter::from_str("coming_soon").unwrap(),
        RewardFilter::ComingSoon
    );
    assert!(RewardFilter::from_str("cheap").is_err());
}

#[test]
fn test_reward_filter_default_is_all() {
    assert_eq!(RewardFilter::default(), RewardFilter::All);
}

#[test]
fn test_only_unlocked_is_redeemable() {
    assert!(RewardStatus::Unlocked.is_redeemable());
    assert!(!RewardStatus::Locked.is_redeemable());
    assert!(!RewardStatus::ComingSoon.is_redeemable());
}
