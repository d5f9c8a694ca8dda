//! Pure derivations behind the dashboard view.
//!
//! Nothing in here mutates its inputs; every function is recomputed from
//! the latest profile and reward data whenever the cache settles.

use crate::{Reward, RewardFilter, RewardStatus};

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

/// Points needed for the first gift card tier.
pub const GIFT_CARD_GOAL_POINTS: u64 = 5000;

/// Suffix appended to every referral code.
const REFERRAL_CODE_SUFFIX: &str = "3670";
const DEFAULT_REFERRAL_NAME: &str = "user";

/// Classify a reward against the current balance.
///
/// Coming-soon rewards are reported as such regardless of cost.
pub fn reward_status(reward: &Reward, balance: u64) -> RewardStatus {
    if reward.is_coming_soon {
        RewardStatus::ComingSoon
    } else if balance >= reward.cost {
        RewardStatus::Unlocked
    } else {
        RewardStatus::Locked
    }
}

/// Rewards visible under `filter`, in their original order.
pub fn filter_rewards(rewards: &[Reward], balance: u64, filter: RewardFilter) -> Vec<&Reward> {
    rewards
        .iter()
        .filter(|reward| filter.matches(reward_status(reward, balance)))
        .collect()
}

/// Tab counters for the redeem view.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct RewardCounts {
    pub all: usize,
    pub unlocked: usize,
    pub locked: usize,
    pub coming_soon: usize,
}

impl RewardCounts {
    pub fn from_rewards(rewards: &[Reward], balance: u64) -> Self {
        rewards.iter().fold(
            RewardCounts {
                all: rewards.len(),
                ..Default::default()
            },
            |mut counts, reward| {
                match reward_status(reward, balance) {
                    RewardStatus::Unlocked => counts.unlocked += 1,
                    RewardStatus::Locked => counts.locked += 1,
                    RewardStatus::ComingSoon => counts.coming_soon += 1,
                }
                counts
            },
        )
    }

    pub fn for_filter(&self, filter: RewardFilter) -> usize {
        match filter {
            RewardFilter::All => self.all,
            RewardFilter::Unlocked => self.unlocked,
            RewardFilter::Locked => self.locked,
            RewardFilter::ComingSoon => self.coming_soon,
        }
    }
}

/// True when the last check-in falls on the same UTC calendar day as `now`.
pub fn is_claimed_today(last_check_in: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    last_check_in.is_some_and(|checked_in| checked_in.date_naive() == now.date_naive())
}

/// Progress toward `goal`, as a whole percentage capped at 100.
pub fn points_progress_percent(points: u64, goal: u64) -> u8 {
    if goal == 0 {
        return 100;
    }
    let percent = points.saturating_mul(100) / goal;
    percent.min(100) as u8
}

/// Monday-based index (0..=6) used to highlight today on the streak strip.
pub fn weekday_index(now: DateTime<Utc>) -> usize {
    now.weekday().num_days_from_monday() as usize
}

pub fn referral_link(base_url: &str, first_name: Option<&str>) -> String {
    let name = first_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_REFERRAL_NAME);
    format!("{base_url}?ref={name}{REFERRAL_CODE_SUFFIX}")
}
