use serde::{Deserialize, Serialize};

/// Affordability of a single reward at a given balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RewardStatus {
    Unlocked,
    Locked,
    ComingSoon,
}

impl RewardStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unlocked => "unlocked",
            Self::Locked => "locked",
            Self::ComingSoon => "coming_soon",
        }
    }

    /// Whether the redeem control is enabled for this status.
    pub fn is_redeemable(&self) -> bool {
        matches!(self, Self::Unlocked)
    }
}
