use crate::{CoreError, CoreResult, RewardStatus};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Category tab on the redeem view.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RewardFilter {
    #[default]
    All,
    Unlocked,
    Locked,
    ComingSoon,
}

impl RewardFilter {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Unlocked => "unlocked",
            Self::Locked => "locked",
            Self::ComingSoon => "coming_soon",
        }
    }

    pub fn matches(&self, status: RewardStatus) -> bool {
        match self {
            Self::All => true,
            Self::Unlocked => status == RewardStatus::Unlocked,
            Self::Locked => status == RewardStatus::Locked,
            Self::ComingSoon => status == RewardStatus::ComingSoon,
        }
    }
}

impl FromStr for RewardFilter {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "all" => Ok(Self::All),
            "unlocked" => Ok(Self::Unlocked),
            "locked" => Ok(Self::Locked),
            "coming_soon" | "coming-soon" => Ok(Self::ComingSoon),
            _ => Err(CoreError::InvalidRewardFilter {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
