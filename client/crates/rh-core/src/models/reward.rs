use serde::{Deserialize, Serialize};

pub type RewardId = i64;

/// A redeemable reward. Immutable from the client's point of view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reward {
    pub id: RewardId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub cost: u64,
    #[serde(default)]
    pub is_coming_soon: bool,
}
