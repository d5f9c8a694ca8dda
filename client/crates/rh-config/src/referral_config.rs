use crate::DEFAULT_REFERRAL_BASE_URL;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferralConfig {
    /// Sign-up page the referral code is appended to
    pub base_url: String,
}

impl Default for ReferralConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_REFERRAL_BASE_URL),
        }
    }
}
