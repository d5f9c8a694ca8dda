pub mod dashboard;
pub mod error;
pub mod models;
pub mod validation;

#[cfg(test)]
mod tests;

pub use dashboard::{
    GIFT_CARD_GOAL_POINTS, RewardCounts, filter_rewards, is_claimed_today, points_progress_percent,
    referral_link, reward_status, weekday_index,
};
pub use error::{CoreError, Result as CoreResult};
pub use models::auth_user::AuthUser;
pub use models::claim_outcome::{ClaimOutcome, RpcOutcome};
pub use models::profile::Profile;
pub use models::redeem_outcome::RedeemOutcome;
pub use models::reward::{Reward, RewardId};
pub use models::reward_filter::RewardFilter;
pub use models::reward_status::RewardStatus;
pub use models::session::Session;
pub use validation::{AuthForm, FormErrors, NewPasswordForm};
