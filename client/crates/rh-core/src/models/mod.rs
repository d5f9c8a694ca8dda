pub mod auth_user;
pub mod claim_outcome;
pub mod profile;
pub mod redeem_outcome;
pub mod reward;
pub mod reward_filter;
pub mod reward_status;
pub mod session;
