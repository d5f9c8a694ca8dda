use crate::RemoteResult;

use async_trait::async_trait;
use rh_core::{ClaimOutcome, Profile, RedeemOutcome, Reward, RewardId, Session};
use uuid::Uuid;

/// Every capability the client needs from the backend-as-a-service.
///
/// Calls that act on behalf of a user take that user's access token; the
/// implementation falls back to the public key where no token is given.
#[async_trait]
pub trait Backend: Send + Sync {
    // Auth
    async fn sign_in_with_password(&self, email: &str, password: &str) -> RemoteResult<Session>;

    /// Returns `None` when the account was created but needs confirmation
    /// before a session is issued.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
    ) -> RemoteResult<Option<Session>>;

    async fn refresh_session(&self, refresh_token: &str) -> RemoteResult<Session>;

    async fn sign_out(&self, access_token: &str) -> RemoteResult<()>;

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> RemoteResult<()>;

    async fn update_password(&self, access_token: &str, password: &str) -> RemoteResult<()>;

    // Data
    async fn fetch_profile(&self, access_token: &str, user_id: Uuid) -> RemoteResult<Profile>;

    /// Rewards ordered by ascending cost.
    async fn fetch_rewards(&self, access_token: Option<&str>) -> RemoteResult<Vec<Reward>>;

    async fn claim_daily_streak(&self, access_token: &str) -> RemoteResult<ClaimOutcome>;

    async fn redeem_reward(
        &self,
        access_token: &str,
        reward_id: RewardId,
    ) -> RemoteResult<RedeemOutcome>;
}
