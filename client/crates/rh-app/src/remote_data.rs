use std::sync::Arc;

use log::warn;
use rh_core::{ClaimOutcome, Profile, RedeemOutcome, Reward, RewardId};
use rh_remote::{Backend, RemoteError, RemoteResult};
use rh_session::SessionStore;
use uuid::Uuid;

const NOT_AUTHENTICATED_CODE: &str = "not_authenticated";

/// Backend calls made on behalf of the signed-in user.
///
/// Pulls the access token from the session store for each call, and ends
/// the session when the backend stops accepting it.
#[derive(Clone)]
pub struct RemoteDataClient {
    backend: Arc<dyn Backend>,
    session: Arc<SessionStore>,
}

impl RemoteDataClient {
    pub fn new(backend: Arc<dyn Backend>, session: Arc<SessionStore>) -> Self {
        Self { backend, session }
    }

    pub async fn fetch_profile(&self, user_id: Uuid) -> RemoteResult<Profile> {
        let token = self.access_token().await?;
        let result = self.backend.fetch_profile(&token, user_id).await;
        self.checked(result).await
    }

    /// Rewards are public; the user's token is sent when there is one.
    pub async fn fetch_rewards(&self) -> RemoteResult<Vec<Reward>> {
        let token = self
            .session
            .current_session()
            .await
            .map(|session| session.access_token);
        let result = self.backend.fetch_rewards(token.as_deref()).await;
        self.checked(result).await
    }

    pub async fn claim_daily_streak(&self) -> RemoteResult<ClaimOutcome> {
        let token = self.access_token().await?;
        let result = self.backend.claim_daily_streak(&token).await;
        self.checked(result).await
    }

    pub async fn redeem_reward(&self, reward_id: RewardId) -> RemoteResult<RedeemOutcome> {
        let token = self.access_token().await?;
        let result = self.backend.redeem_reward(&token, reward_id).await;
        self.checked(result).await
    }

    async fn access_token(&self) -> RemoteResult<String> {
        self.session
            .current_session()
            .await
            .map(|session| session.access_token)
            .ok_or_else(|| RemoteError::api_error(401, NOT_AUTHENTICATED_CODE, "Not signed in"))
    }

    async fn checked<T>(&self, result: RemoteResult<T>) -> RemoteResult<T> {
        if let Err(e) = &result
            && e.is_unauthorized()
        {
            warn!("Backend rejected the access token ({}), ending session", e.code());
            self.session.expire().await;
        }
        result
    }
}
