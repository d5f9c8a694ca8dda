//! Stateful in-memory backend: balances and check-ins change the way the
//! real procedures change them.

use crate::tests::{OTHER_USER_ID, USER_ID};

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rh_core::{
    AuthUser, ClaimOutcome, Profile, RedeemOutcome, Reward, RewardId, Session,
};
use rh_remote::{Backend, RemoteError, RemoteResult};
use uuid::Uuid;

pub(crate) const PASSWORD: &str = "secret1";
pub(crate) const OTHER_PASSWORD: &str = "secret2";
pub(crate) const STREAK_BONUS: u64 = 5;

pub(crate) struct FakeState {
    pub balance: u64,
    pub streak: u64,
    pub last_check_in: Option<DateTime<Utc>>,
    pub first_name: Option<String>,
    pub rewards: Vec<Reward>,
}

pub(crate) struct FakeBackend {
    pub state: Mutex<FakeState>,
    pub latency: StdDuration,
    pub claim_unavailable: AtomicBool,
    pub reject_tokens: AtomicBool,
    pub profile_fetches: AtomicUsize,
    pub reward_fetches: AtomicUsize,
    pub claims: AtomicUsize,
    pub redemptions: AtomicUsize,
}

pub(crate) fn reward(id: RewardId, cost: u64, is_coming_soon: bool) -> Reward {
    Reward {
        id,
        title: format!("Reward {id}"),
        description: None,
        cost,
        is_coming_soon,
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::with_balance(1000)
    }
}

impl FakeBackend {
    pub fn with_balance(balance: u64) -> Self {
        Self {
            state: Mutex::new(FakeState {
                balance,
                streak: 2,
                last_check_in: Some(Utc::now() - Duration::days(1)),
                first_name: Some("Ada".to_string()),
                rewards: vec![
                    reward(1, 500, false),
                    reward(2, 5000, false),
                    reward(3, 100, true),
                ],
            }),
            latency: StdDuration::ZERO,
            claim_unavailable: AtomicBool::new(false),
            reject_tokens: AtomicBool::new(false),
            profile_fetches: AtomicUsize::new(0),
            reward_fetches: AtomicUsize::new(0),
            claims: AtomicUsize::new(0),
            redemptions: AtomicUsize::new(0),
        }
    }

    pub fn slow(mut self, latency: StdDuration) -> Self {
        self.latency = latency;
        self
    }

    pub fn balance(&self) -> u64 {
        self.state.lock().unwrap().balance
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn check_token(&self, token: &str) -> RemoteResult<()> {
        if self.reject_tokens.load(Ordering::SeqCst) || !token.starts_with("access-") {
            return Err(RemoteError::api_error(401, "PGRST303", "JWT expired"));
        }
        Ok(())
    }

    fn session_for(user_id: &str) -> Session {
        Session {
            access_token: format!("access-{user_id}"),
            refresh_token: Some("refresh".to_string()),
            token_type: "bearer".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
            user: AuthUser {
                id: Uuid::parse_str(user_id).unwrap(),
                email: None,
            },
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn sign_in_with_password(&self, _email: &str, password: &str) -> RemoteResult<Session> {
        match password {
            PASSWORD => Ok(Self::session_for(USER_ID)),
            OTHER_PASSWORD => Ok(Self::session_for(OTHER_USER_ID)),
            _ => Err(RemoteError::api_error(
                400,
                "invalid_credentials",
                "Invalid login credentials",
            )),
        }
    }

    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        _first_name: &str,
    ) -> RemoteResult<Option<Session>> {
        Err(RemoteError::api_error(
            422,
            "user_already_exists",
            "User already registered",
        ))
    }

    async fn refresh_session(&self, _refresh_token: &str) -> RemoteResult<Session> {
        Ok(Self::session_for(USER_ID))
    }

    async fn sign_out(&self, _access_token: &str) -> RemoteResult<()> {
        Ok(())
    }

    async fn reset_password_for_email(
        &self,
        _email: &str,
        _redirect_to: Option<&str>,
    ) -> RemoteResult<()> {
        Ok(())
    }

    async fn update_password(&self, access_token: &str, _password: &str) -> RemoteResult<()> {
        self.check_token(access_token)
    }

    async fn fetch_profile(&self, access_token: &str, user_id: Uuid) -> RemoteResult<Profile> {
        self.profile_fetches.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        self.check_token(access_token)?;

        let state = self.state.lock().unwrap();
        Ok(Profile {
            id: user_id,
            first_name: state.first_name.clone(),
            points_balance: state.balance,
            current_streak: state.streak,
            last_check_in: state.last_check_in,
            referral_count: 0,
            referral_points: 0,
            has_shared_stack: false,
        })
    }

    async fn fetch_rewards(&self, _access_token: Option<&str>) -> RemoteResult<Vec<Reward>> {
        self.reward_fetches.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        Ok(self.state.lock().unwrap().rewards.clone())
    }

    async fn claim_daily_streak(&self, access_token: &str) -> RemoteResult<ClaimOutcome> {
        self.claims.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        self.check_token(access_token)?;

        if self.claim_unavailable.load(Ordering::SeqCst) {
            return Err(RemoteError::api_error(503, "503", "Service Unavailable"));
        }

        let now = Utc::now();
        let mut state = self.state.lock().unwrap();
        if state.last_check_in.map(|ts| ts.date_naive()) == Some(now.date_naive()) {
            return Ok(ClaimOutcome::Rejected {
                message: "You have already claimed today".to_string(),
            });
        }

        state.balance += STREAK_BONUS;
        state.streak += 1;
        state.last_check_in = Some(now);
        Ok(ClaimOutcome::Claimed {
            new_balance: state.balance,
        })
    }

    async fn redeem_reward(
        &self,
        access_token: &str,
        reward_id: RewardId,
    ) -> RemoteResult<RedeemOutcome> {
        self.redemptions.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        self.check_token(access_token)?;

        let mut state = self.state.lock().unwrap();
        let Some(cost) = state
            .rewards
            .iter()
            .find(|reward| reward.id == reward_id)
            .map(|reward| reward.cost)
        else {
            return Ok(RedeemOutcome::Rejected {
                message: "Reward not found".to_string(),
            });
        };

        if state.balance < cost {
            return Ok(RedeemOutcome::Rejected {
                message: "Insufficient points".to_string(),
            });
        }

        state.balance -= cost;
        Ok(RedeemOutcome::Redeemed {
            new_balance: Some(state.balance),
        })
    }
}
