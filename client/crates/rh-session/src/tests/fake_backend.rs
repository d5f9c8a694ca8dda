//! In-memory `Backend` double for session tests.

use crate::tests::session_expiring_in;

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Duration;
use rh_core::{ClaimOutcome, Profile, RedeemOutcome, Reward, RewardId, Session};
use rh_remote::{Backend, RemoteError, RemoteResult};
use uuid::Uuid;

pub(crate) const PASSWORD: &str = "secret1";

#[derive(Default)]
pub(crate) struct FakeBackend {
    pub confirm_sign_ups: bool,
    pub refresh_fails: bool,
    pub revoke_fails: bool,
    pub token_rejected: bool,
    pub calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub revoked: AtomicUsize,
    pub sign_up_first_name: Mutex<Option<String>>,
}

impl FakeBackend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn sign_in_with_password(&self, _email: &str, password: &str) -> RemoteResult<Session> {
        self.record();
        if password == PASSWORD {
            Ok(session_expiring_in(Duration::hours(1)))
        } else {
            Err(RemoteError::api_error(
                400,
                "invalid_credentials",
                "Invalid login credentials",
            ))
        }
    }

    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        first_name: &str,
    ) -> RemoteResult<Option<Session>> {
        self.record();
        *self.sign_up_first_name.lock().unwrap() = Some(first_name.to_string());
        if self.confirm_sign_ups {
            Ok(None)
        } else {
            Ok(Some(session_expiring_in(Duration::hours(1))))
        }
    }

    async fn refresh_session(&self, _refresh_token: &str) -> RemoteResult<Session> {
        self.record();
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if self.refresh_fails {
            return Err(RemoteError::api_error(
                400,
                "refresh_token_not_found",
                "Invalid Refresh Token: Refresh Token Not Found",
            ));
        }
        let mut session = session_expiring_in(Duration::hours(1));
        session.access_token = "access-2".to_string();
        Ok(session)
    }

    async fn sign_out(&self, _access_token: &str) -> RemoteResult<()> {
        self.record();
        self.revoked.fetch_add(1, Ordering::SeqCst);
        if self.revoke_fails {
            return Err(RemoteError::api_error(500, "500", "Internal Server Error"));
        }
        Ok(())
    }

    async fn reset_password_for_email(
        &self,
        _email: &str,
        _redirect_to: Option<&str>,
    ) -> RemoteResult<()> {
        self.record();
        Ok(())
    }

    async fn update_password(&self, _access_token: &str, _password: &str) -> RemoteResult<()> {
        self.record();
        if self.token_rejected {
            return Err(RemoteError::api_error(401, "bad_jwt", "invalid JWT"));
        }
        Ok(())
    }

    async fn fetch_profile(&self, _access_token: &str, _user_id: Uuid) -> RemoteResult<Profile> {
        unimplemented!("not used by session tests")
    }

    async fn fetch_rewards(&self, _access_token: Option<&str>) -> RemoteResult<Vec<Reward>> {
        unimplemented!("not used by session tests")
    }

    async fn claim_daily_streak(&self, _access_token: &str) -> RemoteResult<ClaimOutcome> {
        unimplemented!("not used by session tests")
    }

    async fn redeem_reward(
        &self,
        _access_token: &str,
        _reward_id: RewardId,
    ) -> RemoteResult<RedeemOutcome> {
        unimplemented!("not used by session tests")
    }
}
