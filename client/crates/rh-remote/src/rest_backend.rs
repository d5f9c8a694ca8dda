use crate::token_response::TokenResponse;
use crate::{Backend, RemoteError, RemoteResult};

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use rh_core::{AuthUser, ClaimOutcome, Profile, RedeemOutcome, Reward, RewardId, RpcOutcome, Session};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

const SINGLE_OBJECT_ACCEPT: &str = "application/vnd.pgrst.object+json";

/// HTTP client for the backend's auth (`/auth/v1`), table (`/rest/v1`)
/// and procedure (`/rest/v1/rpc`) endpoints.
pub struct RestBackend {
    pub base_url: String,
    anon_key: String,
    client: ReqwestClient,
}

impl RestBackend {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Project URL (e.g., "https://xyz.supabase.co")
    /// * `anon_key` - Public API key sent as `apikey` on every request
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> RemoteResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            client,
        })
    }

    /// Build a request carrying the API key and a bearer token (the user's
    /// access token, or the anon key for public calls)
    fn request(
        &self,
        method: Method,
        path: &str,
        access_token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let bearer = access_token.unwrap_or(self.anon_key.as_str());

        debug!("{method} {path}");

        self.client
            .request(method, &url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }

    /// Send a request, turning non-2xx responses into `RemoteError::Api`.
    /// Returns the raw body on success.
    async fn send(&self, req: reqwest::RequestBuilder) -> RemoteResult<String> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error_from_body(status, &body));
        }

        Ok(body)
    }

    async fn execute<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> RemoteResult<T> {
        let body = self.send(req).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn execute_empty(&self, req: reqwest::RequestBuilder) -> RemoteResult<()> {
        self.send(req).await.map(|_| ())
    }
}

#[async_trait]
impl Backend for RestBackend {
    // =========================================================================
    // Auth Operations
    // =========================================================================

    async fn sign_in_with_password(&self, email: &str, password: &str) -> RemoteResult<Session> {
        #[derive(Serialize)]
        struct PasswordGrant<'a> {
            email: &'a str,
            password: &'a str,
        }

        let req = self
            .request(Method::POST, "/auth/v1/token?grant_type=password", None)
            .json(&PasswordGrant { email, password });
        let token: TokenResponse = self.execute(req).await?;

        Ok(token.into_session(Utc::now()))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
    ) -> RemoteResult<Option<Session>> {
        #[derive(Serialize)]
        struct UserMetadata<'a> {
            first_name: &'a str,
        }

        #[derive(Serialize)]
        struct SignUpRequest<'a> {
            email: &'a str,
            password: &'a str,
            data: UserMetadata<'a>,
        }

        let body = SignUpRequest {
            email,
            password,
            data: UserMetadata { first_name },
        };
        let req = self.request(Method::POST, "/auth/v1/signup", None).json(&body);
        let value: Value = self.execute(req).await?;

        // With auto-confirm the response is a full session; otherwise it is
        // just the (unconfirmed) user.
        if value.get("access_token").is_some() {
            let token: TokenResponse = serde_json::from_value(value)?;
            return Ok(Some(token.into_session(Utc::now())));
        }

        let user: AuthUser = match value.get("user") {
            Some(user) => serde_json::from_value(user.clone())?,
            None => serde_json::from_value(value)?,
        };
        debug!("Sign-up for {} awaiting confirmation", user.id);

        Ok(None)
    }

    async fn refresh_session(&self, refresh_token: &str) -> RemoteResult<Session> {
        #[derive(Serialize)]
        struct RefreshGrant<'a> {
            refresh_token: &'a str,
        }

        let req = self
            .request(
                Method::POST,
                "/auth/v1/token?grant_type=refresh_token",
                None,
            )
            .json(&RefreshGrant { refresh_token });
        let token: TokenResponse = self.execute(req).await?;

        Ok(token.into_session(Utc::now()))
    }

    async fn sign_out(&self, access_token: &str) -> RemoteResult<()> {
        let req = self.request(Method::POST, "/auth/v1/logout", Some(access_token));
        self.execute_empty(req).await
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> RemoteResult<()> {
        #[derive(Serialize)]
        struct RecoverRequest<'a> {
            email: &'a str,
        }

        let path = match redirect_to {
            Some(target) => format!(
                "/auth/v1/recover?redirect_to={}",
                urlencoding::encode(target)
            ),
            None => String::from("/auth/v1/recover"),
        };
        let req = self
            .request(Method::POST, &path, None)
            .json(&RecoverRequest { email });
        self.execute_empty(req).await
    }

    async fn update_password(&self, access_token: &str, password: &str) -> RemoteResult<()> {
        #[derive(Serialize)]
        struct UpdateUserRequest<'a> {
            password: &'a str,
        }

        let req = self
            .request(Method::PUT, "/auth/v1/user", Some(access_token))
            .json(&UpdateUserRequest { password });
        self.execute_empty(req).await
    }

    // =========================================================================
    // Data Operations
    // =========================================================================

    async fn fetch_profile(&self, access_token: &str, user_id: Uuid) -> RemoteResult<Profile> {
        let req = self
            .request(
                Method::GET,
                &format!("/rest/v1/profiles?id=eq.{user_id}&select=*"),
                Some(access_token),
            )
            .header("Accept", SINGLE_OBJECT_ACCEPT);
        self.execute(req).await
    }

    async fn fetch_rewards(&self, access_token: Option<&str>) -> RemoteResult<Vec<Reward>> {
        let req = self.request(
            Method::GET,
            "/rest/v1/rewards?select=*&order=cost.asc",
            access_token,
        );
        self.execute(req).await
    }

    async fn claim_daily_streak(&self, access_token: &str) -> RemoteResult<ClaimOutcome> {
        let req = self
            .request(
                Method::POST,
                "/rest/v1/rpc/claim_daily_streak",
                Some(access_token),
            )
            .json(&serde_json::json!({}));
        let raw: RpcOutcome = self.execute(req).await?;

        Ok(ClaimOutcome::from(raw))
    }

    async fn redeem_reward(
        &self,
        access_token: &str,
        reward_id: RewardId,
    ) -> RemoteResult<RedeemOutcome> {
        #[derive(Serialize)]
        struct RedeemRequest {
            reward_id: RewardId,
        }

        let req = self
            .request(
                Method::POST,
                "/rest/v1/rpc/redeem_reward",
                Some(access_token),
            )
            .json(&RedeemRequest { reward_id });
        let raw: RpcOutcome = self.execute(req).await?;

        Ok(RedeemOutcome::from(raw))
    }
}

/// Map an error body from either the auth service or the REST layer.
///
/// Auth errors look like `{"error_code": "...", "msg": "..."}` (or the
/// older `{"error": "...", "error_description": "..."}`); REST errors like
/// `{"code": "PGRST116", "message": "..."}`.
#[track_caller]
pub(crate) fn api_error_from_body(status: StatusCode, body: &str) -> RemoteError {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    let string_field = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| parsed.get(*key).and_then(Value::as_str))
            .map(String::from)
    };

    let code = string_field(&["error_code", "code", "error"])
        .unwrap_or_else(|| status.as_u16().to_string());
    let message = string_field(&["msg", "message", "error_description", "error"])
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    RemoteError::api_error(status.as_u16(), code, message)
}
