//! Auth actions as the front end triggers them: each one reports its
//! outcome as a toast and keeps the caches consistent with the identity.

use crate::{AppContext, AppResult};

use rh_core::AuthUser;
use rh_session::SignUpOutcome;

impl AppContext {
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthUser> {
        match self.session().sign_in(email, password).await {
            Ok(user) => {
                self.sync_identity().await;
                self.notifier().success("Welcome back!");
                Ok(user)
            }
            Err(e) => {
                self.notifier().error(e.user_message());
                Err(e.into())
            }
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> AppResult<SignUpOutcome> {
        match self.session().sign_up(email, password).await {
            Ok(outcome) => {
                self.sync_identity().await;
                let message = match outcome {
                    SignUpOutcome::SignedIn(_) => "Account created!",
                    SignUpOutcome::ConfirmationRequired => "Account created! You can now log in.",
                };
                self.notifier().success(message);
                Ok(outcome)
            }
            Err(e) => {
                self.notifier().error(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Never fails: identity and caches are dropped even if the backend is
    /// unreachable.
    pub async fn sign_out(&self) {
        self.clear_cache().await;
        self.session().sign_out().await;
        self.sync_identity().await;
    }

    pub async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> AppResult<()> {
        match self
            .session()
            .request_password_reset(email, redirect_to)
            .await
        {
            Ok(()) => {
                self.notifier().success("Reset link sent!");
                Ok(())
            }
            Err(e) => {
                self.notifier().error(e.user_message());
                Err(e.into())
            }
        }
    }

    pub async fn update_password(&self, password: &str, confirm: &str) -> AppResult<()> {
        match self.session().update_password(password, confirm).await {
            Ok(()) => {
                self.notifier().success("Password updated successfully!");
                Ok(())
            }
            Err(e) => {
                self.notifier().error(e.user_message());
                self.sync_identity().await;
                Err(e.into())
            }
        }
    }
}
