use crate::{SessionError, SessionFile, SessionResult, SessionState};

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};
use rh_core::validation::require_valid_email;
use rh_core::{AuthForm, AuthUser, NewPasswordForm, Session};
use rh_remote::Backend;
use tokio::sync::{RwLock, watch};

/// Metadata every new account is created with.
pub const DEFAULT_FIRST_NAME: &str = "Explorer";

/// What a successful sign-up produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    SignedIn(AuthUser),
    /// Account created; a session is only issued after email confirmation.
    ConfirmationRequired,
}

/// Sole owner of the current [`Session`].
///
/// Other components read identity through [`SessionStore::subscribe`] or
/// receive clones from [`SessionStore::current_session`].
pub struct SessionStore {
    backend: Arc<dyn Backend>,
    file: SessionFile,
    min_password_length: usize,
    session: RwLock<Option<Session>>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn Backend>, file: SessionFile, min_password_length: usize) -> Self {
        let (state, _) = watch::channel(SessionState::initial());

        Self {
            backend,
            file,
            min_password_length,
            session: RwLock::new(None),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub async fn current_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Restore the persisted session. Call once at startup; `loading`
    /// stays true until this returns.
    ///
    /// An expired session is refreshed when a refresh token is available.
    /// A corrupted file is backed up and treated as signed out.
    pub async fn restore_session(&self) -> SessionResult<Option<AuthUser>> {
        let loaded = match self.file.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                self.publish(None).await;
                return Err(e);
            }
        };

        if let Some(reason) = loaded.corruption_error {
            warn!("Discarding unreadable session: {reason}");
            if let Err(e) = self.file.backup_corrupted() {
                warn!("{e}");
            }
            self.publish(None).await;
            return Ok(None);
        }

        let Some(session) = loaded.session else {
            self.publish(None).await;
            return Ok(None);
        };

        if !session.is_expired(Utc::now()) {
            let user = session.user.clone();
            info!("Restored session for {}", user.id);
            self.publish(Some(session)).await;
            return Ok(Some(user));
        }

        let Some(refresh_token) = session.refresh_token.as_deref() else {
            info!("Stored session expired and has no refresh token");
            self.discard_file();
            self.publish(None).await;
            return Ok(None);
        };

        match self.backend.refresh_session(refresh_token).await {
            Ok(refreshed) => {
                let user = refreshed.user.clone();
                info!("Refreshed expired session for {}", user.id);
                self.persist(&refreshed);
                self.publish(Some(refreshed)).await;
                Ok(Some(user))
            }
            Err(e) => {
                warn!("Session refresh failed ({}), signing out", e.code());
                self.discard_file();
                self.publish(None).await;
                Ok(None)
            }
        }
    }

    /// Validate the form, then exchange credentials for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> SessionResult<AuthUser> {
        let form = AuthForm::new(email.trim(), password);
        form.validate(self.min_password_length)?;

        let session = self
            .backend
            .sign_in_with_password(&form.email, &form.password)
            .await?;
        let user = session.user.clone();

        self.persist(&session);
        self.publish(Some(session)).await;

        info!("Signed in as {}", user.id);
        Ok(user)
    }

    /// Validate the form, then create an account with the default first name.
    pub async fn sign_up(&self, email: &str, password: &str) -> SessionResult<SignUpOutcome> {
        let form = AuthForm::new(email.trim(), password);
        form.validate(self.min_password_length)?;

        let created = self
            .backend
            .sign_up(&form.email, &form.password, DEFAULT_FIRST_NAME)
            .await?;

        match created {
            Some(session) => {
                let user = session.user.clone();
                self.persist(&session);
                self.publish(Some(session)).await;

                info!("Account created and signed in as {}", user.id);
                Ok(SignUpOutcome::SignedIn(user))
            }
            None => {
                info!("Account created, awaiting email confirmation");
                Ok(SignUpOutcome::ConfirmationRequired)
            }
        }
    }

    /// Clear identity, then revoke the token remotely on a best-effort basis.
    /// Observers see the signed-out state before any network call is made.
    pub async fn sign_out(&self) {
        let previous = self.publish(None).await;
        self.discard_file();

        let Some(session) = previous else {
            debug!("Sign-out with no active session");
            return;
        };

        info!("Signed out {}", session.user.id);
        if let Err(e) = self.backend.sign_out(&session.access_token).await {
            warn!("Remote sign-out failed ({}): {}", e.code(), e.message());
        }
    }

    /// Drop a session the backend no longer accepts.
    pub async fn expire(&self) {
        if let Some(session) = self.publish(None).await {
            info!("Session for {} expired", session.user.id);
        }
        self.discard_file();
    }

    /// Send a password-reset link to `email`.
    pub async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> SessionResult<()> {
        require_valid_email(email)?;

        self.backend
            .reset_password_for_email(email.trim(), redirect_to)
            .await?;

        info!("Password reset requested");
        Ok(())
    }

    /// Set a new password for the signed-in user.
    pub async fn update_password(&self, password: &str, confirm: &str) -> SessionResult<()> {
        let form = NewPasswordForm {
            password: password.to_string(),
            confirm: confirm.to_string(),
        };
        form.validate(self.min_password_length)?;

        let session = self
            .current_session()
            .await
            .ok_or_else(SessionError::not_authenticated)?;

        if let Err(e) = self
            .backend
            .update_password(&session.access_token, &form.password)
            .await
        {
            if e.is_unauthorized() {
                self.expire().await;
            }
            return Err(e.into());
        }

        info!("Password updated for {}", session.user.id);
        Ok(())
    }

    /// Replace the in-memory session and notify observers. Returns the
    /// session that was replaced.
    async fn publish(&self, session: Option<Session>) -> Option<Session> {
        let state = match &session {
            Some(session) => SessionState::signed_in(session.user.clone()),
            None => SessionState::signed_out(),
        };

        let previous = {
            let mut guard = self.session.write().await;
            std::mem::replace(&mut *guard, session)
        };

        self.state.send_replace(state);
        previous
    }

    /// A session the backend issued stays live for this process even when
    /// it cannot be written; the next start simply signs in again.
    fn persist(&self, session: &Session) {
        if let Err(e) = self.file.save(session) {
            warn!("Session not persisted: {e}");
        }
    }

    fn discard_file(&self) {
        if let Err(e) = self.file.remove() {
            warn!("{e}");
        }
    }
}
