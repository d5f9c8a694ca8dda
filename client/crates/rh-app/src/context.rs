use crate::{AppResult, Notifier, RemoteDataClient};

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use rh_cache::QueryCache;
use rh_config::Config;
use rh_core::{AuthUser, Profile, Reward};
use rh_remote::{Backend, RemoteError, RestBackend};
use rh_session::{SessionFile, SessionStore};
use tokio::sync::Mutex;
use uuid::Uuid;

pub type ProfileCache = QueryCache<Profile, Arc<RemoteError>>;
pub type RewardCache = QueryCache<Vec<Reward>, Arc<RemoteError>>;

/// Settings the application layer reads after startup.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub referral_base_url: String,
    pub min_password_length: usize,
}

impl From<&Config> for AppSettings {
    fn from(config: &Config) -> Self {
        Self {
            referral_base_url: config.referral.base_url.clone(),
            min_password_length: config.validation.min_password_length,
        }
    }
}

/// Scoped context shared by every view and command.
pub struct AppContext {
    settings: AppSettings,
    session: Arc<SessionStore>,
    remote: RemoteDataClient,
    profiles: ProfileCache,
    rewards: RewardCache,
    notifier: Notifier,
    /// User the caches were last filled for
    cache_owner: Mutex<Option<Uuid>>,
}

impl AppContext {
    pub fn new(
        backend: Arc<dyn Backend>,
        session_file: SessionFile,
        settings: AppSettings,
        notifier: Notifier,
    ) -> Self {
        let session = Arc::new(SessionStore::new(
            Arc::clone(&backend),
            session_file,
            settings.min_password_length,
        ));
        let remote = RemoteDataClient::new(backend, Arc::clone(&session));

        Self {
            settings,
            session,
            remote,
            profiles: QueryCache::new(),
            rewards: QueryCache::new(),
            notifier,
            cache_owner: Mutex::new(None),
        }
    }

    /// Build the context against the configured REST backend.
    pub fn from_config(config: &Config, config_dir: &Path, notifier: Notifier) -> AppResult<Self> {
        let backend = RestBackend::new(
            &config.backend.url,
            &config.backend.anon_key,
            config.backend.request_timeout(),
        )?;
        let session_file = SessionFile::new(config.session_path(config_dir));

        info!("Using backend at {}", backend.base_url);
        Ok(Self::new(
            Arc::new(backend),
            session_file,
            AppSettings::from(config),
            notifier,
        ))
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn remote(&self) -> &RemoteDataClient {
        &self.remote
    }

    pub fn profiles(&self) -> &ProfileCache {
        &self.profiles
    }

    pub fn rewards(&self) -> &RewardCache {
        &self.rewards
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Restore the persisted session; run once before routing.
    pub async fn restore_session(&self) -> AppResult<Option<AuthUser>> {
        let restored = self.session.restore_session().await;
        self.sync_identity().await;
        Ok(restored?)
    }

    /// Current user, clearing cached reads if they belong to someone else.
    pub async fn sync_identity(&self) -> Option<AuthUser> {
        let user = self.session.state().user;
        let user_id = user.as_ref().map(|user| user.id);

        let mut owner = self.cache_owner.lock().await;
        if *owner != user_id {
            debug!("Identity changed, dropping cached reads");
            self.clear_cache().await;
            *owner = user_id;
        }

        user
    }

    pub async fn clear_cache(&self) {
        self.profiles.clear().await;
        self.rewards.clear().await;
    }
}
