mod fake_backend;
mod guard;

use crate::tests::fake_backend::{FakeBackend, PASSWORD};
use crate::{AppContext, AppSettings, Notifier, Toast};

use std::sync::Arc;

use rh_session::SessionFile;
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

pub(crate) const USER_ID: &str = "00000000-0000-0000-0000-000000000001";
pub(crate) const OTHER_USER_ID: &str = "00000000-0000-0000-0000-000000000002";

pub(crate) struct TestApp {
    _temp: TempDir,
    pub backend: Arc<FakeBackend>,
    pub ctx: Arc<AppContext>,
    pub toasts: UnboundedReceiver<Toast>,
}

impl TestApp {
    pub fn new(backend: FakeBackend) -> Self {
        let temp = TempDir::new().unwrap();
        let backend = Arc::new(backend);
        let (notifier, toasts) = Notifier::channel();
        let ctx = AppContext::new(
            backend.clone(),
            SessionFile::new(temp.path().join("session.json")),
            AppSettings {
                referral_base_url: "https://app.example.com/signup/".to_string(),
                min_password_length: 6,
            },
            notifier,
        );

        Self {
            _temp: temp,
            backend,
            ctx: Arc::new(ctx),
            toasts,
        }
    }

    pub async fn signed_in(backend: FakeBackend) -> Self {
        let mut app = Self::new(backend);
        app.ctx.restore_session().await.unwrap();
        app.ctx
            .sign_in("explorer@example.com", PASSWORD)
            .await
            .unwrap();
        app.drain_toasts();
        app
    }

    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        let mut toasts = Vec::new();
        while let Ok(toast) = self.toasts.try_recv() {
            toasts.push(toast);
        }
        toasts
    }
}
