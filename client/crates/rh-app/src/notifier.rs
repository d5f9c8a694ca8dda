use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
}

/// Transient user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Sending half of the toast channel. The front end owns the receiver and
/// drains it after each action.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: mpsc::UnboundedSender<Toast>,
}

impl Notifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Toast>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        info!("{message}");
        self.send(Toast {
            level: ToastLevel::Success,
            message,
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.send(Toast {
            level: ToastLevel::Error,
            message,
        });
    }

    fn send(&self, toast: Toast) {
        if self.sender.send(toast).is_err() {
            debug!("Toast dropped: no receiver");
        }
    }
}
