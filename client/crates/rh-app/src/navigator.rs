use crate::{GuardState, Route, RouteDecision, decide};

use log::debug;
use rh_session::SessionState;
use tokio::sync::watch;

/// Tracks the current location and re-runs the guard whenever the session
/// changes, following redirects.
pub struct Navigator {
    session: watch::Receiver<SessionState>,
    location: Route,
}

impl Navigator {
    pub fn new(session: watch::Receiver<SessionState>, path: &str) -> Self {
        Self {
            session,
            location: Route::parse(path),
        }
    }

    pub fn location(&self) -> &Route {
        &self.location
    }

    pub fn guard_state(&self) -> GuardState {
        GuardState::from(&*self.session.borrow())
    }

    /// Go to `path`. A redirect moves the location to its target; the
    /// returned decision is the one for the requested path.
    pub fn navigate(&mut self, path: &str) -> RouteDecision {
        self.location = Route::parse(path);
        self.evaluate()
    }

    /// Decision for the current location under the current session state.
    pub fn current(&self) -> RouteDecision {
        decide(self.guard_state(), &self.location)
    }

    /// Wait for the session to change, then re-evaluate the current
    /// location. Returns `None` once the session store is gone.
    pub async fn changed(&mut self) -> Option<RouteDecision> {
        self.session.changed().await.ok()?;
        Some(self.evaluate())
    }

    fn evaluate(&mut self) -> RouteDecision {
        let decision = decide(self.guard_state(), &self.location);

        if let RouteDecision::Redirect { to } = &decision {
            debug!("Redirecting {} -> {to}", self.location.path());
            self.location = Route::parse(to);
        }

        decision
    }
}
