//! Route guard: which view a path resolves to given the session state.

use rh_session::SessionState;
use serde::Serialize;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const FORGOT_PASSWORD_PATH: &str = "/forgot-password";
pub const RESET_PASSWORD_PATH: &str = "/reset-password";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    Loading,
    Unauthenticated,
    Authenticated,
}

impl From<&SessionState> for GuardState {
    fn from(state: &SessionState) -> Self {
        if state.loading {
            Self::Loading
        } else if state.user.is_some() {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", content = "path", rename_all = "snake_case")]
pub enum Route {
    Login,
    ForgotPassword,
    ResetPassword,
    /// `/` and everything under it, including paths nobody registered
    Protected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// Needs a session (the recovery link signs the user in); otherwise
    /// send them to `fallback`.
    SessionRequired { fallback: &'static str },
    Protected,
}

impl Route {
    /// Resolve a path, ignoring query string, fragment and surrounding slashes.
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_matches('/');
        let path = format!("/{path}");

        match path.as_str() {
            LOGIN_PATH => Self::Login,
            FORGOT_PASSWORD_PATH => Self::ForgotPassword,
            RESET_PASSWORD_PATH => Self::ResetPassword,
            _ => Self::Protected(path),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::ForgotPassword => FORGOT_PASSWORD_PATH,
            Self::ResetPassword => RESET_PASSWORD_PATH,
            Self::Protected(path) => path,
        }
    }

    pub fn access(&self) -> RouteAccess {
        match self {
            Self::Login | Self::ForgotPassword => RouteAccess::Public,
            Self::ResetPassword => RouteAccess::SessionRequired {
                fallback: FORGOT_PASSWORD_PATH,
            },
            Self::Protected(_) => RouteAccess::Protected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RouteDecision {
    /// Session not yet known; render a placeholder, never the content.
    ShowLoading,
    Render { route: Route },
    Redirect { to: String },
}

/// Decide what to show for `route`. Protected content is only ever
/// rendered in [`GuardState::Authenticated`].
pub fn decide(state: GuardState, route: &Route) -> RouteDecision {
    let render = || RouteDecision::Render {
        route: route.clone(),
    };

    match (route.access(), state) {
        (RouteAccess::Public, _) => render(),
        (_, GuardState::Loading) => RouteDecision::ShowLoading,
        (_, GuardState::Authenticated) => render(),
        (RouteAccess::SessionRequired { fallback }, GuardState::Unauthenticated) => {
            RouteDecision::Redirect {
                to: fallback.to_string(),
            }
        }
        (RouteAccess::Protected, GuardState::Unauthenticated) => RouteDecision::Redirect {
            to: LOGIN_PATH.to_string(),
        },
    }
}
