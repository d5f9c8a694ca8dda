use rh_core::AuthUser;

/// Observable identity state.
///
/// `loading` is true from process start until the persisted session has
/// been restored (or found absent). Nothing protected may render while it
/// is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<AuthUser>,
    pub loading: bool,
}

impl SessionState {
    pub fn initial() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    pub fn signed_in(user: AuthUser) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.user.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}
