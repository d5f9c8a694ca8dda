use std::fmt;

use uuid::Uuid;

/// Identifies one cached read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// A user's profile, `profile:<user id>`
    Profile(Uuid),
    /// The reward catalog, `rewards`
    Rewards,
}

impl QueryKey {
    pub fn profile(user_id: Uuid) -> Self {
        Self::Profile(user_id)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile(user_id) => write!(f, "profile:{user_id}"),
            Self::Rewards => write!(f, "rewards"),
        }
    }
}
