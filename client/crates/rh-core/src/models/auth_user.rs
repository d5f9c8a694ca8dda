use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated identity as issued by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}
