use serde::{Deserialize, Serialize};

/// Raw `{success, new_balance?, message?}` payload returned by the
/// streak and redemption procedures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcOutcome {
    pub success: bool,
    #[serde(default)]
    pub new_balance: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of the daily streak claim.
///
/// `Rejected` is a business-rule refusal (already claimed today and the
/// like), not a transport failure, and is never retried automatically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClaimOutcome {
    Claimed { new_balance: u64 },
    Rejected { message: String },
}

impl ClaimOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Claimed { .. })
    }
}

impl From<RpcOutcome> for ClaimOutcome {
    fn from(raw: RpcOutcome) -> Self {
        match raw {
            RpcOutcome {
                success: true,
                new_balance,
                ..
            } => Self::Claimed {
                new_balance: new_balance.unwrap_or_default(),
            },
            RpcOutcome { message, .. } => Self::Rejected {
                message: message.unwrap_or_else(|| String::from("Unable to claim daily points")),
            },
        }
    }
}
