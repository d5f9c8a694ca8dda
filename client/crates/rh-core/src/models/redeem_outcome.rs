use crate::RpcOutcome;

use serde::{Deserialize, Serialize};

/// Result of a redemption request. `Rejected` leaves the balance untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RedeemOutcome {
    Redeemed { new_balance: Option<u64> },
    Rejected { message: String },
}

impl RedeemOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Redeemed { .. })
    }
}

impl From<RpcOutcome> for RedeemOutcome {
    fn from(raw: RpcOutcome) -> Self {
        if raw.success {
            Self::Redeemed {
                new_balance: raw.new_balance,
            }
        } else {
            Self::Rejected {
                message: raw
                    .message
                    .unwrap_or_else(|| String::from("Unable to redeem reward")),
            }
        }
    }
}
