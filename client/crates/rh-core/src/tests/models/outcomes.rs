use crate::{ClaimOutcome, RedeemOutcome, RpcOutcome};

use serde_json::json;

#[test]
fn test_claim_success_payload() {
    let raw: RpcOutcome =
        serde_json::from_value(json!({ "success": true, "new_balance": 15 })).unwrap();

    assert_eq!(
        ClaimOutcome::from(raw),
        ClaimOutcome::Claimed { new_balance: 15 }
    );
}

#[test]
fn test_claim_rejection_keeps_backend_message() {
    let raw: RpcOutcome = serde_json::from_value(json!({
        "success": false,
        "message": "Already checked in today"
    }))
    .unwrap();

    let outcome = ClaimOutcome::from(raw);

    assert!(!outcome.is_success());
    assert_eq!(
        outcome,
        ClaimOutcome::Rejected {
            message: "Already checked in today".to_string()
        }
    );
}

#[test]
fn test_redeem_rejection_without_message_gets_fallback() {
    let raw: RpcOutcome = serde_json::from_value(json!({ "success": false })).unwrap();

    match RedeemOutcome::from(raw) {
        RedeemOutcome::Rejected { message } => assert!(!message.is_empty()),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn test_redeem_success() {
    let raw: RpcOutcome =
        serde_json::from_value(json!({ "success": true, "new_balance": 400 })).unwrap();

    assert_eq!(
        RedeemOutcome::from(raw),
        RedeemOutcome::Redeemed {
            new_balance: Some(400)
        }
    );
}
