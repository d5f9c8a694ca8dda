use crate::commands::Commands;

use rh_app::guard::{FORGOT_PASSWORD_PATH, HOME_PATH, LOGIN_PATH, RESET_PASSWORD_PATH};
use rh_app::{GuardState, Route, RouteDecision, decide};
use rh_core::RewardFilter;

fn decision_for(command: &Commands, state: GuardState) -> RouteDecision {
    decide(state, &Route::parse(command.route()))
}

#[test]
fn test_data_commands_use_the_protected_home_route() {
    let commands = [
        Commands::Dashboard,
        Commands::Rewards {
            filter: RewardFilter::All,
        },
        Commands::Claim,
        Commands::Redeem { id: 1 },
        Commands::Referral,
    ];

    for command in &commands {
        assert_eq!(command.route(), HOME_PATH);
    }
}

#[test]
fn test_auth_commands_use_public_routes() {
    assert_eq!(
        Commands::Login {
            email: String::from("ada@example.com"),
            password: None,
        }
        .route(),
        LOGIN_PATH
    );
    assert_eq!(Commands::Logout.route(), LOGIN_PATH);
    assert_eq!(
        Commands::ForgotPassword {
            email: String::from("ada@example.com"),
            redirect_to: None,
        }
        .route(),
        FORGOT_PASSWORD_PATH
    );
}

#[test]
fn test_signed_out_dashboard_is_redirected_to_login() {
    let decision = decision_for(&Commands::Dashboard, GuardState::Unauthenticated);

    assert_eq!(
        decision,
        RouteDecision::Redirect {
            to: LOGIN_PATH.to_string()
        }
    );
}

#[test]
fn test_signed_out_reset_password_is_redirected_to_forgot_password() {
    let command = Commands::ResetPassword {
        password: String::from("secret1"),
        confirm: String::from("secret1"),
    };

    assert_eq!(command.route(), RESET_PASSWORD_PATH);
    assert_eq!(
        decision_for(&command, GuardState::Unauthenticated),
        RouteDecision::Redirect {
            to: FORGOT_PASSWORD_PATH.to_string()
        }
    );
}

#[test]
fn test_signed_out_login_renders() {
    let command = Commands::Login {
        email: String::from("ada@example.com"),
        password: None,
    };

    assert!(matches!(
        decision_for(&command, GuardState::Unauthenticated),
        RouteDecision::Render { .. }
    ));
}

#[test]
fn test_signed_in_claim_renders() {
    assert!(matches!(
        decision_for(&Commands::Claim, GuardState::Authenticated),
        RouteDecision::Render { .. }
    ));
}
