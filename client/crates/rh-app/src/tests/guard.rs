use crate::guard::{FORGOT_PASSWORD_PATH, LOGIN_PATH};
use crate::{GuardState, Route, RouteAccess, RouteDecision, decide};

use rh_core::AuthUser;
use rh_session::SessionState;
use uuid::Uuid;

fn render(path: &str) -> RouteDecision {
    RouteDecision::Render {
        route: Route::parse(path),
    }
}

fn redirect(to: &str) -> RouteDecision {
    RouteDecision::Redirect { to: to.to_string() }
}

#[test]
fn test_parse_known_routes() {
    assert_eq!(Route::parse("/login"), Route::Login);
    assert_eq!(Route::parse("/login/"), Route::Login);
    assert_eq!(Route::parse("login"), Route::Login);
    assert_eq!(Route::parse("reset-password?type=recovery"), Route::ResetPassword);
    assert_eq!(Route::parse("/forgot-password"), Route::ForgotPassword);
    assert_eq!(Route::parse("/reset-password#access_token=x"), Route::ResetPassword);
}

#[test]
fn test_parse_root_and_unknown_paths_are_protected() {
    assert_eq!(Route::parse("/"), Route::Protected("/".to_string()));
    assert_eq!(Route::parse(""), Route::Protected("/".to_string()));
    assert_eq!(
        Route::parse("/rewards?tab=locked"),
        Route::Protected("/rewards".to_string())
    );
    assert_eq!(Route::parse("/no/such/page").access(), RouteAccess::Protected);
}

#[test]
fn test_session_state_maps_to_guard_state() {
    let user = AuthUser {
        id: Uuid::new_v4(),
        email: None,
    };

    assert_eq!(GuardState::from(&SessionState::initial()), GuardState::Loading);
    assert_eq!(
        GuardState::from(&SessionState::signed_out()),
        GuardState::Unauthenticated
    );
    assert_eq!(
        GuardState::from(&SessionState::signed_in(user)),
        GuardState::Authenticated
    );
}

#[test]
fn test_loading_never_renders_protected_content() {
    for path in ["/", "/earn", "/settings/profile", "/reset-password"] {
        assert_eq!(
            decide(GuardState::Loading, &Route::parse(path)),
            RouteDecision::ShowLoading,
            "{path}"
        );
    }
}

#[test]
fn test_public_routes_render_in_every_state() {
    for state in [
        GuardState::Loading,
        GuardState::Unauthenticated,
        GuardState::Authenticated,
    ] {
        assert_eq!(decide(state, &Route::Login), render(LOGIN_PATH));
        assert_eq!(
            decide(state, &Route::ForgotPassword),
            render(FORGOT_PASSWORD_PATH)
        );
    }
}

#[test]
fn test_unauthenticated_protected_redirects_to_login() {
    assert_eq!(
        decide(GuardState::Unauthenticated, &Route::parse("/")),
        redirect("/login")
    );
    assert_eq!(
        decide(GuardState::Unauthenticated, &Route::parse("/unknown")),
        redirect("/login")
    );
}

#[test]
fn test_reset_password_without_session_redirects_to_forgot_password() {
    assert_eq!(
        decide(GuardState::Unauthenticated, &Route::ResetPassword),
        redirect("/forgot-password")
    );
    assert_eq!(
        decide(GuardState::Authenticated, &Route::ResetPassword),
        render("/reset-password")
    );
}

#[test]
fn test_authenticated_renders_protected() {
    assert_eq!(decide(GuardState::Authenticated, &Route::parse("/")), render("/"));
}
