use payloads::access::{self, Access};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{AuthState, Route};

const LOGIN: &str = "/login";

/// Send the user away from `path` if they may not be there: to the login
/// page when logged out, to the forbidden page when their role is denied.
///
/// Returns whether the page may render.
#[hook]
pub fn use_route_guard(auth: AuthState, path: String) -> bool {
    let navigator = use_navigator();

    let decision = match &auth {
        AuthState::Unknown => None,
        AuthState::LoggedOut if path == LOGIN => Some(Access::Allow),
        AuthState::LoggedOut => Some(Access::Redirect(LOGIN)),
        AuthState::LoggedIn(user) => Some(access::check(Some(user.role), &path)),
    };

    use_effect_with((decision, path), move |(decision, path)| {
        if let Some(Access::Redirect(to)) = decision
            && let Some(navigator) = navigator
        {
            tracing::info!(from = %path, to = %to, "navigation denied");
            navigator.replace(&Route::recognize(to).unwrap_or(Route::Forbidden));
        }
    });

    decision.is_some_and(Access::is_allowed)
}
