use yew::prelude::*;
use yewdux::prelude::*;

use crate::{AuthState, State, get_api_client};

/// Resolve the session once on startup.
#[hook]
pub fn use_authentication() {
    let (_state, dispatch) = use_store::<State>();

    use_effect_with((), move |_| {
        yew::platform::spawn_local(async move {
            match get_api_client().current_user().await {
                Ok(Some(user)) => {
                    tracing::info!(user_id = user.id, role = %user.role, "session restored");
                    dispatch.reduce_mut(|state| {
                        state.auth_state = AuthState::LoggedIn(user);
                    });
                }
                Ok(None) => dispatch.reduce_mut(|state| state.logout()),
                Err(e) => {
                    // network trouble looks the same as no session
                    tracing::warn!(error = %e, "could not check the session");
                    dispatch.reduce_mut(|state| state.logout());
                }
            }
        });
    });
}
