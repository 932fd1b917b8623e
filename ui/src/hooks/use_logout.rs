use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{Route, State, get_api_client};

#[hook]
pub fn use_logout() -> Callback<MouseEvent> {
    let (_, dispatch) = use_store::<State>();
    let navigator = use_navigator();

    Callback::from(move |_| {
        let dispatch = dispatch.clone();
        let navigator = navigator.clone();

        yew::platform::spawn_local(async move {
            if let Err(e) = get_api_client().logout().await {
                tracing::warn!(error = %e, "logout request failed");
            }
            dispatch.reduce_mut(|state| state.logout());
            if let Some(navigator) = navigator {
                navigator.push(&Route::Login);
            }
        });
    })
}
