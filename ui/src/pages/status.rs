use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[derive(Properties, PartialEq)]
struct StatusProps {
    code: &'static str,
    message: &'static str,
}

#[function_component]
fn Status(props: &StatusProps) -> Html {
    html! {
        <div class="text-center py-16 space-y-3">
            <h1 class="text-4xl font-bold text-neutral-900 dark:text-white">{props.code}</h1>
            <p class="text-neutral-600 dark:text-neutral-300">{props.message}</p>
            <Link<Route> to={Route::Home} classes="text-sm underline">{"Back to your dashboard"}</Link<Route>>
        </div>
    }
}

#[function_component]
pub fn ForbiddenPage() -> Html {
    html! { <Status code="403" message="You don't have access to this page" /> }
}

#[function_component]
pub fn NotFoundPage() -> Html {
    html! { <Status code="404" message="Page not found" /> }
}
