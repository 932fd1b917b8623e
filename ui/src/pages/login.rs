use std::rc::Rc;

use payloads::forms::{FieldErrors, FormModel, FormValues, submit_form};
use payloads::requests::LoginCredentials;
use payloads::responses::{CurrentUser, MutationResponse};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::FormField;
use crate::contexts::use_toast;
use crate::hooks::use_mutation;
use crate::{AuthState, State, get_api_client};

/// Sign in with email and password. Once the session is set the router
/// sends the user on to their home page.
#[function_component]
pub fn LoginPage() -> Html {
    let (_, dispatch) = use_store::<State>();
    let toast = use_toast();
    let values = use_state(FormValues::new);
    let errors = use_state(FieldErrors::default);

    let on_failure = toast
        .as_ref()
        .map(|toast| toast.error_callback())
        .unwrap_or_default();
    let login = use_mutation(
        |credentials: LoginCredentials| async move {
            get_api_client().login(&credentials).await
        },
        on_failure,
    );

    let on_change = {
        let values = values.clone();
        let errors = errors.clone();
        Callback::from(move |(name, value): (&'static str, String)| {
            let mut next = (*values).clone();
            next.set(name, value);
            values.set(next);
            if errors.get(name).is_some() {
                errors.set(FieldErrors::default());
            }
        })
    };

    let on_submit = {
        let values = values.clone();
        let errors = errors.clone();
        let trigger = login.trigger();
        let toast = toast.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let on_success = {
                let dispatch = dispatch.clone();
                let toast = toast.clone();
                Callback::from(move |response: Rc<MutationResponse<CurrentUser>>| {
                    match response.record.clone() {
                        Some(user) => {
                            tracing::info!(user_id = user.id, role = %user.role, "logged in");
                            dispatch.reduce_mut(|state| {
                                state.auth_state = AuthState::LoggedIn(user);
                            });
                        }
                        None => {
                            if let Some(toast) = &toast {
                                toast.error("The server did not return the account");
                            }
                        }
                    }
                })
            };
            let result = submit_form::<LoginCredentials>(&values, |credentials| {
                trigger.emit((credentials, on_success))
            });
            if let Err(e) = result {
                errors.set(e);
            }
        })
    };

    let busy = login.status.is_running();

    html! {
        <div class="min-h-screen flex items-center justify-center bg-neutral-50 dark:bg-neutral-900 px-4">
            <form
                onsubmit={on_submit}
                novalidate={true}
                class="w-full max-w-sm space-y-5 p-8 rounded-lg bg-white dark:bg-neutral-800 shadow"
            >
                <div>
                    <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">
                        {"Sign in to StaffDesk"}
                    </h1>
                    <p class="mt-1 text-sm text-neutral-600 dark:text-neutral-400">
                        {"Use the account your administrator gave you"}
                    </p>
                </div>
                {for LoginCredentials::fields().into_iter().map(|spec| {
                    let name = spec.name;
                    html! {
                        <FormField
                            key={name}
                            {spec}
                            value={AttrValue::from(values.get(name).to_string())}
                            error={errors.get(name).map(|e| AttrValue::from(e.to_string()))}
                            disabled={busy}
                            on_change={on_change.clone()}
                        />
                    }
                })}
                <button
                    type="submit"
                    disabled={busy}
                    class="w-full px-4 py-2 text-sm font-medium text-white bg-neutral-900
                           dark:bg-neutral-100 dark:text-neutral-900 rounded-md disabled:opacity-50"
                >
                    {if busy { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
