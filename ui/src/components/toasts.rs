use yew::prelude::*;

use crate::contexts::toast::{Toast, ToastContext, ToastKind, use_toast};

/// Toasts in the order they arrived, newest at the bottom.
#[function_component]
pub fn ToastContainer() -> Html {
    let context = use_context::<ToastContext>();
    let toasts: Vec<Toast> = context
        .map(|context| context.toasts.values().cloned().collect())
        .unwrap_or_default();

    if toasts.is_empty() {
        return html! {};
    }

    html! {
        <div class="fixed top-4 right-4 z-[60] space-y-3 max-w-sm w-full">
            {for toasts.into_iter().map(|toast| html! {
                <ToastItem key={toast.id.to_string()} toast={toast.clone()} />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
}

#[function_component]
fn ToastItem(props: &ToastItemProps) -> Html {
    let handle = use_toast();
    let toast = &props.toast;

    let (tone, icon) = match toast.kind {
        ToastKind::Error => (
            "bg-red-50 dark:bg-red-900 border-red-200 dark:border-red-800 \
             text-red-700 dark:text-red-400",
            "✕",
        ),
        ToastKind::Success => (
            "bg-green-50 dark:bg-green-900 border-green-200 \
             dark:border-green-800 text-green-700 dark:text-green-400",
            "✓",
        ),
    };

    let on_close = {
        let id = toast.id;
        Callback::from(move |_: MouseEvent| {
            if let Some(handle) = &handle {
                handle.remove(id);
            }
        })
    };

    html! {
        <div class={format!("relative p-4 rounded-lg border shadow-lg {tone}")} role="status">
            <div class="flex items-start space-x-3">
                <span class="flex-shrink-0 text-sm font-medium">{icon}</span>
                <p class="flex-1 min-w-0 text-sm font-medium leading-5">{&toast.message}</p>
                <button
                    onclick={on_close}
                    class="flex-shrink-0 text-neutral-400 hover:text-neutral-600 dark:hover:text-neutral-200"
                    title="Dismiss"
                >
                    <span class="text-lg leading-none">{"×"}</span>
                </button>
            </div>
        </div>
    }
}
