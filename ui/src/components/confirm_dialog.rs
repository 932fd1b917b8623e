use yew::prelude::*;

use super::Modal;

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or_else(|| AttrValue::from("Delete"))]
    pub confirm_text: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
    /// The confirmed call is running.
    #[prop_or_default]
    pub is_running: bool,
}

/// Asks before a destructive call. Nothing is sent until the user
/// confirms.
#[function_component]
pub fn ConfirmDialog(props: &ConfirmDialogProps) -> Html {
    let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());
    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <Modal on_close={props.on_close.clone()} close_on_backdrop={!props.is_running}>
            <h3 class="text-lg font-semibold text-neutral-900 dark:text-neutral-100 mb-4">
                {&props.title}
            </h3>
            <p class="text-sm text-neutral-600 dark:text-neutral-400">
                {&props.message}{" "}
                <span class="font-semibold text-red-600 dark:text-red-400">
                    {"This cannot be undone."}
                </span>
            </p>
            <div class="flex justify-end gap-3 mt-6">
                <button
                    onclick={on_cancel}
                    disabled={props.is_running}
                    class="px-4 py-2 text-sm font-medium text-neutral-700 dark:text-neutral-300
                           bg-white dark:bg-neutral-700 border border-neutral-300 dark:border-neutral-600
                           rounded-md hover:bg-neutral-50 dark:hover:bg-neutral-600
                           disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    {"Cancel"}
                </button>
                <button
                    onclick={on_confirm}
                    disabled={props.is_running}
                    class="px-4 py-2 text-sm font-medium text-white bg-red-600 hover:bg-red-700
                           dark:bg-red-700 dark:hover:bg-red-600 rounded-md
                           disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    {if props.is_running { "Processing..." } else { props.confirm_text.as_str() }}
                </button>
            </div>
        </Modal>
    }
}
