use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub children: Html,
    /// Called on a backdrop click, unless `close_on_backdrop` is off.
    pub on_close: Callback<()>,
    #[prop_or_else(|| AttrValue::from("max-w-md"))]
    pub max_width: AttrValue,
    #[prop_or(true)]
    pub close_on_backdrop: bool,
}

/// Centered dialog over a dimmed backdrop.
#[function_component]
pub fn Modal(props: &ModalProps) -> Html {
    let backdrop_ref = use_node_ref();

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let backdrop_ref = backdrop_ref.clone();
        let close_on_backdrop = props.close_on_backdrop;

        Callback::from(move |e: MouseEvent| {
            if !close_on_backdrop {
                return;
            }
            // clicks inside the panel bubble up here too
            if let Some(backdrop) = backdrop_ref.cast::<web_sys::Element>()
                && let Some(target) = e.target()
                && target.dyn_ref::<web_sys::Element>() == Some(&backdrop)
            {
                on_close.emit(());
            }
        })
    };

    html! {
        <div
            ref={backdrop_ref}
            onclick={on_backdrop_click}
            class="fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center p-4"
        >
            <div class={format!(
                "bg-white dark:bg-neutral-800 rounded-lg shadow-xl w-full p-6 \
                 max-h-[90vh] overflow-y-auto {}",
                props.max_width
            )}>
                {props.children.clone()}
            </div>
        </div>
    }
}
