use std::collections::BTreeMap;
use std::rc::Rc;

use uuid::Uuid;
use yew::prelude::*;

/// How long a toast stays up.
const TOAST_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    /// Orders toasts by arrival.
    pub seq: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub toasts: BTreeMap<u64, Toast>,
    next_seq: u64,
}

pub enum ToastAction {
    Add(Uuid, String, ToastKind),
    Remove(Uuid),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Add(id, message, kind) => {
                next.next_seq += 1;
                let seq = next.next_seq;
                next.toasts.insert(
                    seq,
                    Toast {
                        id,
                        seq,
                        message,
                        kind,
                    },
                );
            }
            ToastAction::Remove(id) => next.toasts.retain(|_, t| t.id != id),
        }
        Rc::new(next)
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ToastProvider(props: &ToastProviderProps) -> Html {
    let toast_state = use_reducer(ToastState::default);

    html! {
        <ContextProvider<ToastContext> context={toast_state}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

/// Shows toasts. Cheap to clone and compare, so pages can take it as a
/// prop.
#[derive(Clone, PartialEq)]
pub struct ToastHandle {
    context: ToastContext,
}

impl ToastHandle {
    fn add(&self, message: String, kind: ToastKind) {
        let id = Uuid::new_v4();
        self.context.dispatch(ToastAction::Add(id, message, kind));

        let context = self.context.clone();
        yew::platform::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MS).await;
            context.dispatch(ToastAction::Remove(id));
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.add(message.into(), ToastKind::Error);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.add(message.into(), ToastKind::Success);
    }

    /// Show the server's `message`, or `fallback` when it sent none.
    pub fn success_or(&self, message: &str, fallback: &str) {
        let message = if message.is_empty() { fallback } else { message };
        self.success(message);
    }

    pub fn remove(&self, id: Uuid) {
        self.context.dispatch(ToastAction::Remove(id));
    }

    /// Hand to a mutation hook as its failure callback.
    pub fn error_callback(&self) -> Callback<String> {
        let handle = self.clone();
        Callback::from(move |message: String| handle.error(message))
    }
}

#[hook]
pub fn use_toast() -> Option<ToastHandle> {
    use_context::<ToastContext>().map(|context| ToastHandle { context })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_keep_arrival_order_and_remove_by_id() {
        let state = Rc::new(ToastState::default());
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let state = state.reduce(ToastAction::Add(
            first,
            "Leave created successfully".into(),
            ToastKind::Success,
        ));
        let state =
            state.reduce(ToastAction::Add(second, "Oops".into(), ToastKind::Error));
        let messages: Vec<_> =
            state.toasts.values().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, ["Leave created successfully", "Oops"]);

        let state = state.reduce(ToastAction::Remove(first));
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts.values().next().map(|t| t.id), Some(second));
    }
}
