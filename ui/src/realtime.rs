//! The websocket the backend uses to tell open pages their data changed.
//!
//! Frames are [`ChannelMessage`] json. Pages subscribe for the lifetime of a
//! component; the subscription is removed when the returned guard drops.

use std::cell::RefCell;
use std::rc::Rc;

use payloads::realtime::ChannelMessage;
use wasm_bindgen::prelude::*;
use web_sys::{MessageEvent, WebSocket};
use yew::Callback;

type Listeners = Rc<RefCell<Vec<(u64, Callback<ChannelMessage>)>>>;

struct Inner {
    socket: WebSocket,
    listeners: Listeners,
    next_listener: RefCell<u64>,
    // kept alive for as long as the socket
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_open: Closure<dyn FnMut(web_sys::Event)>,
    /// Frames sent before the socket opened.
    pending: Rc<RefCell<Vec<String>>>,
}

#[derive(Clone)]
pub struct RealtimeChannel {
    inner: Rc<Inner>,
}

impl PartialEq for RealtimeChannel {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl RealtimeChannel {
    pub fn connect(url: &str) -> Result<Self, JsValue> {
        let socket = WebSocket::new(url)?;
        let listeners: Listeners = Rc::default();
        let pending: Rc<RefCell<Vec<String>>> = Rc::default();

        let on_message = {
            let listeners = listeners.clone();
            Closure::wrap(Box::new(move |event: MessageEvent| {
                let Some(text) = event.data().as_string() else {
                    return;
                };
                match serde_json::from_str::<ChannelMessage>(&text) {
                    Ok(message) => {
                        tracing::debug!(event = %message.event, "realtime frame");
                        // clone first so a listener may unsubscribe itself
                        let current = listeners.borrow().clone();
                        for (_, listener) in current {
                            listener.emit(message.clone());
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "unreadable realtime frame")
                    }
                }
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let on_open = {
            let socket = socket.clone();
            let pending = pending.clone();
            Closure::wrap(Box::new(move |_: web_sys::Event| {
                for frame in pending.borrow_mut().drain(..) {
                    if let Err(e) = socket.send_with_str(&frame) {
                        tracing::warn!(?e, "could not send realtime frame");
                    }
                }
            }) as Box<dyn FnMut(web_sys::Event)>)
        };
        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        tracing::info!(url, "realtime channel opening");
        Ok(Self {
            inner: Rc::new(Inner {
                socket,
                listeners,
                next_listener: RefCell::new(0),
                _on_message: on_message,
                _on_open: on_open,
                pending,
            }),
        })
    }

    pub fn send(&self, message: &ChannelMessage) {
        let frame = match serde_json::to_string(message) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, "could not encode realtime frame");
                return;
            }
        };
        let socket = &self.inner.socket;
        if socket.ready_state() == WebSocket::CONNECTING {
            self.inner.pending.borrow_mut().push(frame);
        } else if let Err(e) = socket.send_with_str(&frame) {
            tracing::warn!(?e, "could not send realtime frame");
        }
    }

    /// Call `listener` with every frame until the guard is dropped.
    pub fn subscribe(&self, listener: Callback<ChannelMessage>) -> Subscription {
        let id = {
            let mut next = self.inner.next_listener.borrow_mut();
            *next += 1;
            *next
        };
        self.inner.listeners.borrow_mut().push((id, listener));
        Subscription {
            id,
            listeners: self.inner.listeners.clone(),
        }
    }

    pub fn close(&self) {
        self.inner.socket.set_onmessage(None);
        self.inner.socket.set_onopen(None);
        if let Err(e) = self.inner.socket.close() {
            tracing::warn!(error = ?e, "could not close the realtime socket");
        }
    }
}

pub struct Subscription {
    id: u64,
    listeners: Listeners,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
    }
}
