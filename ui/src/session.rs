//! What a page needs from the logged in app, handed to it as a prop.

use payloads::Role;
use payloads::realtime::{ChannelMessage, Room};
use payloads::responses::CurrentUser;
use yew::Callback;

use crate::contexts::ToastHandle;
use crate::realtime::{RealtimeChannel, Subscription};

#[derive(Clone, PartialEq)]
pub struct AuthSession {
    pub user: CurrentUser,
    /// Absent when the realtime url could not be opened.
    pub channel: Option<RealtimeChannel>,
    /// Turns the global loading overlay on and off.
    pub loading: Callback<bool>,
    pub toast: ToastHandle,
}

impl AuthSession {
    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn is_admin(&self) -> bool {
        self.user.role.is_admin()
    }

    /// Clients can look but not touch.
    pub fn can_edit(&self) -> bool {
        self.user.role != Role::Client
    }

    pub fn join(&self, room: Room, on_change: Callback<()>) -> Option<Subscription> {
        let channel = self.channel.as_ref()?;
        channel.send(&room.join());
        let subscription =
            channel.subscribe(Callback::from(move |message: ChannelMessage| {
                if room.is_change(&message) {
                    on_change.emit(());
                }
            }));
        Some(subscription)
    }

    pub fn leave(&self, room: Room) {
        if let Some(channel) = &self.channel {
            channel.send(&room.leave());
        }
    }

    /// Tell everyone else in `room` to refetch.
    pub fn announce(&self, room: Room) {
        if let Some(channel) = &self.channel {
            channel.send(&room.announce());
        }
    }
}
