use payloads::realtime::Room;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::realtime::RealtimeChannel;
use crate::session::AuthSession;
use crate::{State, realtime_url};

/// Open the realtime channel when someone logs in.
#[hook]
pub fn use_realtime_connection() {
    let (state, dispatch) = use_store::<State>();
    let user_id = state.current_user().map(|user| user.id);

    use_effect_with(user_id, move |user_id| {
        if user_id.is_some() && dispatch.get().channel.is_none() {
            match RealtimeChannel::connect(&realtime_url()) {
                Ok(channel) => dispatch.reduce_mut(|state| {
                    state.channel = Some(channel);
                }),
                // pages still work, they just won't hear about changes
                Err(e) => tracing::warn!(?e, "realtime channel unavailable"),
            }
        }
    });
}

/// Refetch whenever `room` reports a change. The room is joined on mount
/// and left on unmount; `None` joins nothing.
#[hook]
pub fn use_realtime_refresh(
    session: AuthSession,
    room: Option<Room>,
    refetch: Callback<()>,
) {
    let channel = session.channel.clone();
    use_effect_with((room, channel), move |(room, _)| {
        let room = *room;
        let subscription = room.and_then(|room| session.join(room, refetch));
        move || {
            drop(subscription);
            if let Some(room) = room {
                session.leave(room);
            }
        }
    });
}
