//! Rooms and event names on the realtime channel.
//!
//! The channel only nudges clients to refetch; frames never carry records.
//! A page joins a room, listens for the room's "changed" event and leaves
//! when it unmounts. A page that changed something announces it to the room.

use serde::{Deserialize, Serialize};

use crate::{ContractId, EmployeeId, ProjectId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    NoticeBoard,
    Task,
    ProjectTask(ProjectId),
    ProjectDiscussion(ProjectId),
    /// Replies on one contract.
    ContractDiscussion(ContractId),
    Event,
    TimeLog,
    Notification(EmployeeId),
}

/// Event names used for one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomEvents {
    pub join: &'static str,
    pub leave: &'static str,
    /// Sent by the page that made a change.
    pub announce: &'static str,
    /// Received by everyone in the room after an announce.
    pub changed: &'static str,
}

impl Room {
    pub fn events(self) -> RoomEvents {
        match self {
            Room::NoticeBoard => RoomEvents {
                join: "joinRoomNoticeBoard",
                leave: "leaveRoomNoticeBoard",
                announce: "newNoticeBoard",
                changed: "getNewNoticeBoard",
            },
            Room::Task => RoomEvents {
                join: "joinRoomTask",
                leave: "leaveRoomTask",
                announce: "newTask",
                changed: "getNewTask",
            },
            Room::ProjectTask(_) => RoomEvents {
                join: "joinRoomProjectTask",
                leave: "leaveRoomProjectTask",
                announce: "newProjectTask",
                changed: "getNewProjectTask",
            },
            Room::ProjectDiscussion(_) => RoomEvents {
                join: "joinRoomProjectDiscussion",
                leave: "leaveRoomProjectDiscussion",
                announce: "newProjectDiscussion",
                changed: "getNewProjectDiscussion",
            },
            Room::ContractDiscussion(_) => RoomEvents {
                join: "joinRoomDiscussion",
                leave: "leaveRoomDiscussion",
                announce: "newDiscussion",
                changed: "getNewDiscussion",
            },
            Room::Event => RoomEvents {
                join: "joinRoomEvent",
                leave: "leaveRoomEvent",
                announce: "newEvent",
                changed: "getNewEvent",
            },
            Room::TimeLog => RoomEvents {
                join: "joinRoomTimeLog",
                leave: "leaveRoomTimeLog",
                announce: "newTimeLog",
                changed: "getNewTimeLog",
            },
            Room::Notification(_) => RoomEvents {
                join: "joinRoomNotification",
                leave: "leaveRoomNotification",
                announce: "newNotifications",
                changed: "getNewNotifications",
            },
        }
    }

    /// The entity id that scopes the room, if any.
    pub fn scope(self) -> Option<i64> {
        match self {
            Room::ProjectTask(id) | Room::ProjectDiscussion(id) => Some(id.0),
            Room::ContractDiscussion(id) => Some(id.0),
            Room::Notification(id) => Some(id.0),
            Room::NoticeBoard | Room::Task | Room::Event | Room::TimeLog => {
                None
            }
        }
    }

    pub fn join(self) -> ChannelMessage {
        ChannelMessage::new(self.events().join, self.scope())
    }

    pub fn leave(self) -> ChannelMessage {
        ChannelMessage::new(self.events().leave, self.scope())
    }

    pub fn announce(self) -> ChannelMessage {
        ChannelMessage::new(self.events().announce, self.scope())
    }

    /// Whether an incoming frame means this room's data changed.
    pub fn is_change(self, message: &ChannelMessage) -> bool {
        message.event == self.events().changed
            && (message.room_id.is_none() || message.room_id == self.scope())
    }
}

/// One json frame on the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMessage {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
}

impl ChannelMessage {
    pub fn new(event: &str, room_id: Option<i64>) -> Self {
        Self {
            event: event.to_string(),
            room_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_task_frames() {
        let room = Room::ProjectTask(ProjectId(9));
        let join = serde_json::to_string(&room.join()).unwrap();
        assert_eq!(join, r#"{"event":"joinRoomProjectTask","roomId":9}"#);
        let announce = serde_json::to_string(&Room::Task.announce()).unwrap();
        assert_eq!(announce, r#"{"event":"newTask"}"#);
    }

    #[test]
    fn change_detection_respects_scope() {
        let room = Room::ProjectTask(ProjectId(9));
        let ours: ChannelMessage =
            serde_json::from_str(r#"{"event":"getNewProjectTask","roomId":9}"#)
                .unwrap();
        let theirs = ChannelMessage::new("getNewProjectTask", Some(10));
        let unscoped = ChannelMessage::new("getNewProjectTask", None);
        assert!(room.is_change(&ours));
        assert!(!room.is_change(&theirs));
        assert!(room.is_change(&unscoped));
        assert!(!Room::Task.is_change(&ours));
    }

    #[test]
    fn notification_room() {
        let room = Room::Notification(EmployeeId(3));
        assert_eq!(room.events().changed, "getNewNotifications");
        assert_eq!(room.scope(), Some(3));
    }
}
