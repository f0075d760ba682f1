//! Notification categories and their per-category presentation.

use serde::Serialize;

use parley_shared::PushKind;
use parley_store::NotificationToggles;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Message,
    FriendRequest,
    FriendAccepted,
    ChatInvite,
}

/// Android-style channel importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importance {
    Default,
    High,
}

/// A platform notification channel, registered once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub importance: Importance,
}

/// Static styling of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub channel_id: &'static str,
    pub icon: &'static str,
    /// ARGB.
    pub color: u32,
    /// Alternating off/on durations in milliseconds.
    pub vibration: &'static [u64],
    pub group_key: &'static str,
}

impl NotificationCategory {
    pub const ALL: [NotificationCategory; 4] = [
        NotificationCategory::Message,
        NotificationCategory::FriendRequest,
        NotificationCategory::FriendAccepted,
        NotificationCategory::ChatInvite,
    ];

    /// `None` for payload types that never render.
    pub fn from_push(kind: PushKind) -> Option<Self> {
        match kind {
            PushKind::NewMessage => Some(NotificationCategory::Message),
            PushKind::FriendRequest => Some(NotificationCategory::FriendRequest),
            PushKind::FriendRequestAccepted => Some(NotificationCategory::FriendAccepted),
            PushKind::ChatInvite => Some(NotificationCategory::ChatInvite),
            PushKind::Unknown => None,
        }
    }

    pub fn is_enabled(self, toggles: &NotificationToggles) -> bool {
        match self {
            NotificationCategory::Message => toggles.messages,
            NotificationCategory::FriendRequest => toggles.friend_requests,
            NotificationCategory::FriendAccepted => toggles.friend_accepted,
            NotificationCategory::ChatInvite => toggles.chat_invites,
        }
    }

    pub fn presentation(self) -> Presentation {
        match self {
            NotificationCategory::Message => Presentation {
                channel_id: "messages",
                icon: "ic_notification_message",
                color: 0xFF2196F3,
                vibration: &[0, 250, 100, 250],
                group_key: "parley.messages",
            },
            NotificationCategory::FriendRequest => Presentation {
                channel_id: "friend_requests",
                icon: "ic_notification_friend_request",
                color: 0xFF4CAF50,
                vibration: &[0, 300, 200, 300],
                group_key: "parley.friend_requests",
            },
            NotificationCategory::FriendAccepted => Presentation {
                channel_id: "friend_requests",
                icon: "ic_notification_friend_accepted",
                color: 0xFF8BC34A,
                vibration: &[0, 150, 100, 150],
                group_key: "parley.friend_accepted",
            },
            NotificationCategory::ChatInvite => Presentation {
                channel_id: "chat_invites",
                icon: "ic_notification_invite",
                color: 0xFF9C27B0,
                vibration: &[0, 200, 100, 200, 100, 200],
                group_key: "parley.chat_invites",
            },
        }
    }
}

/// Channels the dispatcher registers before posting anything.
pub fn channel_specs() -> [ChannelSpec; 3] {
    [
        ChannelSpec {
            id: "messages",
            name: "Messages",
            description: "New messages in your chats",
            importance: Importance::High,
        },
        ChannelSpec {
            id: "friend_requests",
            name: "Friend requests",
            description: "Incoming and accepted friend requests",
            importance: Importance::Default,
        },
        ChannelSpec {
            id: "chat_invites",
            name: "Chat invitations",
            description: "Being added to group chats",
            importance: Importance::Default,
        },
    ]
}
