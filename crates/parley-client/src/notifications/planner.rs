//! Maps a push payload and the user's toggles to a rendered notification.
//!
//! Everything here is pure; the dispatcher owns the side effects.

use parley_shared::constants::DEEP_LINK_SCHEME;
use parley_shared::{MessageKind, PushPayload};
use parley_store::NotificationToggles;

use super::channels::{NotificationCategory, Presentation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Platform notification id. Reposting an id replaces the old one.
    pub id: i32,
    pub category: NotificationCategory,
    pub channel_id: &'static str,
    pub title: String,
    pub body: String,
    pub icon: &'static str,
    pub color: u32,
    /// `None` when vibration is switched off.
    pub vibration: Option<&'static [u64]>,
    pub silent: bool,
    pub group_key: &'static str,
    pub deep_link: String,
    pub posted_at_millis: i64,
}

/// Decide whether and how to render `payload`.
pub fn plan_notification(
    payload: &PushPayload,
    toggles: &NotificationToggles,
    now_millis: i64,
) -> Option<Notification> {
    if !toggles.enabled {
        return None;
    }
    let category = NotificationCategory::from_push(payload.kind())?;
    if !category.is_enabled(toggles) {
        return None;
    }

    let (id, title, body, deep_link) = match category {
        NotificationCategory::Message => {
            let id = payload
                .chat_id()
                .map(stable_id)
                .unwrap_or_else(|| time_id(now_millis));
            (id, message_title(payload), message_body(payload), chat_link(payload.chat_id()))
        }
        NotificationCategory::FriendRequest => {
            let from = payload.from_username().unwrap_or("Someone");
            let link = match payload.request_id() {
                Some(request) => deep_link(&format!("friends/requests/{}", urlencoding::encode(request))),
                None => deep_link("friends/requests"),
            };
            (
                time_id(now_millis),
                "New friend request".to_string(),
                format!("{from} wants to be your friend"),
                link,
            )
        }
        NotificationCategory::FriendAccepted => {
            let from = payload.from_username().unwrap_or("Someone");
            let link = match payload.from_user_id() {
                Some(user) => deep_link(&format!("profile/{}", urlencoding::encode(user))),
                None => deep_link("friends"),
            };
            (
                time_id(now_millis),
                "Friend request accepted".to_string(),
                format!("{from} accepted your friend request"),
                link,
            )
        }
        NotificationCategory::ChatInvite => {
            let inviter = payload.inviter_name().unwrap_or("Someone");
            let chat = payload.chat_name().unwrap_or("a group chat");
            (
                time_id(now_millis),
                "Chat invitation".to_string(),
                format!("{inviter} added you to {chat}"),
                chat_link(payload.chat_id()),
            )
        }
    };

    let Presentation {
        channel_id,
        icon,
        color,
        vibration,
        group_key,
    } = category.presentation();

    Some(Notification {
        id,
        category,
        channel_id,
        title,
        body,
        icon,
        color,
        vibration: toggles.vibration.then_some(vibration),
        silent: !toggles.sound,
        group_key,
        deep_link,
        posted_at_millis: payload.timestamp_millis().unwrap_or(now_millis),
    })
}

/// 31-polynomial hash over UTF-16 code units with `i32` wraparound.
///
/// Equal keys always give the same id, so a conversation keeps one
/// notification slot.
pub fn stable_id(key: &str) -> i32 {
    key.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Id for notifications that must never coalesce.
pub fn time_id(now_millis: i64) -> i32 {
    // Lossless: the remainder fits in i32.
    now_millis.rem_euclid(i64::from(i32::MAX)) as i32
}

fn message_title(payload: &PushPayload) -> String {
    match (payload.sender_name(), payload.chat_name()) {
        (Some(sender), Some(chat)) if sender != chat => format!("{sender} · {chat}"),
        (Some(sender), _) => sender.to_string(),
        (None, Some(chat)) => chat.to_string(),
        (None, None) => "New message".to_string(),
    }
}

fn message_body(payload: &PushPayload) -> String {
    match payload.body() {
        Some(body) => body.to_string(),
        None => payload
            .message_type()
            .map(MessageKind::from_tag)
            .unwrap_or_default()
            .placeholder()
            .to_string(),
    }
}

fn chat_link(chat_id: Option<&str>) -> String {
    match chat_id {
        Some(id) => deep_link(&format!("chat/{}", urlencoding::encode(id))),
        None => deep_link("chats"),
    }
}

/// `path` must already have its ids percent-encoded.
fn deep_link(path: &str) -> String {
    format!("{DEEP_LINK_SCHEME}://{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_123;

    fn alice_hi() -> PushPayload {
        PushPayload::from([
            ("type", "new_message"),
            ("chatId", "c1"),
            ("senderName", "Alice"),
            ("body", "hi"),
        ])
    }

    fn payload_for(category: NotificationCategory) -> PushPayload {
        match category {
            NotificationCategory::Message => alice_hi(),
            NotificationCategory::FriendRequest => PushPayload::from([
                ("type", "friend_request"),
                ("fromUsername", "bob"),
                ("requestId", "r9"),
            ]),
            NotificationCategory::FriendAccepted => PushPayload::from([
                ("type", "friend_request_accepted"),
                ("fromUsername", "carol"),
                ("fromUserId", "u3"),
            ]),
            NotificationCategory::ChatInvite => PushPayload::from([
                ("type", "chat_invite"),
                ("inviterName", "dave"),
                ("chatId", "g1"),
                ("chatName", "Hiking"),
            ]),
        }
    }

    fn with_category(category: NotificationCategory, on: bool) -> NotificationToggles {
        let mut toggles = NotificationToggles::default();
        match category {
            NotificationCategory::Message => toggles.messages = on,
            NotificationCategory::FriendRequest => toggles.friend_requests = on,
            NotificationCategory::FriendAccepted => toggles.friend_accepted = on,
            NotificationCategory::ChatInvite => toggles.chat_invites = on,
        }
        toggles
    }

    #[test]
    fn stable_id_matches_known_values() {
        assert_eq!(stable_id(""), 0);
        assert_eq!(stable_id("c1"), 3118);
        assert_eq!(stable_id("hello"), 99_162_322);
        // Wraps instead of overflowing.
        let long = "z".repeat(64);
        assert_eq!(stable_id(&long), stable_id(&long));
    }

    #[test]
    fn alice_message_is_keyed_by_chat() {
        let toggles = NotificationToggles::default();
        let n = plan_notification(&alice_hi(), &toggles, NOW).unwrap();
        assert_eq!(n.id, stable_id("c1"));
        assert_eq!(n.category, NotificationCategory::Message);
        assert_eq!(n.title, "Alice");
        assert_eq!(n.body, "hi");
        assert_eq!(n.deep_link, "parley://chat/c1");
        assert_eq!(n.channel_id, "messages");

        let muted = with_category(NotificationCategory::Message, false);
        assert_eq!(plan_notification(&alice_hi(), &muted, NOW), None);
    }

    #[test]
    fn toggles_gate_every_category() {
        for category in NotificationCategory::ALL {
            let payload = payload_for(category);

            let on = with_category(category, true);
            let planned = plan_notification(&payload, &on, NOW).unwrap();
            assert_eq!(planned.category, category);

            let off = with_category(category, false);
            assert_eq!(plan_notification(&payload, &off, NOW), None, "{category:?}");

            let mut global_off = on;
            global_off.enabled = false;
            assert_eq!(plan_notification(&payload, &global_off, NOW), None, "{category:?}");
        }
    }

    #[test]
    fn other_category_toggles_do_not_interfere() {
        let mut toggles = NotificationToggles::default();
        toggles.messages = false;
        let payload = payload_for(NotificationCategory::FriendRequest);
        assert!(plan_notification(&payload, &toggles, NOW).is_some());
    }

    #[test]
    fn unknown_or_missing_type_is_ignored() {
        let toggles = NotificationToggles::default();
        let unknown = PushPayload::from([("type", "call_missed"), ("chatId", "c1")]);
        let untyped = PushPayload::from([("chatId", "c1")]);
        assert_eq!(plan_notification(&unknown, &toggles, NOW), None);
        assert_eq!(plan_notification(&untyped, &toggles, NOW), None);
    }

    #[test]
    fn social_categories_get_fresh_ids() {
        let toggles = NotificationToggles::default();
        let payload = payload_for(NotificationCategory::FriendRequest);
        let first = plan_notification(&payload, &toggles, NOW).unwrap();
        let second = plan_notification(&payload, &toggles, NOW + 1).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.deep_link, "parley://friends/requests/r9");
        assert_eq!(first.body, "bob wants to be your friend");
    }

    #[test]
    fn message_without_chat_falls_back_to_time_id() {
        let toggles = NotificationToggles::default();
        let payload = PushPayload::from([("type", "new_message"), ("messageType", "image")]);
        let n = plan_notification(&payload, &toggles, NOW).unwrap();
        assert_eq!(n.id, time_id(NOW));
        assert_eq!(n.title, "New message");
        assert_eq!(n.body, "Photo");
        assert_eq!(n.deep_link, "parley://chats");
    }

    #[test]
    fn sound_and_vibration_toggles_shape_presentation() {
        let mut toggles = NotificationToggles::default();
        toggles.sound = false;
        toggles.vibration = false;
        let n = plan_notification(&alice_hi(), &toggles, NOW).unwrap();
        assert!(n.silent);
        assert_eq!(n.vibration, None);
    }

    #[test]
    fn invite_names_inviter_and_chat() {
        let toggles = NotificationToggles::default();
        let payload = payload_for(NotificationCategory::ChatInvite);
        let n = plan_notification(&payload, &toggles, NOW).unwrap();
        assert_eq!(n.body, "dave added you to Hiking");
        assert_eq!(n.deep_link, "parley://chat/g1");
    }

    #[test]
    fn payload_ids_are_escaped_in_links() {
        let toggles = NotificationToggles::default();

        let message = PushPayload::from([("type", "new_message"), ("chatId", "c1/../admin?x=1")]);
        let n = plan_notification(&message, &toggles, NOW).unwrap();
        assert_eq!(n.deep_link, "parley://chat/c1%2F..%2Fadmin%3Fx%3D1");
        // Coalescing still keys on the raw chat id.
        assert_eq!(n.id, stable_id("c1/../admin?x=1"));

        let request = PushPayload::from([("type", "friend_request"), ("requestId", "r 9#")]);
        let n = plan_notification(&request, &toggles, NOW).unwrap();
        assert_eq!(n.deep_link, "parley://friends/requests/r%209%23");

        let accepted = PushPayload::from([("type", "friend_request_accepted"), ("fromUserId", "u/3")]);
        let n = plan_notification(&accepted, &toggles, NOW).unwrap();
        assert_eq!(n.deep_link, "parley://profile/u%2F3");
    }

    #[test]
    fn time_id_is_non_negative() {
        assert!(time_id(-5) >= 0);
        assert!(time_id(i64::MAX) >= 0);
    }
}
