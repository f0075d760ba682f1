//! Inbound push payloads.
//!
//! The push provider delivers a flat string map. The `type` entry selects
//! the category; the remaining entries depend on it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PushKind {
    NewMessage,
    FriendRequest,
    FriendRequestAccepted,
    ChatInvite,
    Unknown,
}

impl PushKind {
    pub fn from_type(raw: Option<&str>) -> Self {
        match raw {
            Some("new_message") => PushKind::NewMessage,
            Some("friend_request") => PushKind::FriendRequest,
            Some("friend_request_accepted") => PushKind::FriendRequestAccepted,
            Some("chat_invite") => PushKind::ChatInvite,
            _ => PushKind::Unknown,
        }
    }

    pub fn as_type(self) -> &'static str {
        match self {
            PushKind::NewMessage => "new_message",
            PushKind::FriendRequest => "friend_request",
            PushKind::FriendRequestAccepted => "friend_request_accepted",
            PushKind::ChatInvite => "chat_invite",
            PushKind::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    data: HashMap<String, String>,
}

impl PushPayload {
    pub fn new(data: HashMap<String, String>) -> Self {
        Self { data }
    }

    /// Build from a JSON object, keeping only string-valued entries.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let data = value
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();
        Self { data }
    }

    pub fn kind(&self) -> PushKind {
        PushKind::from_type(self.get("type"))
    }

    /// Value for `key`, treating empty strings as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn chat_id(&self) -> Option<&str> {
        self.get("chatId")
    }

    pub fn chat_name(&self) -> Option<&str> {
        self.get("chatName")
    }

    pub fn sender_id(&self) -> Option<&str> {
        self.get("senderId")
    }

    pub fn sender_name(&self) -> Option<&str> {
        self.get("senderName")
    }

    pub fn body(&self) -> Option<&str> {
        self.get("body").or_else(|| self.get("content"))
    }

    pub fn message_type(&self) -> Option<&str> {
        self.get("messageType")
    }

    pub fn from_user_id(&self) -> Option<&str> {
        self.get("fromUserId")
    }

    pub fn from_username(&self) -> Option<&str> {
        self.get("fromUsername")
    }

    pub fn request_id(&self) -> Option<&str> {
        self.get("requestId")
    }

    pub fn inviter_name(&self) -> Option<&str> {
        self.get("inviterName")
    }

    /// Sender-side timestamp in epoch milliseconds, when present and numeric.
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.get("timestamp").and_then(|t| t.parse().ok())
    }
}

impl From<HashMap<String, String>> for PushPayload {
    fn from(data: HashMap<String, String>) -> Self {
        Self::new(data)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for PushPayload {
    fn from(entries: [(&str, &str); N]) -> Self {
        Self::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_type_field() {
        let p = PushPayload::from([("type", "friend_request_accepted")]);
        assert_eq!(p.kind(), PushKind::FriendRequestAccepted);

        let p = PushPayload::from([("type", "something_else")]);
        assert_eq!(p.kind(), PushKind::Unknown);

        assert_eq!(PushPayload::default().kind(), PushKind::Unknown);
    }

    #[test]
    fn from_json_keeps_strings_only() {
        let v = serde_json::json!({
            "type": "new_message",
            "chatId": "c1",
            "badge": 3,
            "timestamp": "1714557600000"
        });
        let p = PushPayload::from_json(&v);
        assert_eq!(p.chat_id(), Some("c1"));
        assert_eq!(p.get("badge"), None);
        assert_eq!(p.timestamp_millis(), Some(1_714_557_600_000));
    }

    #[test]
    fn empty_values_are_absent() {
        let p = PushPayload::from([("type", "new_message"), ("chatId", ""), ("content", "hi")]);
        assert_eq!(p.chat_id(), None);
        assert_eq!(p.body(), Some("hi"));
    }
}
