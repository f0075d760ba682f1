use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::call::CallSnapshot;
use crate::message::MessageKind;
use crate::types::EntityId;
use crate::user::UserSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Direct,
    Group,
}

/// Short form of the latest message, as shown in the chat list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMessage {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    #[serde(flatten)]
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub participants: Vec<UserSummary>,
    #[serde(default)]
    pub last_message: Option<LastMessage>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub active_call: Option<CallSnapshot>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Chat {
    pub fn is_group(&self) -> bool {
        self.kind == ChatKind::Group
    }

    /// Title as seen by `viewer_id`: the group name, or the other party of a
    /// direct chat.
    pub fn title_for(&self, viewer_id: &str) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            if self.is_group() {
                return name.to_string();
            }
        }
        self.participants
            .iter()
            .find(|p| p.id != viewer_id)
            .map(|p| p.display_label().to_string())
            .or_else(|| self.name.clone())
            .unwrap_or_default()
    }

    pub fn has_active_call(&self) -> bool {
        self.active_call
            .as_ref()
            .map(|c| c.status.is_live())
            .unwrap_or(false)
    }

    pub fn includes(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p.id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct_chat() -> Chat {
        serde_json::from_str(
            r#"{
                "_id": "c1",
                "type": "direct",
                "participants": [
                    {"id": "me", "username": "me"},
                    {"_id": "u2", "username": "bob", "displayName": "Bob"}
                ],
                "unreadCount": 3,
                "lastMessage": {"content": "hey", "type": "text", "createdAt": "2024-05-01T10:00:00Z"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn direct_title_is_other_participant() {
        let chat = direct_chat();
        assert_eq!(chat.id, "c1");
        assert_eq!(chat.title_for("me"), "Bob");
        assert_eq!(chat.unread_count, 3);
        assert!(chat.includes("u2"));
        assert!(!chat.has_active_call());
    }

    #[test]
    fn group_title_is_name() {
        let mut chat = direct_chat();
        chat.kind = ChatKind::Group;
        chat.name = Some("Team".into());
        assert_eq!(chat.title_for("me"), "Team");
    }

    #[test]
    fn active_call_snapshot_is_embedded() {
        let chat: Chat = serde_json::from_str(
            r#"{"id":"c2","type":"group","activeCall":{"channelName":"c2","status":"ringing"}}"#,
        )
        .unwrap();
        assert!(chat.has_active_call());
    }
}
