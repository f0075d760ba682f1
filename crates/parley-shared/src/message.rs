//! Chat messages, reactions and the client-only delivery flag.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::EntityId;
use crate::user::UserSummary;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    File,
    Audio,
    Video,
    Call,
    System,
    #[serde(other)]
    Unknown,
}

impl MessageKind {
    /// Parse the lowercase wire tag, as carried by push payloads.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => MessageKind::Text,
            "image" => MessageKind::Image,
            "file" => MessageKind::File,
            "audio" => MessageKind::Audio,
            "video" => MessageKind::Video,
            "call" => MessageKind::Call,
            "system" => MessageKind::System,
            _ => MessageKind::Unknown,
        }
    }

    /// Placeholder shown in previews for messages without text.
    pub fn placeholder(self) -> &'static str {
        match self {
            MessageKind::Text | MessageKind::Unknown => "Message",
            MessageKind::Image => "Photo",
            MessageKind::File => "File",
            MessageKind::Audio => "Voice message",
            MessageKind::Video => "Video",
            MessageKind::Call => "Call",
            MessageKind::System => "Update",
        }
    }
}

/// Local delivery state. Never sent to or received from the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryState {
    #[default]
    Sent,
    Sending,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub user_id: String,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRef {
    pub message_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sender_name: Option<String>,
}

/// Payload of `system` messages (member joined, call ended, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemEvent {
    pub action: String,
    #[serde(default)]
    pub actor_id: Option<String>,
    #[serde(default)]
    pub target_ids: Vec<String>,
    #[serde(default)]
    pub call_duration_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub url: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(flatten)]
    pub id: EntityId,
    pub chat_id: String,
    pub sender: UserSummary,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_edited: bool,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub reply_to: Option<ReplyRef>,
    #[serde(default)]
    pub system_event: Option<SystemEvent>,
    #[serde(default)]
    pub attachment: Option<Attachment>,
    #[serde(skip)]
    pub delivery: DeliveryState,
}

impl Message {
    /// Optimistic local copy of an outgoing text message, shown until the
    /// backend echoes the stored version.
    pub fn pending(chat_id: impl Into<String>, sender: UserSummary, content: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(format!("local-{}", Uuid::new_v4())),
            chat_id: chat_id.into(),
            sender,
            content: content.into(),
            kind: MessageKind::Text,
            created_at: Utc::now(),
            is_edited: false,
            reactions: Vec::new(),
            reply_to: None,
            system_event: None,
            attachment: None,
            delivery: DeliveryState::Sending,
        }
    }

    pub fn is_local(&self) -> bool {
        self.id.starts_with("local-")
    }

    pub fn mark_failed(&mut self) {
        self.delivery = DeliveryState::Failed;
    }

    pub fn has_reacted(&self, user_id: &str, emoji: &str) -> bool {
        self.reactions
            .iter()
            .any(|r| r.user_id == user_id && r.emoji == emoji)
    }

    /// Number of distinct users per emoji. Duplicate (user, emoji) pairs
    /// from the backend count once.
    pub fn reaction_counts(&self) -> BTreeMap<&str, usize> {
        let mut seen = std::collections::HashSet::new();
        let mut counts = BTreeMap::new();
        for r in &self.reactions {
            if seen.insert((r.user_id.as_str(), r.emoji.as_str())) {
                *counts.entry(r.emoji.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn preview_text(&self) -> String {
        if self.content.trim().is_empty() {
            self.kind.placeholder().to_string()
        } else {
            self.content.clone()
        }
    }
}

/// One page of history, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePage {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub has_more: bool,
}

impl MessagePage {
    /// Cursor for the next (older) page.
    pub fn next_cursor(&self) -> Option<&str> {
        if !self.has_more {
            return None;
        }
        self.messages.last().map(|m| m.id.as_str())
    }
}
