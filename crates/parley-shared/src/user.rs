//! User records as returned by the backend.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Moderator,
    Admin,
    #[serde(other)]
    Unknown,
}

/// A full user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub id: EntityId,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
    /// Ids of accepted friends.
    #[serde(default)]
    pub friends: BTreeSet<String>,
    #[serde(default)]
    pub followers: BTreeSet<String>,
    #[serde(default)]
    pub following: BTreeSet<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl User {
    pub fn is_friend(&self, user_id: &str) -> bool {
        self.friends.contains(user_id)
    }

    pub fn follows(&self, user_id: &str) -> bool {
        self.following.contains(user_id)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Some(UserRole::Admin))
    }

    /// Display name, or the username when no display name is set.
    pub fn display_label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// The slice of a user embedded in chats, messages and calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(flatten)]
    pub id: EntityId,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserSummary {
    pub fn display_label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
    #[serde(flatten)]
    pub id: EntityId,
    pub from: UserSummary,
    pub to: UserSummary,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_legacy_user_document() {
        let json = r#"{
            "_id": "u1",
            "username": "alice",
            "displayName": "Alice",
            "isOnline": true,
            "friends": ["u2", "u3", "u2"],
            "role": "moderator"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.is_online);
        assert_eq!(user.friends.len(), 2);
        assert!(user.is_friend("u3"));
        assert!(!user.follows("u3"));
        assert_eq!(user.role, Some(UserRole::Moderator));
    }

    #[test]
    fn unknown_role_does_not_fail() {
        let user: User =
            serde_json::from_str(r#"{"id":"u1","username":"a","role":"superuser"}"#).unwrap();
        assert_eq!(user.role, Some(UserRole::Unknown));
        assert!(!user.is_admin());
    }

    #[test]
    fn display_label_falls_back_to_username() {
        let user: User =
            serde_json::from_str(r#"{"id":"u1","username":"bob","displayName":"  "}"#).unwrap();
        assert_eq!(user.display_label(), "bob");
        assert_eq!(user.summary().display_label(), "bob");
    }
}
