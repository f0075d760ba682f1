//! Voice call snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::user::UserSummary;

/// Lifecycle of a call. Status only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Idle,
    Ringing,
    Connecting,
    Connected,
    Ended,
}

impl CallStatus {
    fn rank(self) -> u8 {
        match self {
            CallStatus::Idle => 0,
            CallStatus::Ringing => 1,
            CallStatus::Connecting => 2,
            CallStatus::Connected => 3,
            CallStatus::Ended => 4,
        }
    }

    pub fn can_advance_to(self, next: CallStatus) -> bool {
        next.rank() > self.rank()
    }

    pub fn is_live(self) -> bool {
        matches!(self, CallStatus::Ringing | CallStatus::Connecting | CallStatus::Connected)
    }
}

impl Default for CallStatus {
    fn default() -> Self {
        CallStatus::Idle
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallParticipant {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_muted: bool,
    #[serde(default)]
    pub is_speaking: bool,
    /// Joined without publishing audio.
    #[serde(default)]
    pub is_listener: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSnapshot {
    pub channel_name: String,
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub caller: Option<UserSummary>,
    #[serde(default)]
    pub participants: Vec<CallParticipant>,
    #[serde(default)]
    pub status: CallStatus,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

impl CallSnapshot {
    pub fn new(channel_name: impl Into<String>) -> Self {
        Self {
            channel_name: channel_name.into(),
            chat_id: None,
            caller: None,
            participants: Vec::new(),
            status: CallStatus::Idle,
            started_at: None,
        }
    }

    /// Move to `next`, rejecting any transition that is not strictly forward.
    pub fn advance(&mut self, next: CallStatus) -> Result<(), ModelError> {
        if !self.status.can_advance_to(next) {
            return Err(ModelError::InvalidCallTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    pub fn participant(&self, user_id: &str) -> Option<&CallParticipant> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }

    pub fn participant_mut(&mut self, user_id: &str) -> Option<&mut CallParticipant> {
        self.participants.iter_mut().find(|p| p.user_id == user_id)
    }

    pub fn speakers(&self) -> impl Iterator<Item = &CallParticipant> {
        self.participants.iter().filter(|p| p.is_speaking && !p.is_muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_moves_forward_only() {
        let mut call = CallSnapshot::new("room-1");
        call.advance(CallStatus::Ringing).unwrap();
        call.advance(CallStatus::Connected).unwrap();

        let err = call.advance(CallStatus::Connecting).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidCallTransition {
                from: CallStatus::Connected,
                to: CallStatus::Connecting,
            }
        );
        assert!(call.advance(CallStatus::Connected).is_err());

        call.advance(CallStatus::Ended).unwrap();
        assert!(call.advance(CallStatus::Idle).is_err());
    }

    #[test]
    fn speakers_excludes_muted() {
        let json = r#"{
            "channelName": "c",
            "status": "connected",
            "participants": [
                {"userId": "a", "isSpeaking": true},
                {"userId": "b", "isSpeaking": true, "isMuted": true},
                {"userId": "c", "isListener": true}
            ]
        }"#;
        let call: CallSnapshot = serde_json::from_str(json).unwrap();
        let speakers: Vec<_> = call.speakers().map(|p| p.user_id.as_str()).collect();
        assert_eq!(speakers, vec!["a"]);
        assert!(call.participant("c").unwrap().is_listener);
        assert!(call.status.is_live());
    }
}
