use parley_shared::requests::{
    AddParticipantsRequest, CreateDirectChatRequest, CreateGroupChatRequest, SuccessResponse,
};
use parley_shared::Chat;

use crate::client::{segment, ApiClient};
use crate::error::{ApiError, Result};

impl ApiClient {
    pub async fn list_chats(&self) -> Result<Vec<Chat>> {
        self.get("/api/chats").await
    }

    pub async fn get_chat(&self, chat_id: &str) -> Result<Chat> {
        self.get(&format!("/api/chats/{}", segment(chat_id))).await
    }

    /// Open (or fetch the existing) direct chat with `user_id`.
    pub async fn create_direct_chat(&self, user_id: &str) -> Result<Chat> {
        let body = CreateDirectChatRequest {
            user_id: user_id.to_string(),
        };
        self.post("/api/chats/direct", &body).await
    }

    pub async fn create_group_chat(&self, name: &str, participant_ids: &[String]) -> Result<Chat> {
        if name.trim().is_empty() {
            return Err(ApiError::InvalidRequest("group name is empty".into()));
        }
        let body = CreateGroupChatRequest {
            name: name.trim().to_string(),
            participant_ids: participant_ids.to_vec(),
        };
        self.post("/api/chats/group", &body).await
    }

    pub async fn add_participants(&self, chat_id: &str, user_ids: &[String]) -> Result<Chat> {
        let body = AddParticipantsRequest {
            user_ids: user_ids.to_vec(),
        };
        self.post(&format!("/api/chats/{}/participants", segment(chat_id)), &body)
            .await
    }

    pub async fn leave_chat(&self, chat_id: &str) -> Result<SuccessResponse> {
        self.delete(&format!("/api/chats/{}/leave", segment(chat_id)))
            .await
    }

    pub async fn mark_chat_read(&self, chat_id: &str) -> Result<SuccessResponse> {
        self.post_empty(&format!("/api/chats/{}/read", segment(chat_id)))
            .await
    }
}
