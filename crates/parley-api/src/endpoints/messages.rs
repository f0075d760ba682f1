use parley_shared::constants::DEFAULT_PAGE_SIZE;
use parley_shared::requests::{
    EditMessageRequest, MessageQuery, ReactionRequest, SendMessageRequest, SuccessResponse,
};
use parley_shared::{Message, MessagePage};

use crate::client::{segment, ApiClient};
use crate::error::{ApiError, Result};

impl ApiClient {
    /// Fetch one page of history, older than `query.before` when set.
    pub async fn list_messages(&self, chat_id: &str, query: &MessageQuery) -> Result<MessagePage> {
        let query = MessageQuery {
            before: query.before.clone(),
            limit: Some(query.limit.unwrap_or(DEFAULT_PAGE_SIZE)),
        };
        self.get_query(&format!("/api/chats/{}/messages", segment(chat_id)), &query)
            .await
    }

    pub async fn send_message(&self, chat_id: &str, request: &SendMessageRequest) -> Result<Message> {
        if request.content.trim().is_empty() && request.attachment_url.is_none() {
            return Err(ApiError::InvalidRequest("message has no content".into()));
        }
        self.post(&format!("/api/chats/{}/messages", segment(chat_id)), request)
            .await
    }

    pub async fn edit_message(&self, message_id: &str, content: &str) -> Result<Message> {
        let body = EditMessageRequest {
            content: content.to_string(),
        };
        self.put(&format!("/api/messages/{}", segment(message_id)), &body)
            .await
    }

    pub async fn delete_message(&self, message_id: &str) -> Result<SuccessResponse> {
        self.delete(&format!("/api/messages/{}", segment(message_id)))
            .await
    }

    /// Returns the message with its updated reaction list.
    pub async fn add_reaction(&self, message_id: &str, emoji: &str) -> Result<Message> {
        let body = ReactionRequest {
            emoji: emoji.to_string(),
        };
        self.post(&format!("/api/messages/{}/reactions", segment(message_id)), &body)
            .await
    }

    pub async fn remove_reaction(&self, message_id: &str, emoji: &str) -> Result<Message> {
        self.delete(&format!(
            "/api/messages/{}/reactions/{}",
            segment(message_id),
            segment(emoji)
        ))
        .await
    }
}
