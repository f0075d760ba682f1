use parley_shared::requests::{
    CallTokenRequest, CallTokenResponse, JoinCallRequest, StartCallRequest, SuccessResponse,
};
use parley_shared::{CallSnapshot, ChatKind};

use crate::client::{segment, ApiClient};
use crate::error::Result;

impl ApiClient {
    /// Issue credentials for the voice SDK channel.
    pub async fn call_token(&self, channel_name: &str) -> Result<CallTokenResponse> {
        let body = CallTokenRequest {
            channel_name: channel_name.to_string(),
        };
        self.post("/api/calls/token", &body).await
    }

    pub async fn start_call(&self, chat_id: &str, kind: ChatKind) -> Result<CallSnapshot> {
        let body = StartCallRequest {
            chat_id: chat_id.to_string(),
            kind,
        };
        self.post("/api/calls/start", &body).await
    }

    pub async fn join_call(&self, channel_name: &str, as_listener: bool) -> Result<CallSnapshot> {
        let body = JoinCallRequest { as_listener };
        self.post(&format!("/api/calls/{}/join", segment(channel_name)), &body)
            .await
    }

    pub async fn leave_call(&self, channel_name: &str) -> Result<SuccessResponse> {
        self.post_empty(&format!("/api/calls/{}/leave", segment(channel_name)))
            .await
    }

    pub async fn end_call(&self, channel_name: &str) -> Result<SuccessResponse> {
        self.post_empty(&format!("/api/calls/{}/end", segment(channel_name)))
            .await
    }

    /// The live call of a chat, if any.
    pub async fn active_call(&self, chat_id: &str) -> Result<Option<CallSnapshot>> {
        self.get(&format!("/api/calls/active/{}", segment(chat_id)))
            .await
    }
}
