use parley_shared::constants::PUSH_PLATFORM;
use parley_shared::requests::{PushTokenRequest, SuccessResponse, UpdateProfileRequest};
use parley_shared::User;

use crate::client::{segment, ApiClient};
use crate::error::Result;

impl ApiClient {
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        self.get(&format!("/api/users/{}", segment(user_id))).await
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        self.get_query("/api/users/search", &[("q", query)]).await
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User> {
        self.put("/api/users/me", request).await
    }

    /// Hand the push provider's device token to the backend.
    pub async fn register_push_token(&self, token: &str) -> Result<SuccessResponse> {
        let body = PushTokenRequest {
            token: token.to_string(),
            platform: PUSH_PLATFORM.to_string(),
        };
        self.post("/api/users/push-token", &body).await
    }
}
