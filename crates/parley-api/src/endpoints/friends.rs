use parley_shared::requests::{FriendRequestBody, RespondFriendRequestBody, SuccessResponse};
use parley_shared::{FriendRequest, User};

use crate::client::{segment, ApiClient};
use crate::error::Result;

impl ApiClient {
    pub async fn list_friends(&self) -> Result<Vec<User>> {
        self.get("/api/friends").await
    }

    /// Pending requests addressed to the current user.
    pub async fn list_friend_requests(&self) -> Result<Vec<FriendRequest>> {
        self.get("/api/friends/requests").await
    }

    pub async fn send_friend_request(&self, user_id: &str) -> Result<SuccessResponse> {
        let body = FriendRequestBody {
            user_id: user_id.to_string(),
        };
        self.post("/api/friends/request", &body).await
    }

    pub async fn accept_friend_request(&self, request_id: &str) -> Result<SuccessResponse> {
        let body = RespondFriendRequestBody {
            request_id: request_id.to_string(),
        };
        self.post("/api/friends/accept", &body).await
    }

    pub async fn reject_friend_request(&self, request_id: &str) -> Result<SuccessResponse> {
        let body = RespondFriendRequestBody {
            request_id: request_id.to_string(),
        };
        self.post("/api/friends/reject", &body).await
    }

    pub async fn remove_friend(&self, user_id: &str) -> Result<SuccessResponse> {
        self.delete(&format!("/api/friends/{}", segment(user_id)))
            .await
    }

    pub async fn follow_user(&self, user_id: &str) -> Result<SuccessResponse> {
        self.post_empty(&format!("/api/users/{}/follow", segment(user_id)))
            .await
    }

    pub async fn unfollow_user(&self, user_id: &str) -> Result<SuccessResponse> {
        self.delete(&format!("/api/users/{}/follow", segment(user_id)))
            .await
    }
}
