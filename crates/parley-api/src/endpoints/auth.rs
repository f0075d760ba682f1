use tracing::{info, warn};

use parley_shared::requests::{AuthResponse, LoginRequest, RegisterRequest, SuccessResponse};
use parley_shared::User;

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let resp: AuthResponse = self.post("/api/auth/register", request).await?;
        self.adopt_session(&resp);
        Ok(resp)
    }

    /// Log in and, on success, store the returned token and user id in the
    /// session. A `success: false` response leaves the session untouched.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let resp: AuthResponse = self.post("/api/auth/login", request).await?;
        self.adopt_session(&resp);
        Ok(resp)
    }

    /// Tell the backend to drop the token, then clear the local session
    /// whether or not that call succeeded.
    pub async fn logout(&self) -> Result<SuccessResponse> {
        let result = self.post_empty("/api/auth/logout").await;
        if let Err(ref e) = result {
            warn!(error = %e, "Logout request failed, clearing session anyway");
        }
        self.session().clear();
        info!("Session cleared");
        result
    }

    pub async fn me(&self) -> Result<User> {
        let user: User = self.get("/api/auth/me").await?;
        if self.session().is_authenticated() {
            self.session().set_user_id(user.id.as_str());
        }
        Ok(user)
    }

    fn adopt_session(&self, resp: &AuthResponse) {
        if !resp.success {
            return;
        }
        if let Some(token) = resp.token.as_deref() {
            let user_id = resp.user.as_ref().map(|u| u.id.to_string());
            info!(user_id = user_id.as_deref().unwrap_or("-"), "Session established");
            self.session().set(token, user_id);
        }
    }
}
