use parley_shared::constants::PUSH_PLATFORM;
use parley_shared::requests::AppVersionResponse;

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    pub async fn check_version(&self, current_version: &str) -> Result<AppVersionResponse> {
        self.get_query(
            "/api/app/version",
            &[("platform", PUSH_PLATFORM), ("current", current_version)],
        )
        .await
    }
}
