use reqwest::multipart::{Form, Part};
use tracing::info;

use parley_shared::constants::MAX_UPLOAD_SIZE;
use parley_shared::requests::UploadResponse;

use crate::client::ApiClient;
use crate::error::{ApiError, Result};

impl ApiClient {
    /// Upload a file as multipart field `file`.
    pub async fn upload_file(
        &self,
        file_name: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<UploadResponse> {
        if data.is_empty() {
            return Err(ApiError::InvalidRequest("file is empty".into()));
        }
        if data.len() > MAX_UPLOAD_SIZE {
            return Err(ApiError::InvalidRequest(format!(
                "file too large: {} bytes (max {})",
                data.len(),
                MAX_UPLOAD_SIZE
            )));
        }

        let size = data.len();
        let part = Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid mime type {mime_type}: {e}")))?;
        let form = Form::new().part("file", part);

        let resp: UploadResponse = self.send_multipart("/api/upload", form).await?;
        info!(file_name, size, url = %resp.url, "File uploaded");
        Ok(resp)
    }

    /// Read a file from disk and upload it, guessing nothing about its type.
    pub async fn upload_path(&self, path: &std::path::Path, mime_type: &str) -> Result<UploadResponse> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("failed to read {}: {e}", path.display())))?;
        self.upload_file(&file_name, mime_type, data).await
    }
}
