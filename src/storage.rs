use crate::error::AppError;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait Uploader: Send + Sync {
    /// Uploads the file at `path` as `object_name` and returns its public URL.
    async fn upload(&self, path: &Path, object_name: &str) -> Result<String, AppError>;
}
