use crate::config::AppConfig;
use crate::error::AppError;
use crate::storage::Uploader;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Fallback source of the OAuth bearer token when none is configured.
const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Uploads images to a Google Cloud Storage bucket through the JSON API.
///
/// The bucket must allow public reads for the returned URLs to resolve.
pub struct GcsUploader {
    client: reqwest::Client,
    bucket: String,
    upload_base: Url,
    public_base: Url,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StoredObject {
    name: String,
    #[serde(default)]
    size: Option<String>,
}

impl GcsUploader {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        log::debug!("Creating GCS client for bucket: {}", config.bucket_name);
        let upload_base = base_url(&config.storage_upload_url)?;
        let public_base = base_url(&config.storage_public_url)?;

        let access_token = config
            .access_token
            .clone()
            .or_else(|| std::env::var(ACCESS_TOKEN_ENV).ok())
            .filter(|token| !token.is_empty());
        if access_token.is_none() {
            log::warn!("No GCS access token configured; uploads will be sent unauthenticated.");
        }

        Ok(Self {
            client: reqwest::Client::new(),
            bucket: config.bucket_name.clone(),
            upload_base,
            public_base,
            access_token,
        })
    }

    /// Media upload endpoint for `object_name`.
    pub fn upload_url(&self, object_name: &str) -> Url {
        let mut url = join_segments(&self.upload_base, &["b", self.bucket.as_str(), "o"]);
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", object_name);
        url
    }

    /// Publicly readable URL of `object_name`.
    pub fn public_url(&self, object_name: &str) -> String {
        join_segments(&self.public_base, &[self.bucket.as_str(), object_name]).to_string()
    }
}

#[async_trait]
impl Uploader for GcsUploader {
    async fn upload(&self, path: &Path, object_name: &str) -> Result<String, AppError> {
        let body = tokio::fs::read(path).await?;
        let content_type = mime_guess::from_path(path)
            .first()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);
        log::debug!(
            "Uploading {} ({} bytes, {}) to bucket {}",
            object_name,
            body.len(),
            content_type,
            self.bucket
        );

        let mut request = self
            .client
            .post(self.upload_url(object_name))
            .header(CONTENT_TYPE, content_type.to_string())
            .body(body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(AppError::Upload {
                object: object_name.to_string(),
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        // The object is stored once GCS answers 2xx; the body is informational.
        match serde_json::from_str::<StoredObject>(&text) {
            Ok(stored) => {
                log::trace!("GCS stored object {} (size {:?})", stored.name, stored.size)
            }
            Err(e) => log::debug!("Unexpected GCS response body for {}: {}", object_name, e),
        }

        Ok(self.public_url(object_name))
    }
}

fn base_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(AppError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
    }
    Ok(url)
}

fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // base_url() rejects cannot-be-a-base URLs, so this always succeeds
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Pulls `error.message` out of a GCS JSON error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
