use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Extract metadata into a CSV file.
    Extract,
    /// Extract metadata, upload every image and record its public URL.
    Upload,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Extract => write!(f, "extract"),
            Mode::Upload => write!(f, "upload"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub mode: Mode,
    pub log_level: String,
    /// Folder to scan. The user is prompted for one when unset.
    pub scan_directory: Option<String>,
    pub metadata_csv: String,
    pub metadata_extensions: HashSet<String>,
    pub upload_csv: String,
    pub upload_extensions: HashSet<String>,
    pub error_log_path: String,
    pub bucket_name: String,
    pub storage_public_url: String,
    pub storage_upload_url: String,
    pub access_token: Option<String>,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Self::builder_with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("PHOTO_METADATA"))
            .build()?;

        s.try_deserialize()
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("mode", "extract")?
            .set_default("log_level", "info")?
            .set_default("metadata_csv", "image_metadata.csv")?
            .set_default("metadata_extensions", vec!["jpg", "jpeg", "tiff", "tif"])?
            .set_default("upload_csv", "gcs_image_metadata_with_links.csv")?
            .set_default(
                "upload_extensions",
                vec!["jpg", "jpeg", "png", "gif", "tiff", "tif"],
            )?
            .set_default("error_log_path", "error_log.txt")?
            .set_default("bucket_name", "your-bucket-name")?
            .set_default("storage_public_url", "https://storage.googleapis.com")?
            .set_default(
                "storage_upload_url",
                "https://storage.googleapis.com/upload/storage/v1",
            )
    }

    /// Built-in defaults only, unaffected by config files or the environment.
    #[cfg(test)]
    pub fn defaults() -> Self {
        Self::builder_with_defaults()
            .and_then(|builder| builder.build())
            .and_then(|config| config.try_deserialize())
            .unwrap()
    }

    /// Extensions (lowercase, without the dot) accepted in the current mode.
    pub fn allowed_extensions(&self) -> &HashSet<String> {
        match self.mode {
            Mode::Extract => &self.metadata_extensions,
            Mode::Upload => &self.upload_extensions,
        }
    }

    pub fn output_csv(&self) -> &str {
        match self.mode {
            Mode::Extract => &self.metadata_csv,
            Mode::Upload => &self.upload_csv,
        }
    }
}
