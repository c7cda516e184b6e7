use exif::Error as ExifError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("EXIF error: {0}")]
    Exif(#[from] ExifError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Upload of {object} rejected with status {status}: {message}")]
    Upload {
        object: String,
        status: u16,
        message: String,
    },

    #[error("Folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),
}
