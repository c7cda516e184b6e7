use crate::error::AppError;
use crate::metadata::{ErrorLogEntry, MetadataRecord};
use crate::processor;
use crate::storage::Uploader;
use crate::walker;
use std::collections::HashSet;
use std::path::Path;

/// Outcome of one pass over a folder.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One record per matched image, in discovery order.
    pub records: Vec<MetadataRecord>,
    pub errors: Vec<ErrorLogEntry>,
    pub skipped: usize,
    pub uploaded: usize,
    pub upload_failures: usize,
}

impl BatchReport {
    fn log_error(&mut self, message: String) {
        log::error!("{}", message);
        self.errors.push(ErrorLogEntry::now(message));
    }
}

/// Extracts metadata from every image directly inside `folder`, uploading each
/// one when an `uploader` is given.
///
/// Files are handled one at a time. Extraction and upload failures are
/// recorded in the report and never drop the file's record.
pub async fn run_batch(
    folder: &Path,
    allowed_extensions: &HashSet<String>,
    uploader: Option<&dyn Uploader>,
) -> Result<BatchReport, AppError> {
    if !folder.is_dir() {
        return Err(AppError::FolderNotFound(folder.to_path_buf()));
    }

    let listing = walker::list_images(folder, allowed_extensions)?;
    let mut report = BatchReport {
        skipped: listing.skipped.len(),
        ..Default::default()
    };

    for path in listing.images {
        let filename = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        log::info!("Processing {}...", filename);

        let mut record = match processor::extract_metadata(&path, &filename) {
            Ok(extraction) => {
                for warning in extraction.warnings {
                    report.log_error(format!("Partially corrupt EXIF in {}: {}", filename, warning));
                }
                extraction.record
            }
            Err(e) => {
                report.log_error(format!("Error extracting metadata from {}: {}", filename, e));
                MetadataRecord::new(filename.as_str())
            }
        };

        if let Some(uploader) = uploader {
            match uploader.upload(&path, &filename).await {
                Ok(url) => {
                    log::info!("Uploaded {} to {}", filename, url);
                    record.image_url = Some(url);
                    report.uploaded += 1;
                }
                Err(e) => {
                    report.log_error(format!("Error uploading {} to GCS: {}", filename, e));
                    report.upload_failures += 1;
                }
            }
        }

        report.records.push(record);
    }

    log::info!(
        "Batch finished: {} records, {} errors.",
        report.records.len(),
        report.errors.len()
    );
    Ok(report)
}
