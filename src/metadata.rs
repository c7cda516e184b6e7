// src/metadata.rs

use chrono::{Local, NaiveDateTime};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// Metadata extracted for one image. Fields that could not be read stay `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataRecord {
    pub filename: String,
    pub position: Option<GeoPosition>,
    pub captured_at: Option<NaiveDateTime>,
    pub image_url: Option<String>,
}

impl MetadataRecord {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Default::default()
        }
    }

    pub fn latitude(&self) -> Option<f64> {
        self.position.map(|p| p.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.position.map(|p| p.longitude)
    }

    /// Capture date as `MM/DD/YYYY`.
    pub fn date(&self) -> Option<String> {
        self.captured_at.map(|dt| dt.format("%m/%d/%Y").to_string())
    }

    /// Capture time of day as `HH:MM:SS`.
    pub fn time(&self) -> Option<String> {
        self.captured_at.map(|dt| dt.format("%H:%M:%S").to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorLogEntry {
    pub timestamp: NaiveDateTime,
    pub message: String,
}

impl ErrorLogEntry {
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_date_and_time_follow_capture_timestamp() {
        let mut record = MetadataRecord::new("IMG_0001.jpg");
        assert_eq!(record.date(), None);
        assert_eq!(record.time(), None);

        record.captured_at = NaiveDate::from_ymd_opt(2023, 7, 4)
            .and_then(|d| d.and_hms_opt(10, 15, 30));
        assert_eq!(record.date().as_deref(), Some("07/04/2023"));
        assert_eq!(record.time().as_deref(), Some("10:15:30"));
    }

    #[test]
    fn test_error_log_entry_display() {
        let entry = ErrorLogEntry {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 2)
                .and_then(|d| d.and_hms_opt(3, 4, 5))
                .unwrap(),
            message: "Error uploading a.jpg to GCS: boom".to_string(),
        };
        assert_eq!(
            entry.to_string(),
            "[2024-01-02 03:04:05] Error uploading a.jpg to GCS: boom"
        );
    }
}
