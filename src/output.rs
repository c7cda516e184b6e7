use crate::error::AppError;
use crate::metadata::{ErrorLogEntry, MetadataRecord};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column set of the output CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLayout {
    /// `Filename,Latitude,Longitude,Date,Time`
    Metadata,
    /// The metadata columns followed by `ImageURL`.
    MetadataWithLinks,
}

impl CsvLayout {
    fn header(self) -> &'static [&'static str] {
        match self {
            CsvLayout::Metadata => &["Filename", "Latitude", "Longitude", "Date", "Time"],
            CsvLayout::MetadataWithLinks => &[
                "Filename", "Latitude", "Longitude", "Date", "Time", "ImageURL",
            ],
        }
    }

    fn row(self, record: &MetadataRecord) -> Vec<String> {
        let number = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();

        let mut row = vec![
            record.filename.clone(),
            number(record.latitude()),
            number(record.longitude()),
            record.date().unwrap_or_default(),
            record.time().unwrap_or_default(),
        ];
        if self == CsvLayout::MetadataWithLinks {
            row.push(record.image_url.clone().unwrap_or_default());
        }
        row
    }
}

/// Writes `records` to `path`, replacing any previous file. The header is
/// written even when there are no records.
pub fn write_csv(
    path: &Path,
    records: &[MetadataRecord],
    layout: CsvLayout,
) -> Result<(), AppError> {
    log::debug!("Writing {} rows to {:?}", records.len(), path);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(layout.header())?;
    for record in records {
        writer.write_record(layout.row(record))?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes one `[timestamp] message` line per entry, replacing any previous
/// file. Nothing is written when `entries` is empty; returns whether the file
/// was written.
pub fn write_error_log(path: &Path, entries: &[ErrorLogEntry]) -> Result<bool, AppError> {
    if entries.is_empty() {
        return Ok(false);
    }

    let mut file = BufWriter::new(File::create(path)?);
    for entry in entries {
        writeln!(file, "{}", entry)?;
    }
    file.flush()?;
    log::debug!("Wrote {} error entries to {:?}", entries.len(), path);
    Ok(true)
}
