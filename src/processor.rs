use crate::coordinates::dms_to_decimal;
use crate::error::AppError;
use crate::metadata::{GeoPosition, MetadataRecord};
use crate::tags::{self, TagName};
use chrono::NaiveDateTime;
use exif::{Context, In, Reader, Value};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Metadata read from one image, plus the EXIF entries that had to be
/// skipped to get it.
#[derive(Debug)]
pub struct Extraction {
    pub record: MetadataRecord,
    pub warnings: Vec<String>,
}

/// Reads the embedded EXIF dictionary of one image.
///
/// Files that are not a recognised image format, or carry no EXIF segment,
/// produce a record with only `filename` set. Broken entries inside an
/// otherwise readable dictionary are skipped and reported in
/// [`Extraction::warnings`]. I/O failures and structurally unusable EXIF
/// are returned as errors; callers fall back to [`MetadataRecord::new`].
pub fn extract_metadata(path: &Path, filename: &str) -> Result<Extraction, AppError> {
    let mut metadata = MetadataRecord::new(filename);
    let mut warnings = Vec::new();

    log::trace!("Extracting EXIF data for image: {:?}", path);
    let file = File::open(path)?;
    let mut buf_reader = BufReader::new(file);
    let mut reader = Reader::new();
    reader.continue_on_error(true);
    let exif = match reader.read_from_container(&mut buf_reader) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) | Err(exif::Error::InvalidFormat("Unknown image format")) => {
            log::debug!("No EXIF data found for {:?}", path);
            return Ok(Extraction {
                record: metadata,
                warnings,
            });
        }
        Err(e) => e.distill_partial_result(|errors| {
            for error in errors {
                log::warn!("Skipped EXIF entry in {:?}: {}", path, error);
                warnings.push(error.to_string());
            }
        })?,
    };
    log::trace!("EXIF data found for {:?}", path);

    let mut gps_info: HashMap<TagName, &Value> = HashMap::new();
    let mut timestamps = CaptureTimestamps::default();

    for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
        if field.tag.context() == Context::Gps {
            gps_info.insert(tags::gps_tag_name(field.tag.number()), &field.value);
            continue;
        }
        let tag = tags::tag_name(field.tag.number());
        if let Some(text) = ascii_value(&field.value) {
            timestamps.record(tag, &text);
        }
    }

    if !gps_info.is_empty() {
        log::trace!("{} entries under {} for {:?}", gps_info.len(), tags::GPS_INFO, path);
        metadata.position = position_from_gps(&gps_info);
        if metadata.position.is_none() {
            log::debug!("Incomplete GPS data for {:?}", path);
        }
    }

    metadata.captured_at = timestamps.resolve();
    log::trace!("Extracted metadata for {:?}: {:?}", path, metadata);

    Ok(Extraction {
        record: metadata,
        warnings,
    })
}

/// Parses an EXIF `YYYY:MM:DD HH:MM:SS` value. The whole string must match.
pub fn parse_exif_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, EXIF_DATETIME_FORMAT).ok()
}

/// Successfully parsed date/time tags of one image.
///
/// When several are present, DateTimeOriginal wins over DateTimeDigitized,
/// which wins over DateTime. Unparsable values are ignored.
#[derive(Debug, Default)]
struct CaptureTimestamps {
    original: Option<NaiveDateTime>,
    digitized: Option<NaiveDateTime>,
    modified: Option<NaiveDateTime>,
}

impl CaptureTimestamps {
    fn record(&mut self, tag: TagName, value: &str) {
        let slot = if tag.is(tags::DATE_TIME_ORIGINAL) {
            &mut self.original
        } else if tag.is(tags::DATE_TIME_DIGITIZED) {
            &mut self.digitized
        } else if tag.is(tags::DATE_TIME) {
            &mut self.modified
        } else {
            return;
        };

        match parse_exif_datetime(value) {
            Some(parsed) => {
                slot.get_or_insert(parsed);
            }
            None => log::debug!("Unparsable {} value: {:?}", tag, value),
        }
    }

    fn resolve(self) -> Option<NaiveDateTime> {
        self.original.or(self.digitized).or(self.modified)
    }
}

fn position_from_gps(gps_info: &HashMap<TagName, &Value>) -> Option<GeoPosition> {
    let get = |name: &'static str| gps_info.get(&TagName::Known(name)).copied();

    let latitude = get(tags::GPS_LATITUDE).and_then(rational_triple)?;
    let latitude_ref = get(tags::GPS_LATITUDE_REF).and_then(ascii_value)?;
    let longitude = get(tags::GPS_LONGITUDE).and_then(rational_triple)?;
    let longitude_ref = get(tags::GPS_LONGITUDE_REF).and_then(ascii_value)?;

    Some(GeoPosition {
        latitude: dms_to_decimal(latitude, &latitude_ref),
        longitude: dms_to_decimal(longitude, &longitude_ref),
    })
}

fn rational_triple(value: &Value) -> Option<[f64; 3]> {
    match value {
        Value::Rational(v) if v.len() == 3 => {
            Some([v[0].to_f64(), v[1].to_f64(), v[2].to_f64()])
        }
        _ => None,
    }
}

fn ascii_value(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(v) => v
            .first()
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .filter(|s| !s.is_empty()),
        _ => None,
    }
}
