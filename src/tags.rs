use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

pub const GPS_INFO: &str = "GPSInfo";
pub const DATE_TIME: &str = "DateTime";
pub const DATE_TIME_ORIGINAL: &str = "DateTimeOriginal";
pub const DATE_TIME_DIGITIZED: &str = "DateTimeDigitized";

pub const GPS_LATITUDE_REF: &str = "GPSLatitudeRef";
pub const GPS_LATITUDE: &str = "GPSLatitude";
pub const GPS_LONGITUDE_REF: &str = "GPSLongitudeRef";
pub const GPS_LONGITUDE: &str = "GPSLongitude";

lazy_static! {
    static ref PRIMARY_TAGS: HashMap<u16, &'static str> = [
        (0x00fe, "NewSubfileType"),
        (0x0100, "ImageWidth"),
        (0x0101, "ImageLength"),
        (0x0102, "BitsPerSample"),
        (0x0103, "Compression"),
        (0x0106, "PhotometricInterpretation"),
        (0x010e, "ImageDescription"),
        (0x010f, "Make"),
        (0x0110, "Model"),
        (0x0111, "StripOffsets"),
        (0x0112, "Orientation"),
        (0x0115, "SamplesPerPixel"),
        (0x0116, "RowsPerStrip"),
        (0x0117, "StripByteCounts"),
        (0x011a, "XResolution"),
        (0x011b, "YResolution"),
        (0x011c, "PlanarConfiguration"),
        (0x0128, "ResolutionUnit"),
        (0x0131, "Software"),
        (0x0132, DATE_TIME),
        (0x013b, "Artist"),
        (0x0201, "JpegIFOffset"),
        (0x0202, "JpegIFByteCount"),
        (0x0213, "YCbCrPositioning"),
        (0x8298, "Copyright"),
        (0x829a, "ExposureTime"),
        (0x829d, "FNumber"),
        (0x8769, "ExifOffset"),
        (0x8822, "ExposureProgram"),
        (0x8825, GPS_INFO),
        (0x8827, "ISOSpeedRatings"),
        (0x9000, "ExifVersion"),
        (0x9003, DATE_TIME_ORIGINAL),
        (0x9004, DATE_TIME_DIGITIZED),
        (0x9010, "OffsetTime"),
        (0x9011, "OffsetTimeOriginal"),
        (0x9012, "OffsetTimeDigitized"),
        (0x9101, "ComponentsConfiguration"),
        (0x9201, "ShutterSpeedValue"),
        (0x9202, "ApertureValue"),
        (0x9203, "BrightnessValue"),
        (0x9204, "ExposureBiasValue"),
        (0x9205, "MaxApertureValue"),
        (0x9207, "MeteringMode"),
        (0x9208, "LightSource"),
        (0x9209, "Flash"),
        (0x920a, "FocalLength"),
        (0x927c, "MakerNote"),
        (0x9286, "UserComment"),
        (0x9290, "SubsecTime"),
        (0x9291, "SubsecTimeOriginal"),
        (0x9292, "SubsecTimeDigitized"),
        (0xa000, "FlashPixVersion"),
        (0xa001, "ColorSpace"),
        (0xa002, "ExifImageWidth"),
        (0xa003, "ExifImageHeight"),
        (0xa005, "ExifInteroperabilityOffset"),
        (0xa217, "SensingMethod"),
        (0xa300, "FileSource"),
        (0xa301, "SceneType"),
        (0xa401, "CustomRendered"),
        (0xa402, "ExposureMode"),
        (0xa403, "WhiteBalance"),
        (0xa404, "DigitalZoomRatio"),
        (0xa405, "FocalLengthIn35mmFilm"),
        (0xa406, "SceneCaptureType"),
        (0xa420, "ImageUniqueID"),
        (0xa430, "CameraOwnerName"),
        (0xa431, "BodySerialNumber"),
        (0xa432, "LensSpecification"),
        (0xa433, "LensMake"),
        (0xa434, "LensModel"),
    ]
    .into_iter()
    .collect();

    static ref GPS_TAGS: HashMap<u16, &'static str> = [
        (0x00, "GPSVersionID"),
        (0x01, GPS_LATITUDE_REF),
        (0x02, GPS_LATITUDE),
        (0x03, GPS_LONGITUDE_REF),
        (0x04, GPS_LONGITUDE),
        (0x05, "GPSAltitudeRef"),
        (0x06, "GPSAltitude"),
        (0x07, "GPSTimeStamp"),
        (0x08, "GPSSatellites"),
        (0x09, "GPSStatus"),
        (0x0a, "GPSMeasureMode"),
        (0x0b, "GPSDOP"),
        (0x0c, "GPSSpeedRef"),
        (0x0d, "GPSSpeed"),
        (0x0e, "GPSTrackRef"),
        (0x0f, "GPSTrack"),
        (0x10, "GPSImgDirectionRef"),
        (0x11, "GPSImgDirection"),
        (0x12, "GPSMapDatum"),
        (0x13, "GPSDestLatitudeRef"),
        (0x14, "GPSDestLatitude"),
        (0x15, "GPSDestLongitudeRef"),
        (0x16, "GPSDestLongitude"),
        (0x17, "GPSDestBearingRef"),
        (0x18, "GPSDestBearing"),
        (0x19, "GPSDestDistanceRef"),
        (0x1a, "GPSDestDistance"),
        (0x1b, "GPSProcessingMethod"),
        (0x1c, "GPSAreaInformation"),
        (0x1d, "GPSDateStamp"),
        (0x1e, "GPSDifferential"),
        (0x1f, "GPSHPositioningError"),
    ]
    .into_iter()
    .collect();
}

/// Name of an EXIF tag. Ids missing from the tables resolve to themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagName {
    Known(&'static str),
    Unknown(u16),
}

impl TagName {
    pub fn is(&self, name: &str) -> bool {
        matches!(self, TagName::Known(known) if *known == name)
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagName::Known(name) => f.write_str(name),
            TagName::Unknown(id) => write!(f, "{}", id),
        }
    }
}

/// Resolves a tag id from the primary (TIFF/EXIF) namespace.
pub fn tag_name(id: u16) -> TagName {
    PRIMARY_TAGS
        .get(&id)
        .map_or(TagName::Unknown(id), |name| TagName::Known(*name))
}

/// Resolves a tag id from the GPS sub-namespace.
pub fn gps_tag_name(id: u16) -> TagName {
    GPS_TAGS
        .get(&id)
        .map_or(TagName::Unknown(id), |name| TagName::Known(*name))
}
