// Builders for EXIF fixtures used across the unit tests.

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use std::io::Cursor;
use std::path::Path;

pub fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

pub fn dms(tag: Tag, degrees: u32, minutes: u32, seconds: (u32, u32)) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![
            Rational { num: degrees, denom: 1 },
            Rational { num: minutes, denom: 1 },
            Rational {
                num: seconds.0,
                denom: seconds.1,
            },
        ]),
    }
}

/// Latitude 10°30'0" and longitude 122°15'36", with the given hemispheres.
pub fn gps_fields(lat_ref: &str, lon_ref: &str) -> Vec<Field> {
    vec![
        ascii(Tag::GPSLatitudeRef, lat_ref),
        dms(Tag::GPSLatitude, 10, 30, (0, 1)),
        ascii(Tag::GPSLongitudeRef, lon_ref),
        dms(Tag::GPSLongitude, 122, 15, (36, 1)),
    ]
}

pub fn tiff_bytes(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    buf.into_inner()
}

/// Rewrites the value offset of `tag` in the first IFD of big-endian TIFF
/// bytes so that it points past the end of the data. The tag's value must be
/// longer than four bytes.
pub fn point_value_past_end(tiff: &mut [u8], tag: Tag) {
    let be_u16 = |at: usize| u16::from_be_bytes([tiff[at], tiff[at + 1]]);
    let ifd = u32::from_be_bytes([tiff[4], tiff[5], tiff[6], tiff[7]]) as usize;
    let count = be_u16(ifd) as usize;
    let entry = (0..count)
        .map(|i| ifd + 2 + i * 12)
        .find(|&at| be_u16(at) == tag.number())
        .unwrap();
    tiff[entry + 8..entry + 12].copy_from_slice(&0x0000_fff0u32.to_be_bytes());
}

/// A TIFF file holding only the given tags.
pub fn write_tiff(path: &Path, fields: &[Field]) {
    std::fs::write(path, tiff_bytes(fields)).unwrap();
}

/// A bare JPEG stream (SOI, APP1 "Exif", EOI) carrying the given tags.
pub fn write_jpeg(path: &Path, fields: &[Field]) {
    let tiff = tiff_bytes(fields);
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut jpeg = vec![0xff, 0xd8, 0xff, 0xe1];
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xff, 0xd9]);
    std::fs::write(path, jpeg).unwrap();
}

/// A JPEG stream without any APP1 segment.
pub fn write_plain_jpeg(path: &Path) {
    std::fs::write(path, [0xff, 0xd8, 0xff, 0xd9]).unwrap();
}
