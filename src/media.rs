use std::io::Cursor;

use image::ImageFormat;

use crate::error::AbsensiError;

/// Upload types the gallery picker accepts.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Checks a picked file's name against the png/jpg/jpeg allow-list. Camera
/// captures arrive without a file name and skip this check.
pub fn has_allowed_extension(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Re-encodes a submitted image to canonical PNG. Content is sniffed, not
/// trusted from the file name; anything that is not a decodable png/jpeg is
/// rejected. No further validation of what the photo shows.
pub fn normalize(bytes: &[u8]) -> Result<Vec<u8>, AbsensiError> {
    let format =
        image::guess_format(bytes).map_err(|_| AbsensiError::UnsupportedMediaType)?;

    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(AbsensiError::UnsupportedMediaType);
    }

    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(AbsensiError::InvalidImage)?;

    let mut out = Cursor::new(Vec::new());
    decoded
        .write_to(&mut out, ImageFormat::Png)
        .map_err(AbsensiError::InvalidImage)?;

    Ok(out.into_inner())
}
