use super::StorageError;

/// Content type used when the bytes match no known image signature
pub const FALLBACK_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Detect an image MIME type from its leading bytes
pub fn detect_image_content_type(data: &[u8]) -> Option<&'static str> {
    if data.len() >= 4 {
        match &data[0..4] {
            [0xFF, 0xD8, 0xFF, ..] => return Some("image/jpeg"),
            [0x89, 0x50, 0x4E, 0x47] => return Some("image/png"),
            [0x47, 0x49, 0x46, 0x38] => return Some("image/gif"),
            [0x52, 0x49, 0x46, 0x46] if data.len() >= 12 && &data[8..12] == b"WEBP" => {
                return Some("image/webp");
            }
            [0x42, 0x4D, ..] => return Some("image/bmp"),
            _ => {}
        }
    }

    if data.len() >= 12
        && data[4..8] == [0x66, 0x74, 0x79, 0x70]
        && (&data[8..12] == b"avif" || &data[8..12] == b"avis")
    {
        return Some("image/avif");
    }

    None
}

/// Content type to serve for stored bytes
pub fn serving_content_type(data: &[u8]) -> &'static str {
    detect_image_content_type(data).unwrap_or(FALLBACK_IMAGE_CONTENT_TYPE)
}

/// Whether a declared MIME type is an image type
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|mime| mime.to_ascii_lowercase().starts_with("image/"))
}

/// Validate file size limits
pub fn validate_file_size(size: u64, max_size: u64) -> Result<(), StorageError> {
    if size > max_size {
        return Err(StorageError::TooLarge { size, max_size });
    }
    Ok(())
}

/// Public URL of a stored file; the filename is percent-encoded as one path segment
pub fn public_url(prefix: &str, filename: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), urlencoding::encode(filename))
}
