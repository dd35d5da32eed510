/// Identify an image format from its leading magic bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        _ => None,
    }
}

/// True for MIME types in the `image/` family. Parameters are ignored.
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.trim_start().starts_with("image/")
}
