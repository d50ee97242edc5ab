//! Response handling module - Base64 payloads and image format checks

pub mod base64;

/// PNG file signature.
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Check whether bytes look like a PNG file.
pub fn is_png(data: &[u8]) -> bool {
    data.starts_with(PNG_MAGIC)
}
