//! Local validation of profile attachments, run against the in-memory
//! upload before anything is sent to the profile service. A rejected
//! attachment blocks only itself; the rest of the form stays usable.

pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_PHOTO_DIMENSION: u32 = 1200;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Photo must be an image, got {0}")]
    PhotoNotImage(String),

    #[error("{kind} exceeds the 5MB limit ({size} bytes)")]
    TooLarge { kind: &'static str, size: usize },

    #[error("Photo dimensions {width}x{height} exceed {max}x{max}", max = MAX_PHOTO_DIMENSION)]
    DimensionsExceeded { width: u32, height: u32 },

    #[error("Photo is not a recognizable PNG or JPEG image")]
    MalformedImage,

    #[error("Resume must be a PDF, got {0}")]
    ResumeNotPdf(String),

    #[error("Resume filename {0:?} is not allowed")]
    InvalidFilename(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoDimensions {
    pub width: u32,
    pub height: u32,
}

/// Validate a profile photo: image MIME type, size cap, and decoded
/// dimensions within the 1200x1200 bound the UI resizes to.
pub fn validate_photo(content_type: &str, bytes: &[u8]) -> Result<PhotoDimensions, UploadError> {
    if !content_type.starts_with("image/") {
        return Err(UploadError::PhotoNotImage(content_type.to_string()));
    }
    if bytes.len() > MAX_ATTACHMENT_BYTES {
        return Err(UploadError::TooLarge {
            kind: "Photo",
            size: bytes.len(),
        });
    }

    let dims = png_dimensions(bytes)
        .or_else(|| jpeg_dimensions(bytes))
        .ok_or(UploadError::MalformedImage)?;

    if dims.width > MAX_PHOTO_DIMENSION || dims.height > MAX_PHOTO_DIMENSION {
        return Err(UploadError::DimensionsExceeded {
            width: dims.width,
            height: dims.height,
        });
    }
    Ok(dims)
}

/// Validate a resume: PDF MIME type and magic, size cap, and a filename
/// free of path-traversal sequences.
pub fn validate_resume(
    content_type: &str,
    file_name: &str,
    bytes: &[u8],
) -> Result<(), UploadError> {
    if file_name.contains("..") || file_name.contains('/') || file_name.contains('\\') {
        return Err(UploadError::InvalidFilename(file_name.to_string()));
    }
    if content_type != "application/pdf" {
        return Err(UploadError::ResumeNotPdf(content_type.to_string()));
    }
    if bytes.len() > MAX_ATTACHMENT_BYTES {
        return Err(UploadError::TooLarge {
            kind: "Resume",
            size: bytes.len(),
        });
    }
    if !bytes.starts_with(b"%PDF") {
        return Err(UploadError::ResumeNotPdf("missing %PDF header".to_string()));
    }
    Ok(())
}

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Width and height from the IHDR chunk, which the PNG format requires
/// to come first.
fn png_dimensions(bytes: &[u8]) -> Option<PhotoDimensions> {
    if !bytes.starts_with(PNG_SIGNATURE) || bytes.len() < 24 {
        return None;
    }
    if &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    Some(PhotoDimensions { width, height })
}

/// Walk the JPEG segment chain to the first start-of-frame marker.
fn jpeg_dimensions(bytes: &[u8]) -> Option<PhotoDimensions> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut i = 2;
    while i + 4 <= bytes.len() {
        if bytes[i] != 0xFF {
            return None;
        }
        let marker = bytes[i + 1];
        // Fill bytes and standalone markers carry no length field.
        if marker == 0xFF {
            i += 1;
            continue;
        }
        if marker == 0x01 || (0xD0..=0xD9).contains(&marker) {
            i += 2;
            continue;
        }
        let seg_len = u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]) as usize;
        if is_sof_marker(marker) {
            // Segment layout: length, precision, height, width.
            if i + 9 > bytes.len() {
                return None;
            }
            let height = u16::from_be_bytes([bytes[i + 5], bytes[i + 6]]) as u32;
            let width = u16::from_be_bytes([bytes[i + 7], bytes[i + 8]]) as u32;
            return Some(PhotoDimensions { width, height });
        }
        i += 2 + seg_len;
    }
    None
}

fn is_sof_marker(marker: u8) -> bool {
    matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes
    }

    fn jpeg_bytes(width: u16, height: u16) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8];
        // APP0 segment before the frame header.
        bytes.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        bytes.extend_from_slice(b"JFIF\0");
        bytes.extend_from_slice(&[0; 9]);
        bytes.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&[3, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        bytes
    }

    #[test]
    fn oversized_photo_rejected_before_decoding() {
        let mut bytes = png_bytes(256, 256);
        bytes.resize(6 * 1024 * 1024, 0);
        let err = validate_photo("image/png", &bytes).unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { kind: "Photo", .. }));
    }

    #[test]
    fn non_image_mime_rejected() {
        let err = validate_photo("application/pdf", b"%PDF-1.4").unwrap_err();
        assert_eq!(
            err,
            UploadError::PhotoNotImage("application/pdf".to_string())
        );
    }

    #[test]
    fn png_dimensions_within_bounds_pass() {
        let dims = validate_photo("image/png", &png_bytes(1200, 800)).unwrap();
        assert_eq!(dims, PhotoDimensions { width: 1200, height: 800 });
    }

    #[test]
    fn png_dimensions_over_bounds_fail() {
        let err = validate_photo("image/png", &png_bytes(1201, 800)).unwrap_err();
        assert_eq!(
            err,
            UploadError::DimensionsExceeded { width: 1201, height: 800 }
        );
    }

    #[test]
    fn jpeg_sof_dimensions_are_read() {
        let dims = validate_photo("image/jpeg", &jpeg_bytes(640, 480)).unwrap();
        assert_eq!(dims, PhotoDimensions { width: 640, height: 480 });
    }

    #[test]
    fn unrecognized_image_bytes_rejected() {
        let err = validate_photo("image/png", b"not an image at all").unwrap_err();
        assert_eq!(err, UploadError::MalformedImage);
    }

    #[test]
    fn traversal_filename_rejected() {
        for name in ["../secret.pdf", "a/b.pdf", "a\\b.pdf", "..\\up.pdf"] {
            let err = validate_resume("application/pdf", name, b"%PDF-1.4").unwrap_err();
            assert!(matches!(err, UploadError::InvalidFilename(_)), "{name}");
        }
    }

    #[test]
    fn valid_resume_passes() {
        assert!(validate_resume("application/pdf", "resume.pdf", b"%PDF-1.7 ...").is_ok());
    }

    #[test]
    fn non_pdf_resume_rejected() {
        let err = validate_resume("application/msword", "resume.doc", b"old word").unwrap_err();
        assert_eq!(err, UploadError::ResumeNotPdf("application/msword".to_string()));
        let err = validate_resume("application/pdf", "resume.pdf", b"plain text").unwrap_err();
        assert!(matches!(err, UploadError::ResumeNotPdf(_)));
    }

    #[test]
    fn oversized_resume_rejected() {
        let mut bytes = b"%PDF-1.4".to_vec();
        bytes.resize(MAX_ATTACHMENT_BYTES + 1, 0);
        let err = validate_resume("application/pdf", "resume.pdf", &bytes).unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { kind: "Resume", .. }));
    }
}
