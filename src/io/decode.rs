use std::path::Path;

use tracing::debug;

use crate::core::buffer::PixelBuffer;
use crate::core::params::ServiceParams;
use crate::error::{Error, Result};
use crate::types::PixelLayout;

/// Lower-cased extension with its leading dot, e.g. `".jpg"`.
fn dotted_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

pub fn is_allowed_file(filename: &str, params: &ServiceParams) -> bool {
    match dotted_extension(filename) {
        Some(ext) => params
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&ext)),
        None => false,
    }
}

/// Reject uploads the renderer must never see: no file name, a disallowed
/// extension, an empty body, or a body over the size limit.
pub fn validate_upload(filename: &str, bytes: &[u8], params: &ServiceParams) -> Result<()> {
    if filename.is_empty() {
        return Err(Error::NoFileSelected);
    }
    if !is_allowed_file(filename, params) {
        return Err(Error::UnsupportedFileType {
            filename: filename.to_string(),
        });
    }
    if bytes.is_empty() {
        return Err(Error::EmptyUpload);
    }
    if bytes.len() > params.max_upload_bytes {
        return Err(Error::UploadTooLarge {
            size: bytes.len(),
            limit: params.max_upload_bytes,
        });
    }
    Ok(())
}

/// Decode an encoded image into a 3-channel RGB buffer (alpha and palette
/// information are dropped, gray inputs are expanded).
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer> {
    let decoded = image::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    debug!("Decoded {}x{} image ({} bytes)", width, height, bytes.len());
    PixelBuffer::from_raw(width, height, PixelLayout::Rgb, rgb.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_is_case_insensitive() {
        let params = ServiceParams::default();
        assert!(is_allowed_file("photo.JPG", &params));
        assert!(is_allowed_file("dir.v2/scan.webp", &params));
        assert!(!is_allowed_file("notes.txt", &params));
        assert!(!is_allowed_file("no_extension", &params));
    }

    #[test]
    fn validation_reports_distinct_rejections() {
        let params = ServiceParams {
            max_upload_bytes: 4,
            ..ServiceParams::default()
        };
        assert!(matches!(
            validate_upload("", b"abc", &params),
            Err(Error::NoFileSelected)
        ));
        assert!(matches!(
            validate_upload("a.tiff", b"abc", &params),
            Err(Error::UnsupportedFileType { .. })
        ));
        assert!(matches!(
            validate_upload("a.png", b"", &params),
            Err(Error::EmptyUpload)
        ));
        assert!(matches!(
            validate_upload("a.png", b"abcde", &params),
            Err(Error::UploadTooLarge { size: 5, limit: 4 })
        ));
        assert!(validate_upload("a.png", b"abcd", &params).is_ok());
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(decode_image(b"not an image"), Err(Error::Decode(_))));
    }
}
