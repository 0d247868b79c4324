//! Output encoders and file writers.
pub mod data_url;
pub mod download;
pub mod jpeg;
pub mod png;
pub mod report;

use crate::core::buffer::PixelBuffer;
use crate::error::Result;
use crate::types::OutputFormat;

/// Encoded image bytes tagged with their format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Embeddable `data:` URL for the encoded bytes.
    pub fn to_data_url(&self) -> String {
        data_url::to_data_url(self.mime_type(), &self.bytes)
    }
}

pub fn encode_image(image: &PixelBuffer, format: OutputFormat, jpeg_quality: u8) -> Result<EncodedImage> {
    let bytes = match format {
        OutputFormat::PNG => png::encode_png(image)?,
        OutputFormat::JPEG => jpeg::encode_jpeg(image, jpeg_quality)?,
    };
    Ok(EncodedImage { format, bytes })
}
