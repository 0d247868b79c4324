use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::processing::resize::DEFAULT_MAX_DIMENSION;
use crate::error::Result;
use crate::types::OutputFormat;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];
pub const DEFAULT_DOWNLOAD_NAME: &str = "pencil_sketch.png";

/// Settings owned by the upload/encode layer around the renderer, suitable for
/// config files. The rendering constants themselves are fixed and not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceParams {
    /// Largest accepted upload, in bytes
    pub max_upload_bytes: usize,
    /// Lower-case extensions including the leading dot
    pub allowed_extensions: Vec<String>,
    /// Long-side cap applied before rendering; None means original size
    pub max_dimension: Option<usize>,
    pub output_format: OutputFormat,
    pub jpeg_quality: u8,
    /// Fixed grain seed; None derives the seed from the image content
    pub seed: Option<u64>,
    /// File name offered for downloads
    pub download_name: String,
}

impl Default for ServiceParams {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_dimension: Some(DEFAULT_MAX_DIMENSION),
            output_format: OutputFormat::PNG,
            jpeg_quality: 95,
            seed: None,
            download_name: DEFAULT_DOWNLOAD_NAME.to_string(),
        }
    }
}

impl ServiceParams {
    /// Load from a JSON file; missing fields fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let params: ServiceParams = serde_json::from_str(&content)?;
        info!("Loaded service parameters from {:?}", path);
        Ok(params)
    }

    pub fn save_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Service parameters saved to {:?}", path);
        Ok(())
    }
}
