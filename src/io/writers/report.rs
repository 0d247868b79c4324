use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::types::OutputFormat;

/// Summary of one render, written as a JSON sidecar next to the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchReport {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub original_width: usize,
    pub original_height: usize,
    pub width: usize,
    pub height: usize,
    pub resized: bool,
    pub seed: u64,
    pub format: OutputFormat,
    pub generated: String,
    pub version: String,
}

impl SketchReport {
    pub fn new(
        original: (usize, usize),
        processed: (usize, usize),
        seed: u64,
        format: OutputFormat,
    ) -> Self {
        Self {
            input: None,
            output: None,
            original_width: original.0,
            original_height: original.1,
            width: processed.0,
            height: processed.1,
            resized: original != processed,
            seed,
            format,
            generated: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Write `<output stem>.json` beside `output_path`.
pub fn write_report_sidecar(output_path: &Path, report: &SketchReport) -> Result<PathBuf> {
    let sidecar_path = output_path.with_extension("json");
    let json_string = serde_json::to_string_pretty(report)?;
    std::fs::write(&sidecar_path, json_string)?;
    info!("Created report sidecar: {:?}", sidecar_path);
    Ok(sidecar_path)
}
