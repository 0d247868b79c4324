//! High-level, ergonomic library API: validate and decode uploads, cap their
//! size, render the sketch and encode the results, to memory or to files.
//! Prefer these entrypoints over the low-level processing modules when
//! embedding the renderer in a service.
use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::core::buffer::PixelBuffer;
use crate::core::params::ServiceParams;
use crate::core::processing::pipeline::{
    content_seed, render_pencil_sketch_with_seed, render_stages_with_rng,
};
use crate::core::processing::resize::limit_dimensions;
use crate::error::{Error, Result};
use crate::io::decode::{decode_image, validate_upload};
use crate::io::writers::data_url::decode_data_url;
use crate::io::writers::download::{DownloadFile, write_download};
use crate::io::writers::png::write_png;
use crate::io::writers::report::SketchReport;
use crate::io::writers::{EncodedImage, encode_image};

/// A rendered sketch together with the (possibly downscaled) source it was made from.
#[derive(Debug, Clone)]
pub struct RenderedSketch {
    pub original: PixelBuffer,
    pub sketch: PixelBuffer,
    pub report: SketchReport,
}

/// Result of processing one upload: both images encoded for transport.
#[derive(Debug, Clone)]
pub struct SketchOutput {
    pub original: EncodedImage,
    pub sketch: EncodedImage,
    pub report: SketchReport,
}

impl SketchOutput {
    /// `{"success": true, "original": <data url>, "sketch": <data url>}`
    pub fn to_response_json(&self) -> serde_json::Value {
        serde_json::json!({
            "success": true,
            "original": self.original.to_data_url(),
            "sketch": self.sketch.to_data_url(),
        })
    }
}

/// Cap the size of a decoded image and render it.
pub fn render_buffer(image: PixelBuffer, params: &ServiceParams) -> Result<RenderedSketch> {
    let original_dims = (image.width(), image.height());
    let image = limit_dimensions(image, params.max_dimension)?;
    let seed = params.seed.unwrap_or_else(|| content_seed(&image));
    let sketch = render_pencil_sketch_with_seed(&image, seed)?;
    let report = SketchReport::new(
        original_dims,
        (sketch.width(), sketch.height()),
        seed,
        params.output_format,
    );
    Ok(RenderedSketch {
        original: image,
        sketch,
        report,
    })
}

/// Validate → decode → resize → render → encode, entirely in memory.
pub fn sketch_upload(bytes: &[u8], filename: &str, params: &ServiceParams) -> Result<SketchOutput> {
    validate_upload(filename, bytes, params)?;
    let image = decode_image(bytes)?;
    let rendered = render_buffer(image, params)?;

    let original = encode_image(&rendered.original, params.output_format, params.jpeg_quality)?;
    let sketch = encode_image(&rendered.sketch, params.output_format, params.jpeg_quality)?;
    info!(
        "Converted upload {} ({} bytes) to a {}x{} sketch",
        filename,
        bytes.len(),
        rendered.report.width,
        rendered.report.height
    );
    Ok(SketchOutput {
        original,
        sketch,
        report: rendered.report,
    })
}

fn read_upload(input: &Path) -> Result<(Vec<u8>, String)> {
    let bytes = fs::read(input)?;
    let filename = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok((bytes, filename))
}

/// Render an image file and write the sketch to `output` in the configured format.
/// When `original_output` is given, the resized source is written there too.
pub fn sketch_file_to_path(
    input: &Path,
    output: &Path,
    original_output: Option<&Path>,
    params: &ServiceParams,
) -> Result<SketchReport> {
    let (bytes, filename) = read_upload(input)?;
    let result = sketch_upload(&bytes, &filename, params)?;

    fs::write(output, &result.sketch.bytes)?;
    if let Some(path) = original_output {
        fs::write(path, &result.original.bytes)?;
    }
    info!("Successfully processed: {:?} -> {:?}", input, output);

    let mut report = result.report;
    report.input = Some(input.to_path_buf());
    report.output = Some(output.to_path_buf());
    Ok(report)
}

/// Render an image file and dump every intermediate stage as a PNG into `dir`.
pub fn sketch_stages_to_dir(
    input: &Path,
    dir: &Path,
    params: &ServiceParams,
) -> Result<Vec<PathBuf>> {
    let (bytes, filename) = read_upload(input)?;
    validate_upload(&filename, &bytes, params)?;
    let image = limit_dimensions(decode_image(&bytes)?, params.max_dimension)?;
    let seed = params.seed.unwrap_or_else(|| content_seed(&image));
    let stages = render_stages_with_rng(&image, &mut StdRng::seed_from_u64(seed))?;

    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for (index, (label, map)) in stages.named().into_iter().enumerate() {
        let path = dir.join(format!("{}_{}.png", index, label));
        write_png(&path, &PixelBuffer::from_gray(map.clone())?)?;
        written.push(path);
    }
    info!("Wrote {} stage maps to {:?}", written.len(), dir);
    Ok(written)
}

/// Turn a previously returned data URL back into a downloadable file in `dir`.
pub fn export_download(data_url: &str, dir: &Path, params: &ServiceParams) -> Result<DownloadFile> {
    let bytes = decode_data_url(data_url)?;
    if bytes.is_empty() {
        return Err(Error::EmptyUpload);
    }
    write_download(&bytes, dir, &params.download_name)
}
