use clap::Parser;
use std::path::PathBuf;

use pencilsketch::OutputFormat;

#[derive(Parser)]
#[command(name = "pencilsketch", version, about = "Pencil sketch renderer CLI")]
pub struct CliArgs {
    /// Input image (jpg, jpeg, png, gif, bmp, webp)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output filename for the sketch
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the (resized) source image here
    #[arg(long)]
    pub original_output: Option<PathBuf>,

    /// Output format (png or jpeg); overrides the config file
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Long-side cap applied before rendering. Options:
    /// - Custom: any positive integer (e.g., 1500)
    /// - Original: "original" (no scaling)
    #[arg(long)]
    pub size: Option<String>,

    /// Fixed seed for the paper grain (default: derived from the image)
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file with service parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a JSON report next to the output
    #[arg(long, default_value_t = false)]
    pub report: bool,

    /// Dump every pipeline stage as PNG into this directory
    #[arg(long)]
    pub stages_dir: Option<PathBuf>,

    /// Download mode: file containing a data URL (or bare base64) of a sketch
    #[arg(long)]
    pub data_url_input: Option<PathBuf>,

    /// Download mode: directory receiving the downloadable file
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
