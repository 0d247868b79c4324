use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};

/// A persisted file ready to be handed out as an attachment.
#[derive(Debug, Clone)]
pub struct DownloadFile {
    pub path: PathBuf,
    /// Name offered to the client, independent of the on-disk name
    pub download_name: String,
    pub mime_type: &'static str,
}

/// Write `bytes` to a uniquely named file in `dir` and keep it on disk.
/// Removing the file once it has been served is the caller's responsibility.
pub fn write_download(bytes: &[u8], dir: &Path, download_name: &str) -> Result<DownloadFile> {
    let suffix = Path::new(download_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_else(|| ".png".to_string());

    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::Builder::new()
        .prefix("pencil_sketch_")
        .suffix(&suffix)
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    let (_file, path) = tmp.keep().map_err(|e| Error::Io(e.error))?;

    info!("Prepared download {:?} as {}", path, download_name);
    Ok(DownloadFile {
        path,
        download_name: download_name.to_string(),
        mime_type: if suffix.eq_ignore_ascii_case(".png") {
            "image/png"
        } else {
            "image/jpeg"
        },
    })
}
