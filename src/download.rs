use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::{error::Result, model::api::ExportFormat};

/// File name a batch of generated codes is saved under.
pub const CODES_FILE_NAME: &str = "voting-codes.txt";

/// Write `contents` to `dir/file_name`, creating `dir` if needed, and return
/// the path written.
pub fn save(dir: &Path, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, contents)?;
    info!("Saved {} bytes to {}", contents.len(), path.display());
    Ok(path)
}

/// Save an exported results file as `election-results.<format>`.
pub fn save_export(dir: &Path, format: ExportFormat, contents: &[u8]) -> Result<PathBuf> {
    save(dir, &format.file_name(), contents)
}

/// Save a batch of codes, one per line.
pub fn save_codes(dir: &Path, codes: &[String]) -> Result<PathBuf> {
    save(dir, CODES_FILE_NAME, codes.join("\n").as_bytes())
}
