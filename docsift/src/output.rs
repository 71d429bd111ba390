use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::models::ExtractionResult;

/// Name of the text file written for `filename`.
pub fn output_filename(filename: &str) -> String {
    format!("extracted_{filename}.txt")
}

/// Write every entry to `<output_dir>/extracted_<filename>.txt` as UTF-8,
/// creating `output_dir` if needed. Returns the written paths in result order.
pub fn write_outputs(result: &ExtractionResult, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(result.len());
    for (filename, text) in result.iter() {
        let output_path = output_dir.join(output_filename(filename));
        fs::write(&output_path, text)?;
        info!("Saved extracted text to {}", output_path.display());
        written.push(output_path);
    }

    Ok(written)
}
