use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{ExtractError, Result};

/// Rasterizes single PDF pages for OCR.
pub trait PageRenderer: Send + Sync {
    /// Render `page` (1-based) of the PDF at `path` to PNG bytes.
    fn render_page(&self, path: &Path, page: u32, dpi: u32) -> Result<Vec<u8>>;
}

/// Renders pages with poppler's `pdftoppm`.
///
/// Each call renders exactly one page into its own temporary directory,
/// which is removed when the call returns.
#[derive(Debug, Clone)]
pub struct PdftoppmRenderer {
    binary: PathBuf,
}

impl PdftoppmRenderer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn is_installed(&self) -> bool {
        Command::new(&self.binary).arg("-v").output().is_ok()
    }
}

impl Default for PdftoppmRenderer {
    fn default() -> Self {
        Self::new("pdftoppm")
    }
}

impl PageRenderer for PdftoppmRenderer {
    fn render_page(&self, path: &Path, page: u32, dpi: u32) -> Result<Vec<u8>> {
        let render_err = |message: String| ExtractError::Render { page, message };

        let scratch = tempfile::tempdir()
            .map_err(|e| render_err(format!("Failed to create scratch directory: {e}")))?;
        let prefix = scratch.path().join("page");

        let output = Command::new(&self.binary)
            .arg("-png")
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-f")
            .arg(page.to_string())
            .arg("-l")
            .arg(page.to_string())
            .arg("-singlefile")
            .arg(path)
            .arg(&prefix)
            .output()
            .map_err(|e| {
                render_err(format!(
                    "Failed to run {}: {e}",
                    self.binary.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(render_err(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let image_path = prefix.with_extension("png");
        let bytes = std::fs::read(&image_path)
            .map_err(|e| render_err(format!("Rendered image missing: {e}")))?;

        debug!(page, dpi, bytes = bytes.len(), "Rendered PDF page");
        Ok(bytes)
    }
}
