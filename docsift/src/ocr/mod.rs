//! OCR fallback for image-only PDFs.
//!
//! Two collaborators sit behind traits so the PDF extractor never talks to
//! an external program directly:
//! - `PageRenderer` rasterizes one page to PNG (`PdftoppmRenderer` shells
//!   out to poppler's `pdftoppm`)
//! - `OcrEngine` turns an image into text (`TesseractEngine` via leptess)
//!
//! Both are configured from `OcrConfig` (see `config.rs`): `languages`,
//! `dpi`, `preprocess`, the image dimension limits and `renderer_path`.

mod preprocessing;
mod provider;
mod render;

pub use preprocessing::preprocess_page;
pub use provider::{OcrEngine, TesseractEngine};
pub use render::{PageRenderer, PdftoppmRenderer};
