use std::fs;
use std::path::Path;

use tracing::{error, info, warn};

use crate::config::{Config, ExtractionConfig, OcrConfig};
use crate::error::{ExtractError, Result};
use crate::models::{DocumentFormat, ExtractionResult};
use crate::ocr::{OcrEngine, PageRenderer, PdftoppmRenderer, TesseractEngine};

use super::extractors::{DocxExtractor, PdfExtraction, PdfExtractor, SpreadsheetExtractor};

/// What to do when a single file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailurePolicy {
    /// Log the failure and move on to the next file.
    Continue,
    /// Stop and hand the error to the caller.
    Propagate,
}

/// Walks a directory and extracts text from every supported file in it.
pub struct ExtractionDispatcher {
    config: ExtractionConfig,
    ocr_config: OcrConfig,
    renderer: Box<dyn PageRenderer>,
    ocr: Box<dyn OcrEngine>,
}

impl ExtractionDispatcher {
    /// Dispatcher backed by `pdftoppm` and a local Tesseract.
    pub fn new(config: &Config) -> Self {
        let renderer = PdftoppmRenderer::new(&config.ocr.renderer_path);
        if !renderer.is_installed() {
            warn!(
                "{} not found - scanned PDFs will come back empty",
                config.ocr.renderer_path
            );
        }

        Self::with_backends(
            config,
            Box::new(renderer),
            Box::new(TesseractEngine::new(&config.ocr)),
        )
    }

    pub fn with_backends(
        config: &Config,
        renderer: Box<dyn PageRenderer>,
        ocr: Box<dyn OcrEngine>,
    ) -> Self {
        Self {
            config: config.extraction.clone(),
            ocr_config: config.ocr.clone(),
            renderer,
            ocr,
        }
    }

    /// Best-effort extraction: never fails.
    ///
    /// A missing directory yields an empty result. A file that fails is
    /// logged and left out, except for PDFs that cannot be opened, which get
    /// an empty entry while `keep_failed_pdfs` is set.
    pub fn extract_dir(&self, dir: &Path) -> ExtractionResult {
        match self.run(dir, FailurePolicy::Continue) {
            Ok(result) => result,
            Err(e) => {
                error!("{}", e);
                ExtractionResult::new()
            }
        }
    }

    /// Same walk as `extract_dir`, but the first failing file (or a missing
    /// directory) is returned as an error. Individual OCR page failures are
    /// still tolerated.
    pub fn try_extract_dir(&self, dir: &Path) -> Result<ExtractionResult> {
        self.run(dir, FailurePolicy::Propagate)
    }

    /// Extract a single file. `Ok(None)` means the extension is not
    /// supported.
    pub fn extract_file(&self, path: &Path) -> Result<Option<String>> {
        let text = match DocumentFormat::from_path(path) {
            DocumentFormat::Pdf => {
                let extraction = PdfExtractor::extract(
                    path,
                    self.renderer.as_ref(),
                    self.ocr.as_ref(),
                    &self.ocr_config,
                )?;
                Self::log_pdf_failures(path, &extraction);
                extraction.text
            }
            DocumentFormat::Docx => DocxExtractor::extract(&fs::read(path)?)?,
            DocumentFormat::Spreadsheet => SpreadsheetExtractor::extract(path)?,
            DocumentFormat::Unsupported => return Ok(None),
        };
        Ok(Some(text))
    }

    fn run(&self, dir: &Path, policy: FailurePolicy) -> Result<ExtractionResult> {
        if !dir.exists() {
            return Err(ExtractError::MissingDirectory(dir.to_path_buf()));
        }
        if !dir.is_dir() {
            return Err(ExtractError::NotADirectory(dir.to_path_buf()));
        }

        let mut result = ExtractionResult::new();

        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if policy == FailurePolicy::Continue => {
                    error!("Error reading entry in {}: {}", dir.display(), e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let filename = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();

            if !path.is_file() {
                info!("Skipping non-file entry: {}", filename);
                continue;
            }

            match self.extract_file(&path) {
                Ok(Some(text)) => {
                    info!("Successfully extracted text from {}", filename);
                    result.insert(filename, text);
                }
                Ok(None) => info!("Skipping unsupported file: {}", filename),
                Err(e) if policy == FailurePolicy::Propagate => return Err(e),
                Err(ExtractError::Pdf(message)) if self.config.keep_failed_pdfs => {
                    error!("Error processing PDF {}: {}", path.display(), message);
                    result.insert(filename, String::new());
                }
                Err(e) => error!("Error processing {}: {}", filename, e),
            }
        }

        Ok(result)
    }

    fn log_pdf_failures(path: &Path, extraction: &PdfExtraction) {
        for failure in &extraction.failures {
            match failure.page() {
                Some(page) => error!(
                    "Error during OCR for page {} of {}: {}",
                    page,
                    path.display(),
                    failure
                ),
                None => warn!("{}", failure),
            }
        }
    }
}
