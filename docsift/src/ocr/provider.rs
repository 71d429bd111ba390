use std::sync::Mutex;

use leptess::LepTess;
use tracing::{debug, info, warn};

use crate::config::OcrConfig;
use crate::error::{ExtractError, Result};

use super::preprocessing::preprocess_page;

/// Turns a page image into text.
pub trait OcrEngine: Send + Sync {
    /// Recognize the text in an encoded image (PNG, JPEG, ...).
    fn recognize(&self, image: &[u8]) -> Result<String>;

    /// Whether the engine can be used at all. An unavailable engine is
    /// skipped for a whole document instead of failing page by page.
    fn is_available(&self) -> bool {
        true
    }
}

enum TesseractBackend {
    Local { tesseract: Mutex<LepTess> },
    Unavailable { reason: String },
}

/// Local Tesseract through `leptess`.
pub struct TesseractEngine {
    backend: TesseractBackend,
    config: OcrConfig,
}

fn create_tesseract(languages: &str) -> std::result::Result<LepTess, String> {
    LepTess::new(None, languages).map_err(|e| e.to_string())
}

impl TesseractEngine {
    /// Never fails: a Tesseract that cannot be initialized (missing library
    /// or traineddata) leaves the engine unavailable with the reason kept
    /// for logging.
    pub fn new(config: &OcrConfig) -> Self {
        let backend = match create_tesseract(&config.languages) {
            Ok(lt) => {
                info!(languages = %config.languages, "Tesseract OCR initialized");
                TesseractBackend::Local {
                    tesseract: Mutex::new(lt),
                }
            }
            Err(e) => {
                let reason = format!("Tesseract not available: {e}");
                warn!("{}", reason);
                TesseractBackend::Unavailable { reason }
            }
        };

        Self {
            backend,
            config: config.clone(),
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.backend {
            TesseractBackend::Unavailable { reason } => Some(reason),
            TesseractBackend::Local { .. } => None,
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &[u8]) -> Result<String> {
        let tesseract = match &self.backend {
            TesseractBackend::Local { tesseract } => tesseract,
            TesseractBackend::Unavailable { reason } => {
                return Err(ExtractError::OcrUnavailable(reason.clone()))
            }
        };

        let prepared;
        let image = if self.config.preprocess {
            prepared = preprocess_page(image, &self.config)?;
            debug!(bytes = prepared.len(), "Preprocessed page image");
            prepared.as_slice()
        } else {
            image
        };

        let mut lt = tesseract
            .lock()
            .map_err(|_| ExtractError::Recognition("Tesseract lock poisoned".to_string()))?;
        lt.set_image_from_mem(image)
            .map_err(|e| ExtractError::Recognition(format!("Failed to set image: {e}")))?;
        lt.set_source_resolution(self.config.dpi as i32);
        lt.get_utf8_text()
            .map_err(|e| ExtractError::Recognition(format!("Failed to extract text: {e}")))
    }

    fn is_available(&self) -> bool {
        matches!(self.backend, TesseractBackend::Local { .. })
    }
}
