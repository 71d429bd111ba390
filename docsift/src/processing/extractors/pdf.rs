use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{debug, info};

use crate::config::OcrConfig;
use crate::error::{ExtractError, Result};
use crate::models::ExtractionMethod;
use crate::ocr::{OcrEngine, PageRenderer};

/// Text recovered from one PDF.
#[derive(Debug)]
pub struct PdfExtraction {
    pub text: String,
    pub method: ExtractionMethod,
    pub page_count: usize,
    /// Recovered failures: pages that could not be rendered or recognized,
    /// or an OCR engine that was unavailable for the whole document.
    pub failures: Vec<ExtractError>,
}

pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract a PDF, falling back to OCR when it has no text layer.
    ///
    /// Fails only if the document cannot be opened or its text layer cannot
    /// be read. OCR problems are collected in `failures` and never abort the
    /// document.
    pub fn extract(
        path: &Path,
        renderer: &dyn PageRenderer,
        ocr: &dyn OcrEngine,
        config: &OcrConfig,
    ) -> Result<PdfExtraction> {
        let bytes = std::fs::read(path)
            .map_err(|e| ExtractError::Pdf(format!("Failed to open {}: {e}", path.display())))?;
        let pages = Self::native_pages(&bytes)?;
        let page_count = Self::page_count(&bytes)?.max(pages.len());

        let text = Self::join_pages(pages);
        if !text.trim().is_empty() {
            return Ok(PdfExtraction {
                text,
                method: ExtractionMethod::Native,
                page_count,
                failures: Vec::new(),
            });
        }

        info!(
            "No text directly extracted from {}. Attempting OCR.",
            path.display()
        );

        if !ocr.is_available() {
            return Ok(PdfExtraction {
                text: String::new(),
                method: ExtractionMethod::Ocr,
                page_count,
                failures: vec![ExtractError::OcrUnavailable(format!(
                    "cannot OCR {}",
                    path.display()
                ))],
            });
        }

        let (text, failures) = Self::ocr_pages(path, page_count, renderer, ocr, config.dpi);
        Ok(PdfExtraction {
            text,
            method: ExtractionMethod::Ocr,
            page_count,
            failures,
        })
    }

    /// Native text of each page, in page order.
    fn native_pages(bytes: &[u8]) -> Result<Vec<String>> {
        // pdf-extract panics on some malformed documents
        panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|_| ExtractError::Pdf("PDF parser panicked".to_string()))?
        .map_err(|e| ExtractError::Pdf(format!("PDF extraction failed: {e}")))
    }

    /// Number of pages in the document's page tree. OCR walks this count,
    /// so pages the text extractor stopped short of are still rendered.
    fn page_count(bytes: &[u8]) -> Result<usize> {
        let document = lopdf::Document::load_mem(bytes)
            .map_err(|e| ExtractError::Pdf(format!("Failed to load page tree: {e}")))?;
        Ok(document.get_pages().len())
    }

    /// Each non-empty page followed by a newline.
    pub(crate) fn join_pages<I, S>(pages: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for page in pages {
            let page = page.as_ref();
            if !page.is_empty() {
                text.push_str(page);
                text.push('\n');
            }
        }
        text
    }

    fn ocr_pages(
        path: &Path,
        page_count: usize,
        renderer: &dyn PageRenderer,
        ocr: &dyn OcrEngine,
        dpi: u32,
    ) -> (String, Vec<ExtractError>) {
        let mut recognized = Vec::with_capacity(page_count);
        let mut failures = Vec::new();

        for page in 1..=page_count as u32 {
            match Self::ocr_page(path, page, renderer, ocr, dpi) {
                Ok(text) => recognized.push(text),
                Err(e) => failures.push(e),
            }

            if page % 10 == 0 {
                info!("OCR progress: {}/{} pages", page, page_count);
            }
        }

        debug!(
            pages = page_count,
            failed = failures.len(),
            "OCR complete for {}",
            path.display()
        );

        (Self::join_pages(recognized), failures)
    }

    fn ocr_page(
        path: &Path,
        page: u32,
        renderer: &dyn PageRenderer,
        ocr: &dyn OcrEngine,
        dpi: u32,
    ) -> Result<String> {
        let image = renderer.render_page(path, page, dpi)?;
        ocr.recognize(&image).map_err(|e| {
            let message = match e {
                ExtractError::Recognition(message) => message,
                other => other.to_string(),
            };
            ExtractError::Ocr { page, message }
        })
    }
}
