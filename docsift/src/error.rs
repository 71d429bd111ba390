use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Input directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Input path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("DOCX error: {0}")]
    Docx(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Failed to render page {page}: {message}")]
    Render { page: u32, message: String },

    #[error("OCR error on page {page}: {message}")]
    Ocr { page: u32, message: String },

    #[error("Recognition failed: {0}")]
    Recognition(String),

    #[error("OCR unavailable: {0}")]
    OcrUnavailable(String),

    #[error("Image error: {0}")]
    Image(String),
}

impl ExtractError {
    /// Page number attached to page-scoped failures.
    pub fn page(&self) -> Option<u32> {
        match self {
            ExtractError::Render { page, .. } | ExtractError::Ocr { page, .. } => Some(*page),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
