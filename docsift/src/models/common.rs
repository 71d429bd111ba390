use std::path::Path;

/// Closed set of formats the dispatcher knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Spreadsheet,
    #[default]
    Unsupported,
}

impl DocumentFormat {
    /// Classify a file by how its name ends, ignoring case.
    ///
    /// Matches on the whole file name rather than `Path::extension`, so a
    /// file called just `.pdf` is still a PDF.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let name = match path.as_ref().file_name() {
            Some(name) => name.to_string_lossy().to_lowercase(),
            None => return Self::Unsupported,
        };

        if name.ends_with(".pdf") {
            Self::Pdf
        } else if name.ends_with(".docx") {
            Self::Docx
        } else if name.ends_with(".xls") || name.ends_with(".xlsx") {
            Self::Spreadsheet
        } else {
            Self::Unsupported
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Docx => write!(f, "docx"),
            Self::Spreadsheet => write!(f, "spreadsheet"),
            Self::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// How a PDF's text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    Native,
    Ocr,
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Ocr => write!(f, "ocr"),
        }
    }
}
