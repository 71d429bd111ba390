use std::env;
use std::path::PathBuf;

pub const DEFAULT_INPUT_DIR: &str = "uploads";
pub const DEFAULT_OUTPUT_DIR: &str = "extracted_output";

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Record an empty-text entry for PDFs that fail to open instead of
    /// omitting them, matching the output shape of earlier releases.
    pub keep_failed_pdfs: bool,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Tesseract language codes, `+`-separated (e.g. `eng+deu`).
    pub languages: String,
    pub dpi: u32,
    pub preprocess: bool,
    pub max_image_dimension: u32,
    pub min_image_dimension: u32,
    pub renderer_path: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            keep_failed_pdfs: true,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: "eng".to_string(),
            dpi: 300,
            preprocess: false,
            max_image_dimension: 8192,
            min_image_dimension: 50,
            renderer_path: "pdftoppm".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let extraction = ExtractionConfig::default();
        let ocr = OcrConfig::default();

        Self {
            extraction: ExtractionConfig {
                input_dir: env::var("DOCSIFT_INPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(extraction.input_dir),
                output_dir: env::var("DOCSIFT_OUTPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(extraction.output_dir),
                keep_failed_pdfs: parse_env_or(
                    "DOCSIFT_KEEP_FAILED_PDFS",
                    extraction.keep_failed_pdfs,
                ),
            },
            ocr: OcrConfig {
                languages: env::var("OCR_LANGUAGES").unwrap_or(ocr.languages),
                dpi: parse_env_or("OCR_DPI", ocr.dpi),
                preprocess: parse_env_or("OCR_PREPROCESS", ocr.preprocess),
                max_image_dimension: parse_env_or("OCR_MAX_DIMENSION", ocr.max_image_dimension),
                min_image_dimension: parse_env_or("OCR_MIN_DIMENSION", ocr.min_image_dimension),
                renderer_path: env::var("PDFTOPPM_PATH").unwrap_or(ocr.renderer_path),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
