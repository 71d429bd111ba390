//! Plain-text extraction for folders of PDF, DOCX, XLS and XLSX files.
//!
//! ```rust,ignore
//! let config = Config::from_env();
//! let dispatcher = ExtractionDispatcher::new(&config);
//! let result = dispatcher.extract_dir(&config.extraction.input_dir);
//! write_outputs(&result, &config.extraction.output_dir)?;
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod ocr;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{ExtractError, Result};
pub use models::{DocumentFormat, ExtractionMethod, ExtractionResult};
pub use output::write_outputs;
pub use processing::ExtractionDispatcher;
