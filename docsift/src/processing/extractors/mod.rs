pub mod docx;
pub mod pdf;
pub mod xlsx;

pub use docx::DocxExtractor;
pub use pdf::{PdfExtraction, PdfExtractor};
pub use xlsx::SpreadsheetExtractor;
