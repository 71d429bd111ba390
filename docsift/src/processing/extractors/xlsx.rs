use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use crate::error::{ExtractError, Result};

/// XLS and XLSX workbooks.
///
/// Cells are read as their cached values, so formulas come out as the
/// result Excel last computed rather than the formula text.
pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    pub fn extract(path: &Path) -> Result<String> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| ExtractError::Spreadsheet(format!("Failed to open workbook: {e}")))?;
        Self::extract_workbook(&mut workbook)
    }

    pub fn extract_bytes(bytes: &[u8]) -> Result<String> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| ExtractError::Spreadsheet(format!("Failed to open workbook: {e}")))?;
        Self::extract_workbook(&mut workbook)
    }

    fn extract_workbook<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<String> {
        let mut text = String::new();

        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name).map_err(|e| {
                ExtractError::Spreadsheet(format!("Failed to read sheet '{name}': {e}"))
            })?;

            text.push_str(&format!("\n--- Sheet: {name} ---\n"));
            Self::push_rows(&mut text, &range);
        }

        Ok(text)
    }

    /// One line per row holding at least one value; every value is followed
    /// by a tab.
    fn push_rows(text: &mut String, range: &Range<Data>) {
        for row in range.rows() {
            let mut line = String::new();
            for value in row.iter().filter_map(Self::format_cell_value) {
                line.push_str(&value);
                line.push('\t');
            }
            if !line.is_empty() {
                text.push_str(&line);
                text.push('\n');
            }
        }
    }

    fn format_cell_value(cell: &Data) -> Option<String> {
        let value = match cell {
            Data::Empty => return None,
            Data::String(s) if s.is_empty() => return None,
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => {
                let s = format!("{f}");
                if s.contains('.') {
                    s.trim_end_matches('0').trim_end_matches('.').to_string()
                } else {
                    s
                }
            }
            Data::Bool(true) => "True".to_string(),
            Data::Bool(false) => "False".to_string(),
            Data::DateTime(dt) => dt
                .as_datetime()
                .map(|naive| naive.to_string())
                .unwrap_or_else(|| dt.to_string()),
            Data::DateTimeIso(dt) => dt.clone(),
            Data::DurationIso(d) => d.clone(),
            Data::Error(e) => e.to_string(),
        };
        Some(value)
    }
}
