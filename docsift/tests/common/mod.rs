#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use docsift::config::{Config, ExtractionConfig, OcrConfig};
use docsift::error::{ExtractError, Result};
use docsift::ocr::{OcrEngine, PageRenderer};
use docsift::ExtractionDispatcher;

/// Write `bytes` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap_or_else(|e| panic!("Failed to write fixture '{name}': {e}"));
    path
}

pub fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    use docx_rs::*;

    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        let paragraph = if text.is_empty() {
            Paragraph::new()
        } else {
            Paragraph::new().add_run(Run::new().add_text(*text))
        };
        docx.add_paragraph(paragraph)
    });

    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).expect("Failed to pack DOCX");
    buffer.into_inner()
}

/// A minimal PDF. `Some(text)` pages carry a Helvetica text layer, `None`
/// pages have an empty content stream (what a scan looks like to a text
/// extractor).
pub fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + 2 * i).collect();
    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    for (i, page) in pages.iter().enumerate() {
        let content_id = 5 + 2 * i;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>"
        ));
        let stream = match page {
            Some(text) => format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET"),
            None => String::new(),
        };
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ));
    }

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        write!(pdf, "{} 0 obj\n{body}\nendobj\n", i + 1).unwrap();
    }

    let xref_offset = pdf.len();
    write!(pdf, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).unwrap();
    for offset in offsets {
        write!(pdf, "{offset:010} 00000 n \n").unwrap();
    }
    write!(
        pdf,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    )
    .unwrap();
    pdf
}

/// `<sheetData>` rows of inline strings; an empty slice is an empty row.
pub fn inline_rows(rows: &[&[&str]]) -> String {
    let mut xml = String::new();
    for (r, row) in rows.iter().enumerate() {
        if row.is_empty() {
            continue;
        }
        xml.push_str(&format!("<row r=\"{}\">", r + 1));
        for (c, value) in row.iter().enumerate() {
            let col = (b'A' + c as u8) as char;
            xml.push_str(&format!(
                "<c r=\"{col}{}\" t=\"inlineStr\"><is><t>{value}</t></is></c>",
                r + 1
            ));
        }
        xml.push_str("</row>");
    }
    xml
}

/// XLSX workbook from `(sheet name, sheetData inner XML)` pairs.
pub fn build_xlsx(sheets: &[(&str, String)]) -> Vec<u8> {
    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    );
    let mut workbook_sheets = String::new();
    let mut workbook_rels = String::new();

    for (i, (name, _)) in sheets.iter().enumerate() {
        let n = i + 1;
        content_types.push_str(&format!(
            r#"
    <Override PartName="/xl/worksheets/sheet{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
        workbook_sheets.push_str(&format!(
            r#"<sheet name="{name}" sheetId="{n}" r:id="rId{n}"/>"#
        ));
        workbook_rels.push_str(&format!(
            r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        ));
    }
    content_types.push_str("\n</Types>");

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(content_types.as_bytes()).unwrap();

        zip.start_file("_rels/.rels", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
        )
        .unwrap();

        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>{workbook_sheets}</sheets>
</workbook>"#
            )
            .as_bytes(),
        )
        .unwrap();

        zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{workbook_rels}</Relationships>"#
            )
            .as_bytes(),
        )
        .unwrap();

        for (i, (_, sheet_data)) in sheets.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
                .unwrap();
            zip.write_all(
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>{sheet_data}</sheetData>
</worksheet>"#
                )
                .as_bytes(),
            )
            .unwrap();
        }

        zip.finish().unwrap();
    }

    buffer.into_inner()
}

/// Renders page `n` as the bytes `page-n`, or fails for pages in `fail_on`.
pub struct FakeRenderer {
    pub fail_on: Vec<u32>,
    pub calls: Arc<AtomicUsize>,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self {
            fail_on: Vec::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_on(pages: &[u32]) -> Self {
        Self {
            fail_on: pages.to_vec(),
            ..Self::new()
        }
    }
}

impl PageRenderer for FakeRenderer {
    fn render_page(&self, _path: &Path, page: u32, _dpi: u32) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&page) {
            return Err(ExtractError::Render {
                page,
                message: "simulated render failure".to_string(),
            });
        }
        Ok(format!("page-{page}").into_bytes())
    }
}

/// Reads back what `FakeRenderer` produced as `text of page-n`.
pub struct FakeOcr {
    pub available: bool,
    pub calls: Arc<AtomicUsize>,
}

impl FakeOcr {
    pub fn new() -> Self {
        Self {
            available: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }
}

impl OcrEngine for FakeOcr {
    fn recognize(&self, image: &[u8]) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let label = String::from_utf8_lossy(image);
        Ok(format!("text of {label}"))
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

pub fn test_config() -> Config {
    Config {
        extraction: ExtractionConfig::default(),
        ocr: OcrConfig::default(),
    }
}

pub fn fake_dispatcher(renderer: FakeRenderer, ocr: FakeOcr) -> ExtractionDispatcher {
    ExtractionDispatcher::with_backends(&test_config(), Box::new(renderer), Box::new(ocr))
}
