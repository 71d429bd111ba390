use crate::error::{ExtractError, Result};

pub struct DocxExtractor;

impl DocxExtractor {
    /// Text of every top-level body paragraph, one per line.
    ///
    /// Empty paragraphs are kept as empty lines; tables are not paragraphs
    /// and are skipped.
    pub fn extract(bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| ExtractError::Docx(format!("DOCX parse error: {e}")))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => {
                    Some(Self::paragraph_text(paragraph))
                }
                _ => None,
            })
            .collect();

        Ok(paragraphs.join("\n"))
    }

    fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
        let mut content = String::new();
        for child in &paragraph.children {
            match child {
                docx_rs::ParagraphChild::Run(run) => Self::push_run(&mut content, run),
                docx_rs::ParagraphChild::Hyperlink(link) => {
                    for link_child in &link.children {
                        if let docx_rs::ParagraphChild::Run(run) = link_child {
                            Self::push_run(&mut content, run);
                        }
                    }
                }
                _ => {}
            }
        }
        content
    }

    fn push_run(content: &mut String, run: &docx_rs::Run) {
        for run_child in &run.children {
            match run_child {
                docx_rs::RunChild::Text(text) => content.push_str(&text.text),
                docx_rs::RunChild::Tab(_) => content.push('\t'),
                docx_rs::RunChild::Break(_) => content.push('\n'),
                _ => {}
            }
        }
    }
}
