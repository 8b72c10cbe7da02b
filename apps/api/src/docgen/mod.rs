//! Output document models and their file writers.
//!
//! Renderers elsewhere in the crate build a [`DocumentModel`] (headings,
//! paragraphs, tables) or a [`TabularModel`] (header row plus data rows);
//! the writers here serialize those to `.docx` and `.xlsx` files. Keeping
//! the models separate from the writers keeps every renderer a pure,
//! testable transform.

pub mod docx;
pub mod xlsx;

/// A paragraph/heading/table document, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentModel {
    pub blocks: Vec<DocBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocBlock {
    /// Heading levels 1–3.
    Heading { level: u8, text: String },
    Paragraph(String),
    Table(DocTable),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DocumentModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&mut self, level: u8, text: impl Into<String>) {
        self.blocks.push(DocBlock::Heading {
            level,
            text: text.into(),
        });
    }

    pub fn paragraph(&mut self, text: impl Into<String>) {
        self.blocks.push(DocBlock::Paragraph(text.into()));
    }

    pub fn table(&mut self, table: DocTable) {
        self.blocks.push(DocBlock::Table(table));
    }

    /// Appends another model's blocks after this one's.
    pub fn append(&mut self, other: DocumentModel) {
        self.blocks.extend(other.blocks);
    }
}

/// Row-oriented sheet model: a header row plus one row per record.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularModel {
    pub sheet_name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// Absent value; the writer leaves the cell blank.
    Empty,
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<Option<&String>> for CellValue {
    fn from(value: Option<&String>) -> Self {
        match value {
            Some(s) => CellValue::Text(s.clone()),
            None => CellValue::Empty,
        }
    }
}

/// Parses generated RFP text into a document model using the lightweight
/// heading markup the AI backend is prompted to emit: lines starting with
/// `#`, `##`, `###` become headings, blank lines become empty paragraphs,
/// everything else a paragraph.
pub fn document_from_text(text: &str) -> DocumentModel {
    let mut doc = DocumentModel::new();
    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("###") {
            doc.heading(3, rest.trim_start_matches(['#', ' ']).trim());
        } else if let Some(rest) = line.strip_prefix("##") {
            doc.heading(2, rest.trim_start_matches(['#', ' ']).trim());
        } else if let Some(rest) = line.strip_prefix('#') {
            doc.heading(1, rest.trim_start_matches(['#', ' ']).trim());
        } else {
            doc.paragraph(line);
        }
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_text_maps_heading_levels() {
        let text = "# Title\n\n## Scope\nBody line.\n### Detail\nmore";
        let doc = document_from_text(text);
        assert_eq!(
            doc.blocks,
            vec![
                DocBlock::Heading {
                    level: 1,
                    text: "Title".into()
                },
                DocBlock::Paragraph("".into()),
                DocBlock::Heading {
                    level: 2,
                    text: "Scope".into()
                },
                DocBlock::Paragraph("Body line.".into()),
                DocBlock::Heading {
                    level: 3,
                    text: "Detail".into()
                },
                DocBlock::Paragraph("more".into()),
            ]
        );
    }

    #[test]
    fn test_document_from_text_strips_extra_hash_and_space() {
        let doc = document_from_text("##   Padded Heading");
        assert_eq!(
            doc.blocks,
            vec![DocBlock::Heading {
                level: 2,
                text: "Padded Heading".into()
            }]
        );
    }

    #[test]
    fn test_append_concatenates_blocks() {
        let mut a = DocumentModel::new();
        a.heading(1, "A");
        let mut b = DocumentModel::new();
        b.paragraph("b");
        a.append(b);
        assert_eq!(a.blocks.len(), 2);
    }
}
