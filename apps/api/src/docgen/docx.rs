//! DocumentModel to .docx writer.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

use crate::docgen::{DocBlock, DocumentModel};

/// Font size in half-points for heading levels 1–3.
fn heading_size(level: u8) -> usize {
    match level {
        1 => 32,
        2 => 28,
        _ => 24,
    }
}

/// Writes the model to `path` as a Word document.
pub fn write_docx(model: &DocumentModel, path: &Path) -> Result<()> {
    let mut docx = Docx::new();

    for block in &model.blocks {
        match block {
            DocBlock::Heading { level, text } => {
                docx = docx.add_paragraph(
                    Paragraph::new().add_run(
                        Run::new()
                            .add_text(text.as_str())
                            .bold()
                            .size(heading_size(*level)),
                    ),
                );
            }
            DocBlock::Paragraph(text) => {
                docx = docx.add_paragraph(
                    Paragraph::new().add_run(Run::new().add_text(text.as_str())),
                );
            }
            DocBlock::Table(table) => {
                let mut rows = Vec::with_capacity(table.rows.len() + 1);
                rows.push(table_row(&table.header, true));
                for row in &table.rows {
                    rows.push(table_row(row, false));
                }
                docx = docx.add_table(Table::new(rows));
            }
        }
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    docx.build()
        .pack(file)
        .map_err(|e| anyhow!("Failed to write docx {}: {e}", path.display()))?;
    Ok(())
}

fn table_row(cells: &[String], bold: bool) -> TableRow {
    TableRow::new(
        cells
            .iter()
            .map(|text| {
                let mut run = Run::new().add_text(text.as_str());
                if bold {
                    run = run.bold();
                }
                TableCell::new().add_paragraph(Paragraph::new().add_run(run))
            })
            .collect(),
    )
}
