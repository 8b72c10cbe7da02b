//! TabularModel to .xlsx writer.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, FormatAlign, Workbook};

use crate::docgen::{CellValue, TabularModel};

/// Writes the model to `path` as a spreadsheet: bold, centered header row,
/// then one row per record. Empty cells are left blank.
pub fn write_xlsx(model: &TabularModel, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(&model.sheet_name)
        .with_context(|| format!("Invalid sheet name '{}'", model.sheet_name))?;

    let header_format = Format::new().set_bold().set_align(FormatAlign::Center);
    for (col, title) in model.header.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, title.as_str(), &header_format)?;
    }

    for (row, cells) in model.rows.iter().enumerate() {
        let row = row as u32 + 1;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Text(text) => {
                    worksheet.write(row, col, text.as_str())?;
                }
                CellValue::Number(number) => {
                    worksheet.write(row, col, *number)?;
                }
                CellValue::Empty => {}
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write xlsx {}", path.display()))?;
    Ok(())
}
