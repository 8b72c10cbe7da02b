//! ComparisonRecord to tabular (spreadsheet) model.

use crate::comparison::ComparisonRecord;
use crate::docgen::{CellValue, TabularModel};

const SHEET_NAME: &str = "Vendor Comparison";

const HEADER: [&str; 8] = [
    "Vendor Name",
    "Criterion",
    "Score (/10)",
    "Percentage",
    "Summary",
    "Strengths",
    "Weaknesses",
    "Risks",
];

/// Renders the comparison as one data row per (vendor, criterion) pair, in
/// given order. Narrative columns repeat per row; absent narratives are
/// empty cells; the table renderer applies no fallback text.
pub fn render_comparison_table(record: &ComparisonRecord) -> TabularModel {
    let mut rows = Vec::new();

    for vendor in &record.vendors {
        for (criterion, score) in vendor.scores.iter() {
            rows.push(vec![
                CellValue::from(vendor.vendor_name.as_str()),
                CellValue::from(criterion),
                CellValue::Number(score.score),
                CellValue::Number(score.percentage),
                CellValue::from(vendor.summary.as_ref()),
                CellValue::from(vendor.strengths.as_ref()),
                CellValue::from(vendor.weaknesses.as_ref()),
                CellValue::from(vendor.risks.as_ref()),
            ]);
        }
    }

    TabularModel {
        sheet_name: SHEET_NAME.to_string(),
        header: HEADER.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::tests::SAMPLE;

    fn sample() -> ComparisonRecord {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_two_vendors_times_three_criteria_is_six_rows() {
        let table = render_comparison_table(&sample());
        assert_eq!(table.header.len(), 8);
        assert_eq!(table.rows.len(), 6);
    }

    #[test]
    fn test_vendor_and_criterion_order_preserved() {
        let table = render_comparison_table(&sample());
        assert_eq!(
            table.rows[0][0],
            CellValue::Text("Acme Pharma Services".into())
        );
        assert_eq!(
            table.rows[0][1],
            CellValue::Text("Technical Capability".into())
        );
        assert_eq!(table.rows[3][0], CellValue::Text("Borealis Биотех".into()));
    }

    #[test]
    fn test_scores_carried_as_numbers() {
        let table = render_comparison_table(&sample());
        assert_eq!(table.rows[0][2], CellValue::Number(8.0));
        assert_eq!(table.rows[0][3], CellValue::Number(80.0));
    }

    #[test]
    fn test_missing_narratives_are_empty_cells() {
        let table = render_comparison_table(&sample());
        // Rows 3..6 belong to the vendor without narrative fields.
        assert_eq!(table.rows[3][4], CellValue::Empty);
        assert_eq!(table.rows[3][5], CellValue::Empty);
        // First vendor repeats its narrative on every row.
        assert_eq!(table.rows[0][4], CellValue::Text("Strong fill-finish proposal.".into()));
        assert_eq!(table.rows[1][4], CellValue::Text("Strong fill-finish proposal.".into()));
    }

    #[test]
    fn test_vendor_without_scores_contributes_no_rows() {
        let json = r#"{"vendors": [{"vendor_name": "V"}]}"#;
        let record: ComparisonRecord = serde_json::from_str(json).unwrap();
        let table = render_comparison_table(&record);
        assert!(table.rows.is_empty());
    }
}
