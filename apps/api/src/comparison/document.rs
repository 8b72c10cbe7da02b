//! ComparisonRecord to document model.

use crate::comparison::{format_number, ComparisonRecord, NOT_AVAILABLE};
use crate::docgen::{DocTable, DocumentModel};

/// Renders the comparison as a report document: an overall-recommendation
/// block when present, then one section per vendor in the given order,
/// summary, a criterion score table, strengths, weaknesses, risks. Missing
/// narrative fields render as [`NOT_AVAILABLE`].
pub fn render_comparison_document(record: &ComparisonRecord) -> DocumentModel {
    let mut doc = DocumentModel::new();

    if let Some(recommendation) = &record.recommendation {
        doc.heading(2, "Overall Recommendation");
        doc.paragraph(
            recommendation
                .summary
                .as_deref()
                .unwrap_or("No summary provided."),
        );
        doc.paragraph(format!(
            "Top Vendors: {}",
            recommendation.top_vendors.join(", ")
        ));
    }

    for vendor in &record.vendors {
        doc.heading(2, vendor.vendor_name.as_str());

        doc.heading(3, "Key Proposal Points");
        doc.paragraph(vendor.summary.as_deref().unwrap_or(NOT_AVAILABLE));

        doc.heading(3, "Evaluation Scores");
        let rows = vendor
            .scores
            .iter()
            .map(|(criterion, score)| {
                vec![
                    criterion.to_string(),
                    format_number(score.score),
                    format!("{}%", format_number(score.percentage)),
                ]
            })
            .collect();
        doc.table(DocTable {
            header: vec![
                "Criterion".to_string(),
                "Score (/10)".to_string(),
                "Percentage".to_string(),
            ],
            rows,
        });

        doc.heading(3, "Strengths");
        doc.paragraph(vendor.strengths.as_deref().unwrap_or(NOT_AVAILABLE));

        doc.heading(3, "Weaknesses");
        doc.paragraph(vendor.weaknesses.as_deref().unwrap_or(NOT_AVAILABLE));

        doc.heading(3, "Risks / Alignment");
        doc.paragraph(vendor.risks.as_deref().unwrap_or(NOT_AVAILABLE));

        // Space between vendor sections.
        doc.paragraph("");
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::tests::SAMPLE;
    use crate::docgen::DocBlock;

    fn sample() -> ComparisonRecord {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_recommendation_block_comes_first() {
        let doc = render_comparison_document(&sample());
        assert_eq!(
            doc.blocks[0],
            DocBlock::Heading {
                level: 2,
                text: "Overall Recommendation".into()
            }
        );
        assert_eq!(
            doc.blocks[2],
            DocBlock::Paragraph("Top Vendors: Acme Pharma Services, Borealis Биотех".into())
        );
    }

    #[test]
    fn test_one_score_table_per_vendor_in_order() {
        let doc = render_comparison_document(&sample());
        let tables: Vec<&DocTable> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                DocBlock::Table(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows.len(), 3);
        assert_eq!(tables[0].rows[0][0], "Technical Capability");
        assert_eq!(tables[0].rows[0][1], "8");
        assert_eq!(tables[0].rows[0][2], "80%");
        // Fractional score kept as given.
        assert_eq!(tables[0].rows[2][1], "6.5");
    }

    #[test]
    fn test_missing_narratives_fall_back_to_not_available() {
        let doc = render_comparison_document(&sample());
        // Second vendor has no summary/strengths/weaknesses/risks.
        let fallbacks = doc
            .blocks
            .iter()
            .filter(|b| matches!(b, DocBlock::Paragraph(p) if p == NOT_AVAILABLE))
            .count();
        assert_eq!(fallbacks, 4);
    }

    #[test]
    fn test_no_recommendation_starts_with_first_vendor() {
        let mut record = sample();
        record.recommendation = None;
        let doc = render_comparison_document(&record);
        assert_eq!(
            doc.blocks[0],
            DocBlock::Heading {
                level: 2,
                text: "Acme Pharma Services".into()
            }
        );
    }

    #[test]
    fn test_percentage_is_pass_through_not_recomputed() {
        let json = r#"{"vendors": [{"vendor_name": "V", "scores":
            {"Quality": {"score": 5, "percentage": 42}}}]}"#;
        let record: ComparisonRecord = serde_json::from_str(json).unwrap();
        let doc = render_comparison_document(&record);
        let table = doc
            .blocks
            .iter()
            .find_map(|b| match b {
                DocBlock::Table(t) => Some(t),
                _ => None,
            })
            .unwrap();
        assert_eq!(table.rows[0][2], "42%");
    }
}
