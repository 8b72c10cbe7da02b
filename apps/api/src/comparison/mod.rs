//! Vendor comparison records and their document/table renderers.
//!
//! A `ComparisonRecord` is the structured shape the AI backend is asked to
//! return. Parsing is strict serde; malformed JSON is a fatal error for the
//! request, never patched up. Both renderers are pure functions from the
//! record to an output model; criterion percentages are rendered exactly as
//! given (pass-through, never recomputed from the score).

pub mod document;
pub mod table;

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use document::render_comparison_document;
pub use table::render_comparison_table;

/// Fallback shown in the document renderer when a narrative field is absent.
/// The table renderer leaves such cells empty instead.
pub const NOT_AVAILABLE: &str = "Not available.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRecord {
    #[serde(default)]
    pub vendors: Vec<VendorEvaluation>,
    #[serde(default)]
    pub recommendation: Option<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub top_vendors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorEvaluation {
    pub vendor_name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub scores: Scores,
    #[serde(default)]
    pub strengths: Option<String>,
    #[serde(default)]
    pub weaknesses: Option<String>,
    #[serde(default)]
    pub risks: Option<String>,
}

/// One criterion's evaluation. `percentage` is whatever the backend sent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CriterionScore {
    pub score: f64,
    pub percentage: f64,
}

/// Criterion scores in the order the backend listed them, no sorting.
#[derive(Debug, Clone, Default)]
pub struct Scores {
    entries: Vec<(String, CriterionScore)>,
}

impl Scores {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CriterionScore)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CriterionScore)> for Scores {
    fn from_iter<I: IntoIterator<Item = (String, CriterionScore)>>(iter: I) -> Self {
        Scores {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Scores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Scores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = Scores;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object of criterion scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Scores, A::Error> {
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, CriterionScore>()? {
                    entries.push((key, value));
                }
                Ok(Scores { entries })
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}

/// Formats a score or percentage the way the backend wrote it: whole
/// numbers without a decimal point, anything else via the default float
/// formatting.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) const SAMPLE: &str = r#"{
        "vendors": [
            {
                "vendor_name": "Acme Pharma Services",
                "summary": "Strong fill-finish proposal.",
                "scores": {
                    "Technical Capability": {"score": 8, "percentage": 80},
                    "Quality & Compliance": {"score": 9, "percentage": 90},
                    "Cost Competitiveness": {"score": 6.5, "percentage": 65}
                },
                "strengths": "Modern facility.",
                "weaknesses": "Limited capacity.",
                "risks": "Single-site operation."
            },
            {
                "vendor_name": "Borealis Биотех",
                "scores": {
                    "Technical Capability": {"score": 7, "percentage": 70},
                    "Quality & Compliance": {"score": 6, "percentage": 60},
                    "Cost Competitiveness": {"score": 9, "percentage": 90}
                }
            }
        ],
        "recommendation": {
            "summary": "Acme leads on quality.",
            "top_vendors": ["Acme Pharma Services", "Borealis Биотех"]
        }
    }"#;

    #[test]
    fn test_parses_the_pinned_response_shape() {
        let record: ComparisonRecord = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(record.vendors.len(), 2);
        let rec = record.recommendation.as_ref().unwrap();
        assert_eq!(rec.top_vendors.len(), 2);
        assert_eq!(record.vendors[0].scores.len(), 3);
        assert!(record.vendors[1].summary.is_none());
    }

    #[test]
    fn test_scores_preserve_backend_order() {
        let record: ComparisonRecord = serde_json::from_str(SAMPLE).unwrap();
        let criteria: Vec<&str> = record.vendors[0].scores.iter().map(|(k, _)| k).collect();
        assert_eq!(
            criteria,
            vec![
                "Technical Capability",
                "Quality & Compliance",
                "Cost Competitiveness"
            ]
        );
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = serde_json::from_str::<ComparisonRecord>("{\"vendors\": \"oops\"}");
        assert!(err.is_err());
    }

    #[test]
    fn test_format_number_drops_trailing_zero() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(6.5), "6.5");
        assert_eq!(format_number(0.0), "0");
    }
}
