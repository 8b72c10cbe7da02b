// Initiative intake: the main form, the category-specific detail form, and
// the stored submissions behind both.

pub mod handlers;

use crate::values::ValuesRecord;

/// Schema file (without extension) for the main intake form.
pub const MAIN_SCHEMA: &str = "form_schema";

/// (request_type, services_needed) -> detail schema name.
const SCHEMA_MAP: &[((&str, &str), &str)] = &[
    (("Clinical", "Manufacturing"), "clinical_manufacturing"),
    (("Clinical", "Testing"), "clinical_testing"),
    (("Clinical", "Packaging"), "clinical_packaging"),
    (("Commercial", "Manufacturing"), "commercial_manufacturing"),
    (("Commercial", "Packaging"), "commercial_packaging"),
];

/// Detail schema for a base submission, chosen by request type and the
/// first selected service (checkbox groups submit a list).
pub fn detail_schema_for(record: &ValuesRecord) -> Option<&'static str> {
    let request_type = record.get("request_type")?.first()?.to_string();
    let service = record.get("services_needed")?.first()?.to_string();
    SCHEMA_MAP
        .iter()
        .find(|((rt, svc), _)| *rt == request_type && *svc == service)
        .map(|(_, schema)| *schema)
}

/// Schema names appear in URL paths and get mapped to files on disk,
/// so only a conservative character set is accepted.
pub fn valid_schema_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_schema_matches_type_and_first_service() {
        let mut record = ValuesRecord::new();
        record.insert("request_type", "Clinical");
        record.insert(
            "services_needed",
            vec!["Testing".to_string(), "Packaging".to_string()],
        );
        assert_eq!(detail_schema_for(&record), Some("clinical_testing"));
    }

    #[test]
    fn test_unmapped_selection_has_no_detail_schema() {
        let mut record = ValuesRecord::new();
        record.insert("request_type", "Commercial");
        record.insert("services_needed", "Testing");
        assert_eq!(detail_schema_for(&record), None);
    }

    #[test]
    fn test_missing_fields_have_no_detail_schema() {
        assert_eq!(detail_schema_for(&ValuesRecord::new()), None);
    }

    #[test]
    fn test_schema_name_validation() {
        assert!(valid_schema_name("clinical_manufacturing"));
        assert!(valid_schema_name("form-schema-2"));
        assert!(!valid_schema_name(""));
        assert!(!valid_schema_name("../etc/passwd"));
        assert!(!valid_schema_name("name with spaces"));
    }
}
