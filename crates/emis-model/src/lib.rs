pub mod lookup;
pub mod record;

pub use lookup::{EMIS_CODE_ID_COLUMN, LookupRow, READ_CV2_COLUMN};
pub use record::{ComponentRecord, ResolvedRecord};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_record() -> ComponentRecord {
        let mut code_attributes = BTreeMap::new();
        code_attributes.insert("displayName".to_string(), "Systolic BP".to_string());
        code_attributes.insert("codeSystem".to_string(), "EMISINTERNAL".to_string());
        ComponentRecord {
            code_system_id: "237011".to_string(),
            code_attributes,
            template_name: "Assessment".to_string(),
            library_name: "Core Assessments".to_string(),
            page_name: "Observations".to_string(),
            location_title: "Blood pressure".to_string(),
            prompt_label: "Systolic BP".to_string(),
            mandatory_flag: "false".to_string(),
            prompt_for_date_flag: "true".to_string(),
            diary_flag: String::new(),
            source_path: "templates/Assessment v2.1.xml".into(),
        }
    }

    #[test]
    fn record_serializes() {
        let record = sample_record();
        let json = serde_json::to_string(&record).expect("serialize record");
        let round: ComponentRecord = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round, record);
    }

    #[test]
    fn code_attribute_defaults_to_empty() {
        let record = sample_record();
        assert_eq!(record.code_attribute("displayName"), "Systolic BP");
        assert_eq!(record.code_attribute("missing"), "");
    }

    #[test]
    fn lookup_row_coerces_identifier() {
        let row: LookupRow = [
            (EMIS_CODE_ID_COLUMN.to_string(), " 237011 ".to_string()),
            (READ_CV2_COLUMN.to_string(), "X123".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(row.emis_code_id(), Some(237011));
        assert_eq!(row.read_cv2(), "X123");
    }

    #[test]
    fn lookup_row_rejects_non_numeric_identifier() {
        let row: LookupRow = [(EMIS_CODE_ID_COLUMN.to_string(), "n/a".to_string())]
            .into_iter()
            .collect();
        assert_eq!(row.emis_code_id(), None);
        assert_eq!(row.read_cv2(), "");
    }
}
