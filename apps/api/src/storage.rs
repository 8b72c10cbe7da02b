//! Flat-file persistence: submissions, schemas, templates, and generated
//! artifacts. All locations are derived from [`Config`] at startup; nothing
//! in here is process-global.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;
use crate::forms::FormSchema;
use crate::values::ValuesRecord;

#[derive(Debug, Clone)]
pub struct Storage {
    counter_file: PathBuf,
    submissions_dir: PathBuf,
    rfp_dir: PathBuf,
    vendor_dir: PathBuf,
    schema_dir: PathBuf,
    template_dir: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Counter {
    last_id: u64,
}

impl Storage {
    /// Builds the storage layout from config and creates every directory.
    pub fn open(config: &Config) -> Result<Self> {
        let storage = Storage {
            counter_file: config.data_dir.join("global/global_counter.json"),
            submissions_dir: config.data_dir.join("submissions"),
            rfp_dir: config.data_dir.join("rfps"),
            vendor_dir: config.data_dir.join("vendor_responses"),
            schema_dir: config.schema_dir.clone(),
            template_dir: config.template_dir.clone(),
        };

        for dir in [
            storage.counter_file.parent().expect("counter file has a parent"),
            &storage.submissions_dir,
            &storage.rfp_dir,
            &storage.vendor_dir,
            &storage.schema_dir,
            &storage.template_dir,
        ] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        Ok(storage)
    }

    // --- Initiative counter ---

    /// Increments and persists the global initiative counter. A missing or
    /// unreadable counter file restarts from zero.
    pub fn next_initiative_id(&self) -> Result<u64> {
        let mut counter = match fs::read_to_string(&self.counter_file) {
            Ok(text) => serde_json::from_str::<Counter>(&text).unwrap_or_else(|e| {
                warn!("Counter file malformed ({e}), resetting to 0");
                Counter::default()
            }),
            Err(_) => Counter::default(),
        };
        counter.last_id += 1;
        fs::write(
            &self.counter_file,
            serde_json::to_string_pretty(&counter)?,
        )
        .with_context(|| format!("Failed to write {}", self.counter_file.display()))?;
        Ok(counter.last_id)
    }

    // --- Submissions ---

    fn submission_path(&self, initiative_id: u64, schema_name: Option<&str>) -> PathBuf {
        match schema_name {
            Some(schema) => self
                .submissions_dir
                .join(format!("initiative_{initiative_id}_{schema}.json")),
            None => self
                .submissions_dir
                .join(format!("initiative_{initiative_id}.json")),
        }
    }

    pub fn save_submission(
        &self,
        initiative_id: u64,
        schema_name: Option<&str>,
        record: &ValuesRecord,
    ) -> Result<()> {
        let path = self.submission_path(initiative_id, schema_name);
        fs::write(&path, serde_json::to_string_pretty(record)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Loads the base submission, or `None` if the initiative doesn't exist.
    pub fn load_base_submission(&self, initiative_id: u64) -> Result<Option<ValuesRecord>> {
        read_record(&self.submission_path(initiative_id, None))
    }

    /// Loads and merges the base and detail submissions for an initiative.
    /// `None` when either file is missing.
    pub fn load_initiative_data(
        &self,
        initiative_id: u64,
        schema_name: &str,
    ) -> Result<Option<ValuesRecord>> {
        let base = read_record(&self.submission_path(initiative_id, None))?;
        let details = read_record(&self.submission_path(initiative_id, Some(schema_name)))?;
        match (base, details) {
            (Some(mut base), Some(details)) => {
                base.merge(details);
                Ok(Some(base))
            }
            _ => Ok(None),
        }
    }

    /// All base submissions, newest initiative first. Detail files and
    /// unreadable JSON are skipped.
    pub fn list_initiatives(&self) -> Result<Vec<ValuesRecord>> {
        let mut initiatives: Vec<(u64, ValuesRecord)> = Vec::new();

        for entry in fs::read_dir(&self.submissions_dir)
            .with_context(|| format!("Failed to read {}", self.submissions_dir.display()))?
        {
            let path = entry?.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // Base files are "initiative_{id}"; anything with a further
            // underscore is a detail submission.
            let Some(id) = stem
                .strip_prefix("initiative_")
                .and_then(|rest| rest.parse::<u64>().ok())
            else {
                continue;
            };
            match read_record(&path) {
                Ok(Some(record)) => initiatives.push((id, record)),
                Ok(None) => {}
                Err(e) => warn!("Skipping unreadable submission {}: {e}", path.display()),
            }
        }

        initiatives.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(initiatives.into_iter().map(|(_, record)| record).collect())
    }

    // --- Schemas & templates ---

    /// Loads a form schema by name (without the `.json` extension).
    /// `None` when no such schema file exists.
    pub fn load_schema(&self, name: &str) -> Result<Option<FormSchema>> {
        let path = self.schema_dir.join(format!("{name}.json"));
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        let schema = serde_json::from_str(&text)
            .with_context(|| format!("Malformed schema {}", path.display()))?;
        Ok(Some(schema))
    }

    /// Reads the RFP template for a detail schema, if one exists.
    pub fn read_template(&self, schema_name: &str) -> Result<Option<String>> {
        let path = self.template_dir.join(format!("{schema_name}.txt"));
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    // --- Generated RFPs ---

    pub fn rfp_docx_path(&self, initiative_id: u64) -> PathBuf {
        self.rfp_dir
            .join(format!("initiative_{initiative_id}_rfp.docx"))
    }

    // --- Vendor responses & comparison artifacts ---

    fn initiative_vendor_dir(&self, initiative_id: u64) -> PathBuf {
        self.vendor_dir.join(format!("initiative_{initiative_id}"))
    }

    /// Stores an uploaded vendor response under the initiative's folder.
    /// Only the final path component of the client-supplied name is used.
    pub fn save_vendor_file(&self, initiative_id: u64, filename: &str, bytes: &[u8]) -> Result<()> {
        let dir = self.initiative_vendor_dir(initiative_id);
        fs::create_dir_all(&dir)?;
        let safe_name = Path::new(filename)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let path = dir.join(safe_name);
        fs::write(&path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn write_combined_responses(
        &self,
        initiative_id: u64,
        combined: &BTreeMap<String, String>,
    ) -> Result<()> {
        let dir = self.initiative_vendor_dir(initiative_id);
        fs::create_dir_all(&dir)?;
        let path = dir.join("combined_vendor_responses.json");
        fs::write(&path, serde_json::to_string_pretty(combined)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn read_combined_responses(
        &self,
        initiative_id: u64,
    ) -> Result<Option<BTreeMap<String, String>>> {
        let path = self
            .initiative_vendor_dir(initiative_id)
            .join("combined_vendor_responses.json");
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        let combined = serde_json::from_str(&text)
            .with_context(|| format!("Malformed vendor responses {}", path.display()))?;
        Ok(Some(combined))
    }

    pub fn comparison_txt_path(&self, initiative_id: u64) -> PathBuf {
        self.initiative_vendor_dir(initiative_id)
            .join("comparison_result.txt")
    }

    pub fn comparison_docx_path(&self, initiative_id: u64) -> PathBuf {
        self.initiative_vendor_dir(initiative_id)
            .join("comparison_result.docx")
    }

    pub fn comparison_xlsx_path(&self, initiative_id: u64) -> PathBuf {
        self.initiative_vendor_dir(initiative_id)
            .join("comparison_result.xlsx")
    }
}

fn read_record(path: &Path) -> Result<Option<ValuesRecord>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };
    let record = serde_json::from_str(&text)
        .with_context(|| format!("Malformed submission {}", path.display()))?;
    Ok(Some(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            gemini_api_key: None,
            port: 0,
            rust_log: "info".into(),
            llm_timeout: std::time::Duration::from_secs(1),
            data_dir: dir.path().join("data"),
            schema_dir: dir.path().join("schema"),
            template_dir: dir.path().join("templates"),
        };
        let storage = Storage::open(&config).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_counter_increments_across_calls() {
        let (_dir, storage) = test_storage();
        assert_eq!(storage.next_initiative_id().unwrap(), 1);
        assert_eq!(storage.next_initiative_id().unwrap(), 2);
        assert_eq!(storage.next_initiative_id().unwrap(), 3);
    }

    #[test]
    fn test_malformed_counter_resets() {
        let (_dir, storage) = test_storage();
        storage.next_initiative_id().unwrap();
        fs::write(&storage.counter_file, "{not json").unwrap();
        assert_eq!(storage.next_initiative_id().unwrap(), 1);
    }

    #[test]
    fn test_load_initiative_data_merges_details_over_base() {
        let (_dir, storage) = test_storage();
        let base = ValuesRecord::from_pairs(vec![
            ("request_type".to_string(), "Clinical".to_string()),
            ("contact".to_string(), "old".to_string()),
        ]);
        let details =
            ValuesRecord::from_pairs(vec![("contact".to_string(), "new".to_string())]);
        storage.save_submission(7, None, &base).unwrap();
        storage
            .save_submission(7, Some("clinical_manufacturing"), &details)
            .unwrap();

        let merged = storage
            .load_initiative_data(7, "clinical_manufacturing")
            .unwrap()
            .unwrap();
        assert_eq!(merged.get_text("contact").unwrap(), "new");
        assert_eq!(merged.get_text("request_type").unwrap(), "Clinical");
    }

    #[test]
    fn test_load_initiative_data_missing_detail_is_none() {
        let (_dir, storage) = test_storage();
        let base = ValuesRecord::from_pairs(vec![("a".to_string(), "b".to_string())]);
        storage.save_submission(1, None, &base).unwrap();
        assert!(storage
            .load_initiative_data(1, "clinical_testing")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_list_initiatives_newest_first_skipping_detail_files() {
        let (_dir, storage) = test_storage();
        for id in [1u64, 2, 10] {
            let mut record = ValuesRecord::new();
            record.insert("initiative_id", id.to_string());
            storage.save_submission(id, None, &record).unwrap();
        }
        let details = ValuesRecord::new();
        storage.save_submission(2, Some("clinical_packaging"), &details).unwrap();

        let initiatives = storage.list_initiatives().unwrap();
        let ids: Vec<String> = initiatives
            .iter()
            .map(|r| r.get_text("initiative_id").unwrap().into_owned())
            .collect();
        assert_eq!(ids, vec!["10", "2", "1"]);
    }

    #[test]
    fn test_load_schema_absent_is_none() {
        let (_dir, storage) = test_storage();
        assert!(storage.load_schema("nope").unwrap().is_none());
    }

    #[test]
    fn test_vendor_file_name_is_sanitized() {
        let (_dir, storage) = test_storage();
        storage
            .save_vendor_file(3, "../../escape.txt", b"hello")
            .unwrap();
        let path = storage.initiative_vendor_dir(3).join("escape.txt");
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }

    #[test]
    fn test_combined_responses_round_trip() {
        let (_dir, storage) = test_storage();
        let mut combined = BTreeMap::new();
        combined.insert("a.pdf".to_string(), "text a".to_string());
        combined.insert("b.txt".to_string(), "text b".to_string());
        storage.write_combined_responses(5, &combined).unwrap();
        assert_eq!(storage.read_combined_responses(5).unwrap().unwrap(), combined);
    }
}
