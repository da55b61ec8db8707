// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::bibliography::{AddressReport, Bibliography};
use crate::utils::error::StorageError;

pub struct StorageManager {
    out_path: PathBuf,
}

impl StorageManager {
    /// Creates a StorageManager writing the bibliography to `out_path`
    pub fn new<P: AsRef<Path>>(out_path: P) -> Result<Self, StorageError> {
        let out_path = out_path.as_ref().to_path_buf();

        // Create the parent directory if it doesn't exist
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(StorageError::IoError)?;
            }
        }

        Ok(Self { out_path })
    }

    /// Saves the (enriched) bibliography as pretty-printed JSON
    pub fn save_bibliography(&self, bib: &Bibliography) -> Result<PathBuf, StorageError> {
        let json = serde_json::to_string_pretty(bib)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&self.out_path, json)
            .map_err(StorageError::IoError)?;

        tracing::info!("Written to {}", self.out_path.display());

        Ok(self.out_path.clone())
    }

    /// Path of the report file: `<out stem>_address_report.json` next to the output
    pub fn report_path(&self) -> PathBuf {
        let stem = self.out_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "bibliography".to_string());
        self.out_path.with_file_name(format!("{}_address_report.json", stem))
    }

    /// Saves the enrichment counts in JSON format
    pub fn save_report(&self, report: &AddressReport, input: &Path) -> Result<PathBuf, StorageError> {
        let file_path = self.report_path();

        let metadata = serde_json::json!({
            "input": input.display().to_string(),
            "output": self.out_path.display().to_string(),
            "counts": report,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved report to {}", file_path.display());

        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bibliography::models::BibEntry;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bib_address_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_save_bibliography_creates_parent_dir() {
        let dir = scratch_dir("save");
        let out = dir.join("nested").join("refs.json");
        let storage = StorageManager::new(&out).unwrap();

        let bib = Bibliography {
            entries: vec![BibEntry::new("k", "inproceedings").with_field("address", "Rome, Italy")],
        };
        let written = storage.save_bibliography(&bib).unwrap();
        assert_eq!(written, out);

        let loaded = Bibliography::from_json(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(loaded, bib);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_report() {
        let dir = scratch_dir("report");
        let storage = StorageManager::new(dir.join("refs.json")).unwrap();
        let report = AddressReport { total: 3, present: 1, found: 1, not_found: 1, skipped: 0 };

        let path = storage.save_report(&report, Path::new("in.json")).unwrap();
        assert_eq!(path, dir.join("refs_address_report.json"));

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["counts"]["found"], 1);
        assert_eq!(value["input"], "in.json");
        assert!(value["extraction_timestamp"].is_string());

        fs::remove_dir_all(&dir).unwrap();
    }
}
