use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::{StoreError, read_json, write_json_atomic};
use crate::models::BirthdayRecord;
use crate::utils::datetime::parse_month_day;

/// Birthday roster backed by a single JSON file
///
/// Every call goes back to disk; nothing is cached between queries.
/// Clones share one write lock, so writers through the same store never interleave.
#[derive(Clone, Debug)]
pub struct RecordStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the roster, failing open to an empty list
    pub async fn load(&self) -> Vec<BirthdayRecord> {
        match self.try_load().await {
            Ok(records) => records,
            Err(e) => {
                error!("Error loading birthdays: {}", e);
                Vec::new()
            }
        }
    }

    /// Load the roster, surfacing storage failures
    ///
    /// Individual malformed entries are skipped rather than failing the load.
    pub async fn try_load(&self) -> Result<Vec<BirthdayRecord>, StoreError> {
        let entries: Vec<serde_json::Value> = read_json(&self.path).await?.unwrap_or_default();

        let records = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match parse_entry(entry) {
                Ok(record) => Some(record),
                Err(reason) => {
                    warn!(
                        "Skipping malformed birthday entry #{} in {}: {}",
                        index,
                        self.path.display(),
                        reason
                    );
                    None
                }
            })
            .collect();

        Ok(records)
    }

    /// Overwrite the roster
    pub async fn save(&self, records: &[BirthdayRecord]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write(records).await
    }

    /// Append one validated record to the roster
    pub async fn append(
        &self,
        name: &str,
        birthday: &str,
        phone: Option<String>,
    ) -> Result<BirthdayRecord, StoreError> {
        let record = BirthdayRecord::new(name.trim(), birthday.trim(), phone);
        validate_record(&record).map_err(StoreError::InvalidRecord)?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.try_load().await?;
        records.push(record.clone());
        self.write(&records).await?;

        info!("Added birthday for {} on {}", record.name, record.birthday);
        Ok(record)
    }

    /// Caller must hold `write_lock`
    async fn write(&self, records: &[BirthdayRecord]) -> Result<(), StoreError> {
        write_json_atomic(&self.path, records).await.inspect_err(|e| {
            error!("Error saving birthdays: {}", e);
        })
    }
}

fn parse_entry(entry: serde_json::Value) -> Result<BirthdayRecord, String> {
    let record: BirthdayRecord = serde_json::from_value(entry).map_err(|e| e.to_string())?;
    validate_record(&record)?;
    Ok(record)
}

/// Check the required fields of a record
pub fn validate_record(record: &BirthdayRecord) -> Result<(), String> {
    if record.name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }
    if parse_month_day(&record.birthday).is_none() {
        return Err(format!(
            "birthday '{}' is not a valid MM-DD date",
            record.birthday
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> RecordStore {
        RecordStore::new(dir.path().join("data").join("birthdays.json"))
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.load().await.is_empty());
        assert!(store.try_load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_returns_same_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let records = vec![
            BirthdayRecord::new("Ada", "07-02", Some("+44 1".into())),
            BirthdayRecord::new("Grace", "12-09", None),
            BirthdayRecord::new("Ada", "07-02", Some("+44 1".into())),
        ];

        store.save(&records).await.unwrap();
        let loaded = store.load().await;
        assert_eq!(loaded, records);

        store.save(&loaded).await.unwrap();
        assert_eq!(store.load().await, records);
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&[BirthdayRecord::new("Ada", "07-02", None)]).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path().join("data"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["birthdays.json".to_string()]);
    }

    #[tokio::test]
    async fn test_unparsable_file_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("birthdays.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = RecordStore::new(&path);

        assert!(store.load().await.is_empty());
        assert!(matches!(
            store.try_load().await,
            Err(StoreError::Json { .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("birthdays.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "Ada", "birthday": "07-02", "phone": "123"},
                {"birthday": "01-01"},
                {"name": "", "birthday": "01-01"},
                {"name": "Bad Date", "birthday": "02-30"},
                "not an object",
                {"name": "Grace", "birthday": "12-09"}
            ]"#,
        )
        .unwrap();
        let store = RecordStore::new(&path);

        let names: Vec<_> = store.load().await.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Ada", "Grace"]);
    }

    #[tokio::test]
    async fn test_append_adds_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.append("Ada", "07-02", None).await.unwrap();
        store.append(" Grace ", "12-09", Some("555".into())).await.unwrap();

        let records = store.load().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Grace");
        assert_eq!(records[1].phone, "555");
        assert_eq!(records[0].phone, "N/A");
    }

    #[tokio::test]
    async fn test_append_rejects_invalid_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(matches!(
            store.append("Ada", "7/2", None).await,
            Err(StoreError::InvalidRecord(_))
        ));
        assert!(matches!(
            store.append("   ", "07-02", None).await,
            Err(StoreError::InvalidRecord(_))
        ));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_leave_a_loadable_roster() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        for round in 0..20 {
            let handles: Vec<_> = (1..=8)
                .map(|len| {
                    let store = store.clone();
                    tokio::spawn(async move {
                        let records: Vec<_> = (0..len * 10)
                            .map(|i| BirthdayRecord::new(format!("Person {}", i), "07-02", None))
                            .collect();
                        store.save(&records).await
                    })
                })
                .collect();
            for handle in handles {
                handle.await.unwrap().unwrap();
            }

            let loaded = store.try_load().await;
            assert!(loaded.is_ok(), "round {} left the roster unreadable", round);
            assert_eq!(loaded.unwrap().len() % 10, 0);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_keep_every_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.append(&format!("Person {}", i), "03-15", None).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut names: Vec<_> = store.try_load().await.unwrap().into_iter().map(|r| r.name).collect();
        names.sort();
        let mut expected: Vec<_> = (0..16).map(|i| format!("Person {}", i)).collect();
        expected.sort();
        assert_eq!(names, expected);
    }
}
