//! Record store for MediView.
//!
//! The whole record list lives in a single JSON document on disk. Every
//! operation re-reads the full array and every mutation rewrites it in one
//! piece; there is no caching, no partial update, and no locking, so the
//! last writer wins. The store is the only component with read/write access
//! to the record list; both viewer screens go through [`RecordStore`].

use crate::models::{PatientRecord, PatientType};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Default name of the record store file, created in the working directory.
pub const STORE_FILE: &str = "patients.json";

/// Predicates applied when listing or bulk-deleting records. All set
/// predicates must match (they are ANDed); an empty filter matches
/// everything.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub record_type: Option<PatientType>,
    pub saved_by: Option<String>,
    /// Case-insensitive substring match on the concatenated full name.
    pub name_query: Option<String>,
}

impl RecordFilter {
    /// Filter matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of_type(mut self, record_type: PatientType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    pub fn saved_by(mut self, username: impl Into<String>) -> Self {
        self.saved_by = Some(username.into());
        self
    }

    pub fn name_contains(mut self, query: impl Into<String>) -> Self {
        self.name_query = Some(query.into());
        self
    }

    pub fn matches(&self, record: &PatientRecord) -> bool {
        if let Some(record_type) = self.record_type {
            if record.record_type != record_type {
                return false;
            }
        }
        if let Some(saved_by) = &self.saved_by {
            if &record.saved_by != saved_by {
                return false;
            }
        }
        if let Some(query) = &self.name_query {
            let name = record.search_name().to_lowercase();
            if !name.contains(&query.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Owns read/write access to the record list.
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Opens the store backed by the given file. The file is not touched
    /// until the first read or write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the default store file in the working directory.
    pub fn open_default() -> Self {
        Self::open(STORE_FILE)
    }

    /// Reads the full record list. A missing store file is an empty list.
    fn read_all(&self) -> Result<Vec<PatientRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read record store {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Record store {} is not valid JSON", self.path.display()))
    }

    /// Rewrites the full record list in one piece.
    fn write_all(&self, records: &[PatientRecord]) -> Result<()> {
        let raw = serde_json::to_string(records).context("Failed to encode record store")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write record store {}", self.path.display()))
    }

    /// Returns the records matching `filter`, in storage order.
    pub fn list(&self, filter: &RecordFilter) -> Result<Vec<PatientRecord>> {
        let records = self.read_all()?;
        Ok(records.into_iter().filter(|r| filter.matches(r)).collect())
    }

    /// Appends a record and rewrites the store.
    pub fn insert(&self, record: PatientRecord) -> Result<()> {
        let mut records = self.read_all()?;
        records.push(record);
        self.write_all(&records)
    }

    /// Deletes the record with the given id, if present. Returns whether a
    /// record was removed.
    pub fn delete_by_id(&self, id: u64) -> Result<bool> {
        let mut records = self.read_all()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        let removed = records.len() < before;
        if removed {
            self.write_all(&records)?;
        }
        Ok(removed)
    }

    /// Deletes every record matching `filter`. Returns how many were removed.
    pub fn delete_where(&self, filter: &RecordFilter) -> Result<usize> {
        let mut records = self.read_all()?;
        let before = records.len();
        records.retain(|r| !filter.matches(r));
        let removed = before - records.len();
        if removed > 0 {
            self.write_all(&records)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sex;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_store(name: &str) -> RecordStore {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "mediview_store_{}_{}_{}.json",
            name,
            std::process::id(),
            n
        ));
        let _ = std::fs::remove_file(&path);
        RecordStore::open(path)
    }

    fn record(id: u64, record_type: PatientType, saved_by: &str) -> PatientRecord {
        PatientRecord {
            id,
            record_type,
            saved_by: saved_by.into(),
            first_name: "Juan".into(),
            middle_name: String::new(),
            last_name: "Reyes".into(),
            patient_age: "40".into(),
            sex: Some(Sex::M),
            patient_address: String::new(),
            civil_status: String::new(),
            department: String::new(),
            walk_in_date: String::new(),
            chief_complaint: "Cough".into(),
            other_chief_complaint: String::new(),
            history: String::new(),
            medication1: String::new(),
            other_medication: String::new(),
            medication2: String::new(),
            timestamp: String::new(),
        }
    }

    #[test]
    fn missing_file_lists_empty() {
        let store = temp_store("missing");
        assert!(store.list(&RecordFilter::all()).unwrap().is_empty());
    }

    #[test]
    fn list_filters_by_type_preserving_order() {
        let store = temp_store("by_type");
        store.insert(record(1, PatientType::Guest, "u1")).unwrap();
        store.insert(record(2, PatientType::Employee, "u1")).unwrap();
        store.insert(record(3, PatientType::Guest, "u2")).unwrap();

        let guests = store
            .list(&RecordFilter::all().of_type(PatientType::Guest))
            .unwrap();
        assert_eq!(
            guests.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 3]
        );

        // Type and owner combined narrows to the session user's records.
        let mine = store
            .list(
                &RecordFilter::all()
                    .of_type(PatientType::Guest)
                    .saved_by("u1"),
            )
            .unwrap();
        assert_eq!(mine.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn delete_by_id_removes_at_most_one() {
        let store = temp_store("delete_one");
        store.insert(record(1, PatientType::Guest, "u1")).unwrap();
        store.insert(record(2, PatientType::Guest, "u1")).unwrap();

        assert!(store.delete_by_id(1).unwrap());
        assert_eq!(store.list(&RecordFilter::all()).unwrap().len(), 1);

        // Absent id is a no-op.
        assert!(!store.delete_by_id(99).unwrap());
        assert_eq!(store.list(&RecordFilter::all()).unwrap().len(), 1);
    }

    #[test]
    fn delete_where_scopes_to_filter() {
        let store = temp_store("delete_where");
        store.insert(record(1, PatientType::Guest, "u1")).unwrap();
        store.insert(record(2, PatientType::Guest, "u2")).unwrap();
        store.insert(record(3, PatientType::Employee, "u1")).unwrap();

        let removed = store
            .delete_where(
                &RecordFilter::all()
                    .of_type(PatientType::Guest)
                    .saved_by("u1"),
            )
            .unwrap();
        assert_eq!(removed, 1);

        let remaining = store.list(&RecordFilter::all()).unwrap();
        assert_eq!(
            remaining.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![2, 3]
        );

        // Empty filter clears the store.
        assert_eq!(store.delete_where(&RecordFilter::all()).unwrap(), 2);
        assert!(store.list(&RecordFilter::all()).unwrap().is_empty());
    }

    #[test]
    fn name_query_is_case_insensitive_substring() {
        let store = temp_store("name_query");
        let mut r = record(1, PatientType::Guest, "u1");
        r.first_name = "Maria".into();
        r.middle_name = "Luisa".into();
        r.last_name = "Santos".into();
        store.insert(r).unwrap();
        store.insert(record(2, PatientType::Guest, "u1")).unwrap();

        let hits = store
            .list(&RecordFilter::all().name_contains("a luisa s"))
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        let hits = store
            .list(&RecordFilter::all().name_contains("SANTOS"))
            .unwrap();
        assert_eq!(hits.len(), 1);

        assert!(store
            .list(&RecordFilter::all().name_contains("nobody"))
            .unwrap()
            .is_empty());
    }
}
