use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::state::Draft;
use crate::usecase::UseCase;

/// Key holding the serialized use-case collection (a JSON array).
pub const COLLECTION_KEY: &str = "usecases";

/// Key holding the in-progress autosave snapshot (a JSON object).
pub const DRAFT_KEY: &str = "autosave";

/// Minimal key-value persistence the core needs. Everything above this trait
/// treats persistence as opaque bytes.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, bytes: &[u8]) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-per-key store under the user's data directory. Writes are atomic so
/// a crash mid-save never leaves a half-written blob behind.
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Default data directory (shared with the config file).
    pub fn default_dir() -> PathBuf {
        crate::config::get_config_dir()
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Store for DirStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(bytes))
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory at {}", self.dir.display()))?;

        let path = self.path_for(key);
        let mut file = AtomicWriteFile::open(&path)
            .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
        file.write_all(bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        file.commit()
            .with_context(|| format!("Failed to save {}", path.display()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

/// Load the use-case collection. A missing key is an empty collection; a
/// corrupt blob is an error so the caller can warn and fall back.
pub fn load_collection(store: &dyn Store) -> Result<Vec<UseCase>> {
    match store.get(COLLECTION_KEY)? {
        None => Ok(Vec::new()),
        Some(bytes) => {
            serde_json::from_slice(&bytes).context("Saved use-case data is corrupt")
        }
    }
}

/// Persist the full collection, pretty-printed so the stored file doubles as
/// a readable export.
pub fn save_collection(store: &dyn Store, use_cases: &[UseCase]) -> Result<()> {
    let bytes =
        serde_json::to_vec_pretty(use_cases).context("Failed to serialize use cases")?;
    store.set(COLLECTION_KEY, &bytes)
}

/// Load the autosaved draft, if any. A corrupt snapshot is treated as absent;
/// drafts are best-effort by design.
pub fn load_draft(store: &dyn Store) -> Result<Option<Draft>> {
    match store.get(DRAFT_KEY)? {
        None => Ok(None),
        Some(bytes) => Ok(serde_json::from_slice(&bytes).ok()),
    }
}

pub fn save_draft(store: &dyn Store, draft: &Draft) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(draft).context("Failed to serialize draft")?;
    store.set(DRAFT_KEY, &bytes)
}

pub fn clear_draft(store: &dyn Store) -> Result<()> {
    store.remove(DRAFT_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn scratch_store(name: &str) -> DirStore {
        let dir = env::temp_dir().join(format!("caseboard_test_{}", name));
        let _ = fs::remove_dir_all(&dir);
        DirStore::new(dir)
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        let store = scratch_store("missing_key");
        assert!(store.get("nothing").unwrap().is_none());
    }

    #[test]
    fn test_set_get_remove_roundtrip() {
        let store = scratch_store("roundtrip");

        store.set("blob", b"{\"a\": 1}").unwrap();
        assert_eq!(store.get("blob").unwrap().unwrap(), b"{\"a\": 1}");

        store.remove("blob").unwrap();
        assert!(store.get("blob").unwrap().is_none());

        // Removing an absent key is a no-op, not an error.
        store.remove("blob").unwrap();
    }

    #[test]
    fn test_load_collection_missing_is_empty() {
        let store = scratch_store("empty_collection");
        assert!(load_collection(&store).unwrap().is_empty());
    }

    #[test]
    fn test_collection_save_and_load() {
        let store = scratch_store("collection");
        let use_cases = vec![sample_use_case("First"), sample_use_case("Second")];

        save_collection(&store, &use_cases).unwrap();
        let loaded = load_collection(&store).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].title, "First");
        assert_eq!(loaded, use_cases);
    }

    #[test]
    fn test_corrupt_collection_is_an_error() {
        let store = scratch_store("corrupt");
        store.set(COLLECTION_KEY, b"{not json").unwrap();

        let err = load_collection(&store).unwrap_err();
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn test_draft_roundtrip_and_clear() {
        let store = scratch_store("draft");
        assert!(load_draft(&store).unwrap().is_none());

        let draft = Draft {
            title: "Half-entered".to_string(),
            ..Default::default()
        };
        save_draft(&store, &draft).unwrap();
        assert_eq!(load_draft(&store).unwrap().unwrap(), draft);

        clear_draft(&store).unwrap();
        assert!(load_draft(&store).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_draft_treated_as_absent() {
        let store = scratch_store("corrupt_draft");
        store.set(DRAFT_KEY, b"][").unwrap();
        assert!(load_draft(&store).unwrap().is_none());
    }

    fn sample_use_case(title: &str) -> UseCase {
        use chrono::Utc;
        UseCase {
            id: UseCase::new_id(),
            title: title.to_string(),
            business_process: "Process".to_string(),
            pain_points: String::new(),
            opportunities: String::new(),
            pii_considerations: String::new(),
            data_availability: String::new(),
            ai_impact: String::new(),
            additional_information: String::new(),
            ratings: Default::default(),
            business_value: 0.0,
            feasibility: 2.5,
            quadrant: crate::usecase::Quadrant::IncrementalImprovements,
            created_at: Utc::now(),
            last_modified: Utc::now(),
        }
    }
}
