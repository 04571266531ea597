//! Durable snapshot storage for the workout collection.
//!
//! The persistence capability is a plain key-value contract: one
//! serialized document per key. The workout sequence is stored as a
//! single JSON array under the `"workouts"` key, written after every
//! store mutation and read once at startup. Absent or malformed data
//! hydrates as an empty collection rather than failing startup.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::types::Workout;
use crate::{Error, Result};

/// Key the workout snapshot is persisted under
pub const STORAGE_KEY: &str = "workouts";

/// Durable key-value capability consumed by the controller
pub trait SnapshotStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    /// Returns `None` when nothing has been stored under `key`
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

// ============================================================================
// Workout codec
// ============================================================================

/// Encode the ordered collection as one JSON document.
///
/// Derived metrics and the interaction counter are part of the record
/// and round-trip with it.
pub fn encode_workouts(workouts: &[Workout]) -> Result<String> {
    Ok(serde_json::to_string(workouts)?)
}

/// Decode a persisted snapshot.
///
/// Malformed data is treated as "no prior workouts": logs a warning and
/// returns an empty collection instead of propagating.
pub fn decode_workouts(raw: &str) -> Vec<Workout> {
    match serde_json::from_str::<Vec<Workout>>(raw) {
        Ok(workouts) => {
            tracing::debug!("Decoded {} workouts from snapshot", workouts.len());
            workouts
        }
        Err(e) => {
            tracing::warn!("Failed to parse workout snapshot: {}. Starting empty.", e);
            Vec::new()
        }
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// Key-value store with one `<key>.json` file per key under a data
/// directory, written atomically with advisory locking.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for JsonFileStore {
    /// Atomically replaces the value by:
    /// 1. Writing to a locked temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        let path = self.key_path(key);
        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved snapshot key {:?} to {:?}", key, path);
        Ok(())
    }

    /// Reads with a shared lock. An unreadable file is reported as
    /// absent with a warning, mirroring the malformed-data policy.
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open snapshot {:?}: {}. Treating as absent.", path, e);
                return Ok(None);
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock snapshot {:?}: {}. Treating as absent.", path, e);
            return Ok(None);
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read snapshot {:?}: {}. Treating as absent.", path, e);
            return Ok(None);
        }

        file.unlock()?;
        Ok(Some(contents))
    }

    /// Removing an absent key is a no-op
    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
            tracing::debug!("Removed snapshot key {:?}", key);
        }
        Ok(())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Ephemeral store for tests and map-less sessions
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
