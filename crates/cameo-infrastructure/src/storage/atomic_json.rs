//! Atomic JSON file operations.
//!
//! Every archive and case file is one JSON document rewritten whole on
//! each change: tmp file, fsync, atomic rename, with an exclusive lock
//! held for the span of a read-modify-write. A crash mid-write leaves the
//! previous document intact.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use cameo_core::error::{CameoError, Result};

/// A handle to one JSON document on disk.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the document.
    ///
    /// A file that does not exist, or exists but is empty, reads as
    /// `None`. Content that fails to parse is a corrupt-data error; the
    /// file is left untouched for inspection.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            CameoError::io(format!("reading {}: {e}", self.path.display()))
        })?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content).map_err(|e| {
            CameoError::corrupt_data(self.path.display().to_string(), e.to_string())
        })?;
        Ok(Some(data))
    }

    /// Writes the document atomically.
    ///
    /// Serializes to a tmp file beside the target, fsyncs, then renames
    /// over the target. The parent directory is created when missing.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    CameoError::storage_write(format!(
                        "creating {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| CameoError::Serialization {
                format: "json".to_string(),
                message: e.to_string(),
            })?;

        let tmp_path = self.temp_path()?;
        let write_result = (|| -> std::io::Result<()> {
            let mut tmp_file = File::create(&tmp_path)?;
            tmp_file.write_all(json.as_bytes())?;
            tmp_file.sync_all()?;
            drop(tmp_file);
            fs::rename(&tmp_path, &self.path)
        })();

        write_result.map_err(|e| {
            // Best effort; the stale tmp would otherwise shadow the next write.
            let _ = fs::remove_file(&tmp_path);
            CameoError::storage_write(format!("writing {}: {e}", self.path.display()))
        })
    }

    /// Read-modify-write under an exclusive lock.
    ///
    /// Loads the current document (or `default` when absent), applies `f`,
    /// and saves the result atomically. The closure's return value is
    /// passed through, so callers can report what the update produced.
    pub fn update<R, F>(&self, default: T, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> Result<R>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default);
        let out = f(&mut data)?;
        self.save(&data)?;

        Ok(out)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| CameoError::io("path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| CameoError::io("path has no file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// Exclusive lock on a storage key, released on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| CameoError::storage_write(e.to_string()))?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| CameoError::storage_write(format!("opening lock file: {e}")))?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive().map_err(|e| {
                CameoError::storage_write(format!("acquiring file lock: {e}"))
            })?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock happens when the handle closes; removing the lock file is
        // best effort.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        label: String,
        entries: Vec<u32>,
    }

    fn doc() -> Doc {
        Doc {
            label: "orders".to_string(),
            entries: vec![1, 2],
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Doc>::new(temp_dir.path().join("doc.json"));

        file.save(&doc()).unwrap();
        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded, doc());
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Doc>::new(temp_dir.path().join("absent.json"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_file_is_typed_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let file = AtomicJsonFile::<Doc>::new(path);
        let err = file.load().unwrap_err();
        assert!(matches!(err, CameoError::CorruptData { .. }));
    }

    #[test]
    fn test_update_creates_from_default_and_returns_value() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Doc>::new(temp_dir.path().join("doc.json"));

        let len = file
            .update(doc(), |d| {
                d.entries.push(3);
                Ok(d.entries.len())
            })
            .unwrap();
        assert_eq!(len, 3);

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.entries, vec![1, 2, 3]);
    }

    #[test]
    fn test_no_tmp_or_lock_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        let file = AtomicJsonFile::<Doc>::new(path.clone());

        file.update(doc(), |_| Ok(())).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".doc.json.tmp").exists());
        assert!(!temp_dir.path().join("doc.lock").exists());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/deep/doc.json");
        let file = AtomicJsonFile::<Doc>::new(path.clone());

        file.save(&doc()).unwrap();
        assert!(path.exists());
    }
}
