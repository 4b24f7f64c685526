//! # rt-storage-local
//! rusty-tickets/crates/rt-plugins/rt-storage-local/src/lib.rs
//! Local filesystem implementation of `KeyValueStore`.
//! Features: hashed file names, directory sharding, and atomic replacement.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, error, warn};
use rt_core::error::{AppError, Result};
use rt_core::traits::KeyValueStore;
use sha2::{Digest, Sha256};

pub struct LocalKeyValueStore {
    /// Root directory for all values (e.g., "./data/store")
    root_path: PathBuf,
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> AppError {
    error!("{action} {path:?}: {e}");
    AppError::Internal(format!("couldn't {action} {}: {e}", path.display()))
}

impl LocalKeyValueStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root_path = root.into();
        fs::create_dir_all(&root_path).map_err(|e| io_error("create", &root_path, e))?;

        debug!("local store at {root_path:?}");
        Ok(Self { root_path })
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Generates a sharded path: "ab/abcdef...hash.json"
    fn get_sharded_path(&self, key: &str) -> PathBuf {
        let hash = hex::encode(Sha256::digest(key.as_bytes()));

        let mut path = self.root_path.clone();
        path.push(&hash[0..2]);
        path.push(format!("{hash}.json"));
        path
    }
}

impl KeyValueStore for LocalKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.get_sharded_path(key);

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!("ignoring non-UTF-8 value under \"{key}\" at {path:?}: {e}");
                Ok(None)
            }
            Err(e) => Err(io_error("read", &path, e)),
        }
    }

    /// Writes next to the target and renames over it, so readers see either
    /// the old value or the new one.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let target_path = self.get_sharded_path(key);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error("create", parent, e))?;
        }

        let tmp_path = target_path.with_extension("json.tmp");
        fs::write(&tmp_path, value).map_err(|e| io_error("write", &tmp_path, e))?;
        fs::rename(&tmp_path, &target_path).map_err(|e| io_error("replace", &target_path, e))?;

        debug!("stored {} bytes under \"{key}\"", value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.get_sharded_path(key);

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("remove", &path, e)),
        }
    }
}
