// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory of JSON files, one per record.
//!
//! Mutations hold an exclusive lock on `<dir>/.lock` so the daemon and the
//! CLI can share a directory without losing compare-and-swap semantics.

use crate::atomic::{rotate_bak_path, write_json};
use crate::store::{check_name, initial, successor, RecordStore, StoreError};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use wsp_core::{RequestId, WorkspaceRequest};

const LOCK_FILE: &str = ".lock";

#[derive(Debug, Clone)]
pub struct FileRecordStore {
    dir: Arc<PathBuf>,
}

/// Held for the duration of a mutation; the lock is released on drop.
struct DirLock(File);

impl Drop for DirLock {
    fn drop(&mut self) {
        let _ = self.0.unlock();
    }
}

impl FileRecordStore {
    /// Open (creating if needed) the record directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir: Arc::new(dir) })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `name`.
    pub fn path_for(&self, name: &RequestId) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    fn lock(&self) -> Result<DirLock, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.dir.join(LOCK_FILE))?;
        file.lock_exclusive()?;
        Ok(DirLock(file))
    }

    /// Read one record file.
    ///
    /// Returns `Ok(None)` if the file doesn't exist or is corrupt. Corrupt
    /// files are moved to a `.bak` so they stop shadowing the name.
    fn load(&self, path: &Path) -> Result<Option<WorkspaceRequest>, StoreError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                let bak_path = rotate_bak_path(path);
                warn!(
                    error = %e,
                    path = %path.display(),
                    bak = %bak_path.display(),
                    "corrupt record, moving to .bak",
                );
                fs::rename(path, &bak_path)?;
                Ok(None)
            }
        }
    }

    fn save(&self, record: &WorkspaceRequest) -> Result<(), StoreError> {
        let value = serde_json::to_value(record)?;
        write_json(&self.path_for(record.name()), &value)?;
        Ok(())
    }
}

impl RecordStore for FileRecordStore {
    fn get(&self, name: &RequestId) -> Result<Option<WorkspaceRequest>, StoreError> {
        check_name(name)?;
        self.load(&self.path_for(name))
    }

    fn list(&self) -> Result<Vec<WorkspaceRequest>, StoreError> {
        let mut paths: Vec<PathBuf> = fs::read_dir(self.dir.as_path())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(record) = self.load(&path)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn create(&self, record: WorkspaceRequest) -> Result<WorkspaceRequest, StoreError> {
        check_name(record.name())?;
        let _lock = self.lock()?;

        let path = self.path_for(record.name());
        if self.load(&path)?.is_some() {
            return Err(StoreError::AlreadyExists(record.meta.name));
        }

        let record = initial(record);
        self.save(&record)?;
        Ok(record)
    }

    fn replace(&self, record: &WorkspaceRequest) -> Result<WorkspaceRequest, StoreError> {
        check_name(record.name())?;
        let _lock = self.lock()?;

        let stored = self
            .load(&self.path_for(record.name()))?
            .ok_or_else(|| StoreError::NotFound(record.name().clone()))?;
        let next = successor(&stored, record)?;
        self.save(&next)?;
        Ok(next)
    }

    fn delete(&self, name: &RequestId) -> Result<(), StoreError> {
        check_name(name)?;
        let _lock = self.lock()?;

        match fs::remove_file(self.path_for(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(name.clone())),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
