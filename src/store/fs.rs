//! Directory-backed document store.
//!
//! Layout: `<root>/<collection>/<owner>/files/<id>.json`, one pretty-printed
//! [`StoredFile`] per file, where `<collection>` is `documents` for sessions
//! and `user-documents` for users.

use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::store::{
    DocumentStore, FileListItem, Namespace, StoredFile, sort_by_recency, validate_key,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// A [`DocumentStore`] persisting each file as JSON under a root directory.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Use `root` as the store directory. It is created lazily on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dir(&self, namespace: &Namespace) -> Result<PathBuf> {
        validate_key(namespace.owner())?;
        Ok(namespace
            .path()
            .iter()
            .fold(self.root.clone(), |path, part| path.join(part)))
    }

    fn file_path(&self, namespace: &Namespace, id: &str) -> Result<PathBuf> {
        validate_key(id)?;
        Ok(self.dir(namespace)?.join(format!("{id}.{EXTENSION}")))
    }
}

fn read_file(path: &Path) -> Result<Option<StoredFile>> {
    match fs::read_to_string(path) {
        Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl DocumentStore for FsStore {
    fn load(&self, namespace: &Namespace, id: &str) -> Result<Option<StoredFile>> {
        read_file(&self.file_path(namespace, id)?)
    }

    fn put(&mut self, namespace: &Namespace, file: StoredFile) -> Result<()> {
        let path = self.file_path(namespace, &file.id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Readers never observe a partially written record.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&file)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&mut self, namespace: &Namespace, id: &str) -> Result<()> {
        match fs::remove_file(self.file_path(namespace, id)?) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn list(&self, namespace: &Namespace) -> Result<Vec<FileListItem>> {
        let entries = match fs::read_dir(self.dir(namespace)?) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut items = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            match read_file(&path) {
                Ok(Some(file)) => items.push(FileListItem::from(&file)),
                Ok(None) => {}
                Err(e) => emit_log(
                    LogLevel::Warn,
                    &format!("list: skipping {}: {e}", path.display()),
                ),
            }
        }
        sort_by_recency(&mut items);
        Ok(items)
    }
}
