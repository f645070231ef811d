//! In-process document store.

use crate::error::Result;
use crate::store::{
    DocumentStore, FileListItem, Namespace, StoredFile, sort_by_recency, validate_key,
};
use std::collections::BTreeMap;

/// A [`DocumentStore`] kept entirely in memory.
///
/// Useful for tests and for hosts that persist the exported JSON themselves.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    files: BTreeMap<Namespace, BTreeMap<String, StoredFile>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files in `namespace`.
    #[must_use]
    pub fn len(&self, namespace: &Namespace) -> usize {
        self.files.get(namespace).map_or(0, BTreeMap::len)
    }

    /// Check if `namespace` holds no files.
    #[must_use]
    pub fn is_empty(&self, namespace: &Namespace) -> bool {
        self.len(namespace) == 0
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, namespace: &Namespace, id: &str) -> Result<Option<StoredFile>> {
        Ok(self
            .files
            .get(namespace)
            .and_then(|files| files.get(id))
            .cloned())
    }

    fn put(&mut self, namespace: &Namespace, file: StoredFile) -> Result<()> {
        validate_key(&file.id)?;
        self.files
            .entry(namespace.clone())
            .or_default()
            .insert(file.id.clone(), file);
        Ok(())
    }

    fn delete(&mut self, namespace: &Namespace, id: &str) -> Result<()> {
        if let Some(files) = self.files.get_mut(namespace) {
            files.remove(id);
        }
        Ok(())
    }

    fn list(&self, namespace: &Namespace) -> Result<Vec<FileListItem>> {
        let mut items: Vec<FileListItem> = self
            .files
            .get(namespace)
            .map(|files| files.values().map(FileListItem::from).collect())
            .unwrap_or_default();
        sort_by_recency(&mut items);
        Ok(items)
    }
}
