//! JSON backup and restore of a whole namespace.
//!
//! The backup format is a JSON array of [`StoredFile`] records.

use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::store::{DocumentStore, Namespace, StoredFile};
use chrono::NaiveDate;
use serde::Deserialize;

/// Import record; every field may be missing in hand-edited backups.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportRecord {
    pub id: String,
    pub name: String,
    pub content: String,
}

/// Suggested file name for a backup taken on `date`.
#[must_use]
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("veil-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Load every file of `namespace`, most recently updated first.
///
/// Files that vanish or fail to load between listing and loading are
/// skipped with a warning.
pub fn export_files<S>(store: &S, namespace: &Namespace) -> Result<Vec<StoredFile>>
where
    S: DocumentStore + ?Sized,
{
    let mut files = Vec::new();
    for item in store.list(namespace)? {
        match store.load(namespace, &item.id) {
            Ok(Some(file)) => files.push(file),
            Ok(None) => {}
            Err(e) => emit_log(
                LogLevel::Warn,
                &format!("export: skipping {}: {e}", item.id),
            ),
        }
    }
    Ok(files)
}

/// Export `namespace` as a pretty-printed JSON array.
pub fn export_json<S>(store: &S, namespace: &Namespace) -> Result<String>
where
    S: DocumentStore + ?Sized,
{
    Ok(serde_json::to_string_pretty(&export_files(store, namespace)?)?)
}

/// Parse a backup payload without touching any store.
pub fn parse_records(json: &str) -> Result<Vec<ImportRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Store parsed `records` in `namespace`.
///
/// Records missing an id, name or content, and records whose id already
/// exists in the namespace, are skipped. Imported files get fresh
/// timestamps. Returns the number of files added; fails only when the
/// namespace cannot be listed.
pub fn import_records<S>(
    store: &mut S,
    namespace: &Namespace,
    records: Vec<ImportRecord>,
) -> Result<usize>
where
    S: DocumentStore + ?Sized,
{
    let mut existing: std::collections::HashSet<String> = store
        .list(namespace)?
        .into_iter()
        .map(|item| item.id)
        .collect();

    let mut added = 0;
    for record in records {
        if record.id.is_empty() || record.name.is_empty() || record.content.is_empty() {
            continue;
        }
        if existing.contains(&record.id) {
            continue;
        }
        match store.save(namespace, &record.id, &record.name, &record.content, None) {
            Ok(()) => {
                added += 1;
                existing.insert(record.id);
            }
            Err(e) => emit_log(
                LogLevel::Warn,
                &format!("import: skipping {}: {e}", record.id),
            ),
        }
    }
    Ok(added)
}

/// Import a JSON array of file records into `namespace`.
///
/// See [`import_records`] for which records are skipped.
pub fn import_json<S>(store: &mut S, namespace: &Namespace, json: &str) -> Result<usize>
where
    S: DocumentStore + ?Sized,
{
    import_records(store, namespace, parse_records(json)?)
}
