//! Persistence of named documents.
//!
//! Documents cross the storage boundary only as [`StoredFile`] records whose
//! `content` is marker text (see [`crate::marker`]). Records live in a
//! [`Namespace`]: one per anonymous session, or one per signed-in user.
//!
//! [`DocumentStore`] is the collaborator seam. Implementations provide the
//! four primitive operations; `save`, `rename` and `migrate` are built on top
//! of them.

mod fs;
mod memory;
pub mod transfer;

pub use fs::FsStore;
pub use memory::MemoryStore;

use crate::error::{Error, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Current time as an RFC 3339 timestamp with millisecond precision.
///
/// Timestamps in this format sort lexicographically in time order.
#[must_use]
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A fresh identifier for a stored file.
#[must_use]
pub fn new_file_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Identifier of an anonymous editing session.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap an existing session id, e.g. one restored from host storage.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new id of the form `session_<unix-millis>_<random>`.
    #[must_use]
    pub fn generate() -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "session_{}_{}",
            Utc::now().timestamp_millis(),
            &random[..9]
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage partition a document belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// Documents of an anonymous session.
    Session(String),
    /// Documents of a signed-in user.
    User(String),
}

impl Namespace {
    /// Pick the user partition when a user is signed in, else the session's.
    #[must_use]
    pub fn resolve(session: &SessionId, user: Option<&str>) -> Self {
        match user {
            Some(user) if !user.is_empty() => Self::User(user.to_string()),
            _ => Self::Session(session.as_str().to_string()),
        }
    }

    /// Owner key (session id or user id).
    #[must_use]
    pub fn owner(&self) -> &str {
        match self {
            Self::Session(id) | Self::User(id) => id,
        }
    }

    /// Collection path segments, e.g. `["documents", "<session>", "files"]`.
    #[must_use]
    pub fn path(&self) -> [&str; 3] {
        match self {
            Self::Session(id) => ["documents", id.as_str(), "files"],
            Self::User(id) => ["user-documents", id.as_str(), "files"],
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path().join("/"))
    }
}

/// The persisted form of a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub id: String,
    pub name: String,
    /// Marker text produced by [`crate::marker::serialize`].
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ai_generated: Option<bool>,
}

/// Summary row for file pickers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListItem {
    pub id: String,
    pub name: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ai_generated: Option<bool>,
}

impl From<&StoredFile> for FileListItem {
    fn from(file: &StoredFile) -> Self {
        Self {
            id: file.id.clone(),
            name: file.name.clone(),
            updated_at: file.updated_at.clone(),
            is_ai_generated: file.is_ai_generated,
        }
    }
}

/// Sort list items most recently updated first, ties broken by id.
pub(crate) fn sort_by_recency(items: &mut [FileListItem]) {
    items.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Reject ids that cannot be used as a single storage key.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let bad = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);
    if bad {
        return Err(Error::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Storage of named documents partitioned by [`Namespace`].
///
/// Errors are returned to the caller; the editor converts them into a
/// `false` or a fallback value at its boundary.
pub trait DocumentStore {
    /// Load one file, `None` if absent.
    fn load(&self, namespace: &Namespace, id: &str) -> Result<Option<StoredFile>>;

    /// Write `file` under `file.id`, replacing any existing record verbatim.
    fn put(&mut self, namespace: &Namespace, file: StoredFile) -> Result<()>;

    /// Remove a file. Removing an absent file succeeds.
    fn delete(&mut self, namespace: &Namespace, id: &str) -> Result<()>;

    /// All files in the namespace, most recently updated first.
    fn list(&self, namespace: &Namespace) -> Result<Vec<FileListItem>>;

    /// Whether a file with `id` exists.
    fn contains(&self, namespace: &Namespace, id: &str) -> Result<bool> {
        Ok(self.load(namespace, id)?.is_some())
    }

    /// Create or overwrite a file, stamping `updatedAt` with the current time.
    ///
    /// An existing record keeps its `createdAt`.
    fn save(
        &mut self,
        namespace: &Namespace,
        id: &str,
        name: &str,
        content: &str,
        ai_generated: Option<bool>,
    ) -> Result<()> {
        let now = timestamp_now();
        let created_at = self
            .load(namespace, id)?
            .map_or_else(|| now.clone(), |existing| existing.created_at);
        self.put(
            namespace,
            StoredFile {
                id: id.to_string(),
                name: name.to_string(),
                content: content.to_string(),
                created_at,
                updated_at: now,
                is_ai_generated: ai_generated,
            },
        )
    }

    /// Rename a file and clear its AI-generated flag.
    ///
    /// Returns `false` when the file does not exist.
    fn rename(&mut self, namespace: &Namespace, id: &str, new_name: &str) -> Result<bool> {
        let Some(mut file) = self.load(namespace, id)? else {
            return Ok(false);
        };
        file.name = new_name.to_string();
        file.updated_at = timestamp_now();
        file.is_ai_generated = Some(false);
        self.put(namespace, file)?;
        Ok(true)
    }

    /// Copy every file of `source` into `dest`, skipping ids already present
    /// there. Returns the number of files copied.
    fn migrate(&mut self, source: &Namespace, dest: &Namespace) -> Result<usize> {
        let mut copied = 0;
        for item in self.list(source)? {
            if self.contains(dest, &item.id)? {
                continue;
            }
            if let Some(file) = self.load(source, &item.id)? {
                self.put(dest, file)?;
                copied += 1;
            }
        }
        Ok(copied)
    }
}
