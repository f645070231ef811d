//! The editor service: sole owner of the current document.
//!
//! [`Editor`] holds the one mutable [`Document`] together with the file it
//! was loaded from, the cached file list and the view flags. All mutation goes
//! through `&mut self`, so hide/reveal operations apply one at a time in the
//! order they are issued.
//!
//! Collaborator failures never escape: store errors become `false` (or an
//! empty list) and are reported through [`emit_log`]; title failures become
//! the configured default title. In-memory state is not rolled back when a
//! store call fails.

use crate::config::EditorOptions;
use crate::doc::{Document, LineId, SegmentId};
use crate::error::Result;
use crate::event::{DocumentEvent, LogLevel, emit_event, emit_log};
use crate::marker;
use crate::store::{
    DocumentStore, FileListItem, Namespace, SessionId, new_file_id, transfer,
};
use crate::title::{TitleSuggester, suggest_or_default};
use std::ops::Range;

fn log_failure(action: &str, e: &dyn std::fmt::Display) {
    emit_log(LogLevel::Error, &format!("{action} failed: {e}"));
}

/// Editing session over a [`DocumentStore`] and a [`TitleSuggester`].
#[derive(Debug)]
pub struct Editor<S, T> {
    store: S,
    titles: T,
    options: EditorOptions,
    session: SessionId,
    namespace: Namespace,
    document: Option<Document>,
    current_file_id: Option<String>,
    file_list: Vec<FileListItem>,
    edit_mode: bool,
    show_all_hidden: bool,
}

impl<S, T> Editor<S, T>
where
    S: DocumentStore,
    T: TitleSuggester,
{
    /// Create an editor for an anonymous session.
    #[must_use]
    pub fn new(store: S, titles: T, session: SessionId) -> Self {
        Self::with_options(store, titles, session, EditorOptions::default())
    }

    /// Create an editor with explicit options.
    #[must_use]
    pub fn with_options(store: S, titles: T, session: SessionId, options: EditorOptions) -> Self {
        let namespace = Namespace::resolve(&session, None);
        Self {
            store,
            titles,
            options,
            session,
            namespace,
            document: None,
            current_file_id: None,
            file_list: Vec::new(),
            edit_mode: false,
            show_all_hidden: false,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    #[must_use]
    pub fn current_file_id(&self) -> Option<&str> {
        self.current_file_id.as_deref()
    }

    /// File list as of the last refresh.
    #[must_use]
    pub fn file_list(&self) -> &[FileListItem] {
        &self.file_list
    }

    #[must_use]
    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Whether the view should show hidden segments.
    #[must_use]
    pub fn show_all_hidden(&self) -> bool {
        self.show_all_hidden
    }

    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    #[must_use]
    pub fn session(&self) -> &SessionId {
        &self.session
    }

    #[must_use]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // ------------------------------------------------------------------
    // Document mutation
    // ------------------------------------------------------------------

    fn replace_document(&mut self, document: Document) {
        emit_event(&DocumentEvent::Loaded {
            lines: document.line_count(),
        });
        self.document = Some(document);
    }

    /// Replace the current document with pasted plain text.
    pub fn handle_paste(&mut self, text: &str) {
        self.replace_document(marker::parse_plain(text));
    }

    /// Flip the hidden flag of a word segment.
    pub fn toggle_segment(&mut self, line_id: LineId, segment_id: SegmentId) -> bool {
        let Some(doc) = self.document.as_mut() else {
            return false;
        };
        if !doc.toggle_segment(line_id, segment_id) {
            return false;
        }
        let hidden = doc
            .line(line_id)
            .and_then(|line| line.segment(segment_id))
            .is_some_and(|s| s.hidden);
        emit_event(&DocumentEvent::Toggled {
            segment: segment_id.get(),
            hidden,
        });
        true
    }

    /// Hide a selection within one segment.
    pub fn hide_selection(
        &mut self,
        line_id: LineId,
        segment_id: SegmentId,
        range: Range<usize>,
    ) -> bool {
        let changed = self
            .document
            .as_mut()
            .is_some_and(|doc| doc.hide_selection(line_id, segment_id, range));
        if changed {
            self.emit_hidden(line_id);
        }
        changed
    }

    /// Hide a selection spanning several segments of one line.
    pub fn hide_multi_segment_selection(
        &mut self,
        line_id: LineId,
        start_id: SegmentId,
        start_offset: usize,
        end_id: SegmentId,
        end_offset: usize,
    ) -> bool {
        let changed = self.document.as_mut().is_some_and(|doc| {
            doc.hide_multi_segment_selection(line_id, start_id, start_offset, end_id, end_offset)
        });
        if changed {
            self.emit_hidden(line_id);
        }
        changed
    }

    fn emit_hidden(&self, line_id: LineId) {
        if let Some(line) = self.document.as_ref().and_then(|d| d.line(line_id)) {
            emit_event(&DocumentEvent::Hidden {
                line: line_id.get(),
                segments: line.segments.len(),
            });
        }
    }

    /// Reveal every hidden segment of the current document.
    pub fn reveal_all(&mut self) -> usize {
        let count = self.document.as_mut().map_or(0, Document::reveal_all);
        if count > 0 {
            emit_event(&DocumentEvent::RevealedAll { count });
        }
        count
    }

    /// Flip whether the view shows hidden segments.
    pub fn toggle_show_all_hidden(&mut self) {
        self.show_all_hidden = !self.show_all_hidden;
    }

    /// Drop the current document and forget its file.
    pub fn clear_document(&mut self) {
        self.document = None;
        self.current_file_id = None;
    }

    /// Start a new, unsaved document.
    pub fn create_new_file(&mut self) {
        self.clear_document();
    }

    /// Enter raw marker-text editing.
    pub fn enter_edit_mode(&mut self) {
        self.edit_mode = true;
    }

    /// Leave raw editing, replacing the current document with `text` parsed
    /// as marker text. Without a current document only the mode changes.
    pub fn exit_edit_mode(&mut self, text: &str) {
        if self.document.is_some() {
            self.replace_document(marker::parse(text));
        }
        self.edit_mode = false;
    }

    /// The current document as marker text, empty when there is none.
    #[must_use]
    pub fn marker_text(&self) -> String {
        self.document
            .as_ref()
            .map(marker::serialize)
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Reload the file list; a failing store yields an empty list.
    pub fn refresh_file_list(&mut self) {
        self.file_list = self.store.list(&self.namespace).unwrap_or_else(|e| {
            log_failure("listing files", &e);
            Vec::new()
        });
    }

    /// Load a stored file as the current document.
    pub fn select_file(&mut self, file_id: &str) -> bool {
        match self.store.load(&self.namespace, file_id) {
            Ok(Some(file)) => {
                self.replace_document(marker::parse(&file.content));
                self.current_file_id = Some(file_id.to_string());
                true
            }
            Ok(None) => false,
            Err(e) => {
                log_failure(&format!("loading {file_id}"), &e);
                false
            }
        }
    }

    /// Refresh the file list and open the most recent file, if any.
    pub fn load_session_document(&mut self) {
        self.refresh_file_list();
        self.select_first();
    }

    fn select_first(&mut self) {
        if let Some(id) = self.file_list.first().map(|item| item.id.clone()) {
            self.select_file(&id);
        }
    }

    /// Save the current document.
    ///
    /// The first save of a document gets a suggested title and is flagged as
    /// AI generated; later saves keep the stored name and flag. Returns
    /// `false` when there is no document or the store fails.
    pub fn save(&mut self) -> bool {
        let Some(content) = self.document.as_ref().map(marker::serialize) else {
            return false;
        };
        let file_id = self.current_file_id.clone().unwrap_or_else(new_file_id);

        let existing = match self.current_file_id.as_deref() {
            Some(id) => self.store.load(&self.namespace, id).unwrap_or_else(|e| {
                log_failure(&format!("loading {id}"), &e);
                None
            }),
            None => None,
        };

        let (name, ai_generated) = match existing {
            Some(file) => (file.name, file.is_ai_generated.unwrap_or(false)),
            None => (
                suggest_or_default(
                    &self.titles,
                    &content,
                    self.options.title_sample_len,
                    &self.options.default_title,
                ),
                true,
            ),
        };

        match self
            .store
            .save(&self.namespace, &file_id, &name, &content, Some(ai_generated))
        {
            Ok(()) => {
                emit_event(&DocumentEvent::Saved {
                    file_id: file_id.clone(),
                });
                self.current_file_id = Some(file_id);
                self.refresh_file_list();
                true
            }
            Err(e) => {
                log_failure(&format!("saving {file_id}"), &e);
                false
            }
        }
    }

    /// Delete a stored file.
    ///
    /// Deleting the current file clears the document and, unless disabled in
    /// the options, opens the most recent remaining file.
    pub fn delete_file(&mut self, file_id: &str) -> bool {
        if let Err(e) = self.store.delete(&self.namespace, file_id) {
            log_failure(&format!("deleting {file_id}"), &e);
            return false;
        }
        emit_event(&DocumentEvent::Deleted {
            file_id: file_id.to_string(),
        });

        if self.current_file_id.as_deref() == Some(file_id) {
            self.clear_document();
        }
        self.refresh_file_list();
        if self.options.reselect_after_delete && self.current_file_id.is_none() {
            self.select_first();
        }
        true
    }

    /// Rename a stored file. Clears its AI-generated flag.
    pub fn rename_file(&mut self, file_id: &str, new_name: &str) -> bool {
        match self.store.rename(&self.namespace, file_id, new_name) {
            Ok(true) => {
                self.refresh_file_list();
                true
            }
            Ok(false) => false,
            Err(e) => {
                log_failure(&format!("renaming {file_id}"), &e);
                false
            }
        }
    }

    /// Export every file in the active namespace as a JSON array.
    ///
    /// A failing store yields `"[]"`.
    #[must_use]
    pub fn export_all(&self) -> String {
        transfer::export_json(&self.store, &self.namespace).unwrap_or_else(|e| {
            log_failure("exporting", &e);
            "[]".to_string()
        })
    }

    /// Import a JSON array of file records, then open the most recent file.
    ///
    /// Returns the number of files added. A failing store adds nothing and
    /// yields `Ok(0)`.
    ///
    /// # Errors
    ///
    /// Returns an error when `json` is not an array of records.
    pub fn import_all(&mut self, json: &str) -> Result<usize> {
        let records = transfer::parse_records(json)?;
        let count = match transfer::import_records(&mut self.store, &self.namespace, records) {
            Ok(count) => count,
            Err(e) => {
                log_failure("importing", &e);
                return Ok(0);
            }
        };
        emit_event(&DocumentEvent::Imported { count });
        self.refresh_file_list();
        self.select_first();
        Ok(count)
    }

    /// Switch to a signed-in user's namespace, first copying the session's
    /// files there. Returns the number of files copied.
    pub fn sign_in(&mut self, user_id: &str) -> usize {
        let target = Namespace::resolve(&self.session, Some(user_id));
        if target == self.namespace {
            return 0;
        }
        let copied = self
            .store
            .migrate(&self.namespace, &target)
            .unwrap_or_else(|e| {
                log_failure("migrating session files", &e);
                0
            });
        self.namespace = target;
        self.clear_document();
        self.load_session_document();
        copied
    }

    /// Return to the anonymous session's namespace.
    pub fn sign_out(&mut self) {
        self.namespace = Namespace::resolve(&self.session, None);
        self.clear_document();
        self.load_session_document();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::{MemoryStore, StoredFile};
    use crate::title::LeadingWords;

    type TestEditor = Editor<MemoryStore, LeadingWords>;

    fn editor() -> TestEditor {
        Editor::new(MemoryStore::new(), LeadingWords::default(), SessionId::new("s1"))
    }

    fn first_line(ed: &TestEditor) -> LineId {
        ed.document().unwrap().lines[0].id
    }

    #[test]
    fn test_paste_and_hide() {
        let mut ed = editor();
        ed.handle_paste("hello world");
        let line = first_line(&ed);
        let seg = ed.document().unwrap().lines[0].segments[0].id;
        // One segment per run: "hello" is index 0.
        assert!(ed.hide_selection(line, seg, 0..2));
        assert_eq!(ed.marker_text(), "{{hello}} world");
    }

    #[test]
    fn test_paste_does_not_interpret_markers() {
        let mut ed = editor();
        ed.handle_paste("a {{b}}");
        assert_eq!(ed.document().unwrap().hidden_count(), 0);
    }

    #[test]
    fn test_operations_without_document_are_noops() {
        let mut ed = editor();
        assert!(!ed.toggle_segment(LineId::fresh(), SegmentId::fresh()));
        assert!(!ed.hide_selection(LineId::fresh(), SegmentId::fresh(), 0..1));
        assert_eq!(ed.reveal_all(), 0);
        assert!(!ed.save());
        assert_eq!(ed.marker_text(), "");
    }

    #[test]
    fn test_multi_segment_and_toggle() {
        let mut ed = editor();
        ed.handle_paste("one two three");
        let line = first_line(&ed);
        let segs: Vec<_> = ed.document().unwrap().lines[0]
            .segments
            .iter()
            .map(|s| s.id)
            .collect();
        assert!(ed.hide_multi_segment_selection(line, segs[4], 2, segs[2], 1));
        assert_eq!(ed.marker_text(), "one {{two}} {{three}}");

        let two = ed.document().unwrap().lines[0].segments[2].id;
        assert!(ed.toggle_segment(line, two));
        assert_eq!(ed.marker_text(), "one two {{three}}");
        assert_eq!(ed.reveal_all(), 1);
        assert_eq!(ed.marker_text(), "one two three");
    }

    #[test]
    fn test_edit_mode_round_trip() {
        let mut ed = editor();
        ed.exit_edit_mode("ignored {{x}}");
        assert!(ed.document().is_none());

        ed.handle_paste("draft");
        ed.enter_edit_mode();
        assert!(ed.is_edit_mode());
        ed.exit_edit_mode("final {{answer}}");
        assert!(!ed.is_edit_mode());
        assert_eq!(ed.marker_text(), "final {{answer}}");
        assert_eq!(ed.document().unwrap().hidden_count(), 1);
    }

    #[test]
    fn test_first_save_generates_title() {
        let mut ed = editor();
        ed.handle_paste("Mitochondria facts\nmore");
        assert!(ed.save());
        let id = ed.current_file_id().unwrap().to_string();
        let stored = ed.store().load(ed.namespace(), &id).unwrap().unwrap();
        assert_eq!(stored.name, "Mitochondr");
        assert_eq!(stored.is_ai_generated, Some(true));
        assert_eq!(stored.content, "Mitochondria facts\nmore");
        assert_eq!(ed.file_list().len(), 1);
    }

    #[test]
    fn test_resave_keeps_title() {
        let mut ed = editor();
        ed.handle_paste("first words");
        assert!(ed.save());
        let id = ed.current_file_id().unwrap().to_string();
        assert!(ed.rename_file(&id, "My notes"));

        let line = first_line(&ed);
        let seg = ed.document().unwrap().lines[0].segments[2].id;
        assert!(ed.hide_selection(line, seg, 0..0));
        assert!(ed.save());

        let stored = ed.store().load(ed.namespace(), &id).unwrap().unwrap();
        assert_eq!(stored.name, "My notes");
        assert_eq!(stored.is_ai_generated, Some(false));
        assert_eq!(stored.content, "first {{words}}");
        assert_eq!(ed.current_file_id(), Some(id.as_str()));
    }

    #[test]
    fn test_title_failure_uses_default() {
        let failing = |_: &str| -> Result<String> { Err(Error::Title("offline".into())) };
        let opts = EditorOptions::default().with_default_title("Untitled");
        let mut ed = Editor::with_options(MemoryStore::new(), failing, SessionId::new("s1"), opts);
        ed.handle_paste("text");
        assert!(ed.save());
        assert_eq!(ed.file_list()[0].name, "Untitled");
    }

    #[test]
    fn test_select_and_delete_current() {
        let mut store = MemoryStore::new();
        let ns = Namespace::Session("s1".into());
        for (id, at) in [("old", "2024-01-01T00:00:00.000Z"), ("new", "2024-02-01T00:00:00.000Z")] {
            store
                .put(
                    &ns,
                    StoredFile {
                        id: id.into(),
                        name: id.into(),
                        content: format!("{id} {{{{text}}}}"),
                        created_at: at.into(),
                        updated_at: at.into(),
                        is_ai_generated: None,
                    },
                )
                .unwrap();
        }
        let mut ed = Editor::new(store, LeadingWords::default(), SessionId::new("s1"));
        ed.load_session_document();
        assert_eq!(ed.current_file_id(), Some("new"));
        assert_eq!(ed.marker_text(), "new {{text}}");

        assert!(ed.delete_file("new"));
        assert_eq!(ed.current_file_id(), Some("old"));
        assert_eq!(ed.marker_text(), "old {{text}}");
        assert_eq!(ed.file_list().len(), 1);
    }

    #[test]
    fn test_select_missing_file() {
        let mut ed = editor();
        assert!(!ed.select_file("missing"));
        assert!(ed.document().is_none());
    }

    #[test]
    fn test_rename_missing_file() {
        let mut ed = editor();
        assert!(!ed.rename_file("missing", "x"));
    }

    #[test]
    fn test_export_import() {
        let mut ed = editor();
        ed.handle_paste("alpha {{beta}}");
        assert!(ed.save());
        let json = ed.export_all();

        let mut other = Editor::new(MemoryStore::new(), LeadingWords::default(), SessionId::new("s2"));
        assert_eq!(other.import_all(&json).unwrap(), 1);
        // Pasted braces become real markers once the file is reloaded.
        assert_eq!(other.marker_text(), "alpha {{beta}}");
        assert_eq!(other.document().unwrap().hidden_count(), 1);
        assert_eq!(other.import_all(&json).unwrap(), 0);
        assert!(other.import_all("not json").is_err());
    }

    /// Memory store whose listing is unreachable.
    struct UnlistableStore(MemoryStore);

    impl DocumentStore for UnlistableStore {
        fn load(&self, namespace: &Namespace, id: &str) -> Result<Option<StoredFile>> {
            self.0.load(namespace, id)
        }

        fn put(&mut self, namespace: &Namespace, file: StoredFile) -> Result<()> {
            self.0.put(namespace, file)
        }

        fn delete(&mut self, namespace: &Namespace, id: &str) -> Result<()> {
            self.0.delete(namespace, id)
        }

        fn list(&self, _: &Namespace) -> Result<Vec<FileListItem>> {
            Err(Error::Io(std::io::Error::other("offline")))
        }
    }

    #[test]
    fn test_import_with_failing_store_adds_nothing() {
        let mut ed = Editor::new(
            UnlistableStore(MemoryStore::new()),
            LeadingWords::default(),
            SessionId::new("s1"),
        );
        let json = r#"[{"id": "a", "name": "n", "content": "c"}]"#;
        assert_eq!(ed.import_all(json).unwrap(), 0);
        assert!(ed.store().0.is_empty(ed.namespace()));
        assert!(ed.document().is_none());

        // Malformed input is still the caller's error.
        assert!(matches!(ed.import_all("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_sign_in_migrates_session_files() {
        let mut ed = editor();
        ed.handle_paste("session doc");
        assert!(ed.save());
        assert_eq!(ed.sign_in("bob"), 1);
        assert_eq!(ed.namespace(), &Namespace::User("bob".into()));
        assert_eq!(ed.file_list().len(), 1);
        assert_eq!(ed.marker_text(), "session doc");
        assert_eq!(ed.sign_in("bob"), 0);

        ed.sign_out();
        assert_eq!(ed.namespace(), &Namespace::Session("s1".into()));
    }

    #[test]
    fn test_toggle_show_all_hidden() {
        let mut ed = editor();
        assert!(!ed.show_all_hidden());
        ed.toggle_show_all_hidden();
        assert!(ed.show_all_hidden());
    }
}
