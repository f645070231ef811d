//! Editor configuration.

/// Options controlling the [`Editor`](crate::editor::Editor).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorOptions {
    /// Title used when the title suggester fails or returns nothing.
    pub default_title: String,
    /// Grapheme clusters of plain text sent to the title suggester.
    pub title_sample_len: usize,
    /// Select the most recent file after deleting the current one.
    pub reselect_after_delete: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            default_title: "New document".to_string(),
            title_sample_len: 500,
            reselect_after_delete: true,
        }
    }
}

impl EditorOptions {
    /// Set the fallback title.
    #[must_use]
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Set how much text the title suggester sees.
    #[must_use]
    pub fn with_title_sample_len(mut self, len: usize) -> Self {
        self.title_sample_len = len;
        self
    }

    /// Enable or disable automatic reselection after deleting the current file.
    #[must_use]
    pub fn with_reselect_after_delete(mut self, enabled: bool) -> Self {
        self.reselect_after_delete = enabled;
        self
    }
}
