//! Markdown document browser: file directory, document view and shortcuts.

pub mod directory;
pub mod document;
pub mod shortcuts;

pub use directory::{DirectoryController, DirectoryView, ListState};
pub use document::{DocumentController, DocumentView, LinkAction, ScrollPosition};
pub use shortcuts::{KeyChord, Shortcut};

use crate::core::types::Backend;
use crate::markdown::MarkdownRenderer;
use std::sync::Arc;

/// Directory and document views wired together.
pub struct MarkdownBrowser {
    pub directory: DirectoryController,
    pub document: DocumentController,
    search_focused: bool,
}

impl MarkdownBrowser {
    pub fn new(backend: Arc<dyn Backend>, renderer: MarkdownRenderer) -> Self {
        Self {
            directory: DirectoryController::new(Arc::clone(&backend)),
            document: DocumentController::new(backend, renderer),
            search_focused: false,
        }
    }

    pub async fn init(&mut self) {
        self.directory.load().await;
    }

    pub fn filter(&mut self, keyword: &str) {
        self.directory.filter(keyword);
    }

    /// Opens a listed file and marks it as the active entry.
    pub async fn select(&mut self, path: &str) {
        self.directory.mark_active(path);
        self.document.open(path).await;
    }

    pub fn search_focused(&self) -> bool {
        self.search_focused
    }

    /// Returns `true` when the chord was handled and its default suppressed.
    pub fn handle_key(&mut self, chord: KeyChord) -> bool {
        match Shortcut::from_chord(&chord) {
            Some(Shortcut::FocusSearch) => {
                self.search_focused = true;
                true
            }
            Some(Shortcut::ToggleToc) => {
                self.document.toggle_toc();
                true
            }
            None => false,
        }
    }
}
