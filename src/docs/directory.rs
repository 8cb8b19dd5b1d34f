use crate::api::types::FileEntry;
use crate::core::types::Backend;
use crate::fetch::{Completed, Pending, RequestTracker};
use crate::utils::{escape_html, format_kb};
use std::sync::Arc;

pub const LOADING_HTML: &str = "<div class=\"loading\">Loading...</div>";
pub const EMPTY_HTML: &str = "<div class=\"loading\">No Markdown files found</div>";
pub const NO_MATCH_HTML: &str = "<div class=\"loading\">No matching files</div>";
pub const FAILED_HTML: &str = "<div class=\"loading\">Failed to load, please refresh</div>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Ready,
    Empty,
    NoMatch,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryView {
    pub state: ListState,
    pub list_html: String,
    pub file_count: usize,
}

/// Case-insensitive substring match on name or path. A blank keyword keeps
/// every entry in listing order.
pub fn filter_entries<'a>(files: &'a [FileEntry], keyword: &str) -> Vec<&'a FileEntry> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return files.iter().collect();
    }
    files
        .iter()
        .filter(|f| f.name.to_lowercase().contains(&keyword) || f.path.to_lowercase().contains(&keyword))
        .collect()
}

pub fn render_entries(entries: &[&FileEntry], active: Option<&str>) -> String {
    entries
        .iter()
        .map(|file| {
            let class = if active == Some(file.path.as_str()) {
                "file-item active"
            } else {
                "file-item"
            };
            format!(
                r#"<div class="{class}" data-path="{path}">
<div class="file-item-name">{name}</div>
<div class="file-item-path">{path}</div>
<div class="file-item-size">{size}</div>
</div>"#,
                class = class,
                path = escape_html(&file.path),
                name = escape_html(&file.name),
                size = format_kb(file.size),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// File listing with keyword filtering and active-entry marking.
pub struct DirectoryController {
    backend: Arc<dyn Backend>,
    tracker: RequestTracker,
    files: Vec<FileEntry>,
    keyword: String,
    active_path: Option<String>,
    view: DirectoryView,
}

impl DirectoryController {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            tracker: RequestTracker::new(),
            files: Vec::new(),
            keyword: String::new(),
            active_path: None,
            view: DirectoryView::default(),
        }
    }

    pub fn view(&self) -> &DirectoryView {
        &self.view
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn visible(&self) -> Vec<&FileEntry> {
        filter_entries(&self.files, &self.keyword)
    }

    pub fn active_path(&self) -> Option<&str> {
        self.active_path.as_deref()
    }

    pub fn begin_load(&mut self) -> Pending<Vec<FileEntry>> {
        self.view.state = ListState::Loading;
        self.view.list_html = LOADING_HTML.to_string();

        let backend = Arc::clone(&self.backend);
        self.tracker.start(async move { backend.markdown_files().await })
    }

    pub fn finish_load(&mut self, completed: Completed<Vec<FileEntry>>) {
        let Some(result) = self.tracker.accept(completed) else {
            return;
        };

        match result {
            Ok(files) => {
                log::debug!("Loaded {} markdown files", files.len());
                self.files = files;
                self.view.file_count = self.files.len();
                self.render();
            }
            Err(e) => {
                log::error!("Failed to load file list: {}", e);
                self.view.state = ListState::Failed;
                self.view.list_html = FAILED_HTML.to_string();
            }
        }
    }

    pub async fn load(&mut self) {
        let pending = self.begin_load();
        let completed = pending.resolve().await;
        self.finish_load(completed);
    }

    /// Re-renders the matching subset of the already loaded listing.
    pub fn filter(&mut self, keyword: &str) {
        self.keyword = keyword.to_string();
        if matches!(self.view.state, ListState::Ready | ListState::NoMatch) {
            self.render();
        }
    }

    /// Marks `path` as the only active entry.
    pub fn mark_active(&mut self, path: &str) {
        self.active_path = Some(path.to_string());
        if self.view.state == ListState::Ready {
            self.render();
        }
    }

    fn render(&mut self) {
        if self.files.is_empty() {
            self.view.state = ListState::Empty;
            self.view.list_html = EMPTY_HTML.to_string();
            return;
        }

        let visible = filter_entries(&self.files, &self.keyword);
        if visible.is_empty() {
            self.view.state = ListState::NoMatch;
            self.view.list_html = NO_MATCH_HTML.to_string();
            return;
        }

        self.view.list_html = render_entries(&visible, self.active_path.as_deref());
        self.view.state = ListState::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, path: &str) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: path.to_string(),
            size: 2048,
        }
    }

    #[test]
    fn test_blank_keyword_keeps_order() {
        let files = vec![entry("b", "z/b.md"), entry("a", "y/a.md"), entry("c", "x/c.md")];
        let all = filter_entries(&files, "   ");
        let names: Vec<&str> = all.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_filter_matches_name_or_path_case_insensitively() {
        let files = vec![
            entry("Rust Notes", "notes/rust.md"),
            entry("Budget", "Finance/2024.md"),
            entry("Misc", "misc.md"),
        ];
        let by_name: Vec<&str> = filter_entries(&files, "RUST").into_iter().map(|f| f.name.as_str()).collect();
        assert_eq!(by_name, vec!["Rust Notes"]);
        let by_path: Vec<&str> = filter_entries(&files, "finance").into_iter().map(|f| f.name.as_str()).collect();
        assert_eq!(by_path, vec!["Budget"]);
        assert!(filter_entries(&files, "nothing").is_empty());
    }

    #[test]
    fn test_render_marks_active_and_escapes() {
        let files = vec![entry("<a>", "docs/a.md"), entry("b", "docs/b.md")];
        let refs: Vec<&FileEntry> = files.iter().collect();
        let html = render_entries(&refs, Some("docs/a.md"));
        assert!(html.contains(r#"<div class="file-item active" data-path="docs/a.md">"#));
        assert!(html.contains(r#"<div class="file-item" data-path="docs/b.md">"#));
        assert!(html.contains("&lt;a&gt;"));
        assert!(html.contains("2.0 KB"));
    }
}
