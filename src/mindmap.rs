use crate::api::types::MindmapEntry;
use crate::core::types::Backend;
use crate::fetch::{Completed, Pending, RequestTracker};
use crate::markdown::{MarkdownRenderer, RenderedDocument};
use crate::utils::{escape_html, format_file_size};
use std::sync::Arc;

pub const LOADING_HTML: &str =
    "<div class=\"loading\"><div class=\"spinner\"></div><p>Loading mindmap...</p></div>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MindmapView {
    pub list_visible: bool,
    pub viewer_visible: bool,
    pub list_html: String,
    pub error: Option<String>,
    pub title: String,
    pub content_html: String,
}

impl Default for MindmapView {
    fn default() -> Self {
        Self {
            list_visible: true,
            viewer_visible: false,
            list_html: String::new(),
            error: None,
            title: String::new(),
            content_html: String::new(),
        }
    }
}

fn empty_state(icon: &str, heading: &str, detail: &str) -> String {
    format!(
        "<div class=\"empty-state\">\n<div class=\"icon\">{}</div>\n<h3>{}</h3>\n<p>{}</p>\n</div>",
        icon,
        heading,
        escape_html(detail)
    )
}

pub fn render_cards(entries: &[MindmapEntry]) -> String {
    if entries.is_empty() {
        return empty_state("📚", "No mindmaps", "The mindmap directory is empty");
    }
    entries
        .iter()
        .map(|m| {
            format!(
                r#"<div class="mindmap-card" data-filename="{filename}">
<h3>{name}</h3>
<div class="mindmap-meta"><span>📄 {filename}</span><span> • </span><span>{size}</span></div>
</div>"#,
                filename = escape_html(&m.filename),
                name = escape_html(&m.name),
                size = format_file_size(m.size),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Viewer title: the filename without its `.md` extension.
pub fn mindmap_title(filename: &str) -> String {
    filename.replacen(".md", "", 1)
}

/// Card list of mindmap documents plus a single-document viewer.
pub struct MindmapController {
    backend: Arc<dyn Backend>,
    renderer: MarkdownRenderer,
    list_tracker: RequestTracker,
    content_tracker: RequestTracker,
    entries: Vec<MindmapEntry>,
    opened: Option<String>,
    rendered: Option<RenderedDocument>,
    view: MindmapView,
}

impl MindmapController {
    pub fn new(backend: Arc<dyn Backend>, renderer: MarkdownRenderer) -> Self {
        Self {
            backend,
            renderer,
            list_tracker: RequestTracker::new(),
            content_tracker: RequestTracker::new(),
            entries: Vec::new(),
            opened: None,
            rendered: None,
            view: MindmapView::default(),
        }
    }

    pub fn view(&self) -> &MindmapView {
        &self.view
    }

    pub fn entries(&self) -> &[MindmapEntry] {
        &self.entries
    }

    pub fn rendered(&self) -> Option<&RenderedDocument> {
        self.rendered.as_ref()
    }

    pub fn begin_load_list(&mut self) -> Pending<Vec<MindmapEntry>> {
        let backend = Arc::clone(&self.backend);
        self.list_tracker
            .start(async move { backend.mindmaps().await })
    }

    pub fn finish_load_list(&mut self, completed: Completed<Vec<MindmapEntry>>) {
        match self.list_tracker.accept(completed) {
            Some(Ok(entries)) => {
                self.view.error = None;
                self.view.list_html = render_cards(&entries);
                self.entries = entries;
            }
            Some(Err(e)) => {
                log::error!("Failed to load mindmaps: {}", e);
                self.view.error = Some(e.to_string());
                self.view.list_html = empty_state("❌", "Failed to load", &e.to_string());
            }
            None => {}
        }
    }

    pub async fn load_list(&mut self) {
        let pending = self.begin_load_list();
        let completed = pending.resolve().await;
        self.finish_load_list(completed);
    }

    pub fn begin_open(&mut self, filename: &str) -> Pending<String> {
        self.view.list_visible = false;
        self.view.viewer_visible = true;
        self.view.title = "Loading...".to_string();
        self.view.error = None;
        self.view.content_html = LOADING_HTML.to_string();
        self.opened = Some(filename.to_string());

        let backend = Arc::clone(&self.backend);
        let filename = filename.to_string();
        self.content_tracker
            .start(async move { backend.mindmap(&filename).await })
    }

    pub async fn finish_open(&mut self, completed: Completed<String>) {
        let Some(result) = self.content_tracker.accept(completed) else {
            return;
        };

        let rendered = match result {
            Ok(content) => self.renderer.render(&content).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match rendered {
            Ok(rendered) => {
                self.view.title = self.opened.as_deref().map(mindmap_title).unwrap_or_default();
                self.view.content_html = rendered.html.clone();
                self.rendered = Some(rendered);
            }
            Err(message) => {
                log::error!("Failed to open mindmap: {}", message);
                self.rendered = None;
                self.view.title = "Failed to load".to_string();
                self.view.error = Some(message.clone());
                self.view.content_html = empty_state("❌", "Unable to load mindmap", &message);
            }
        }
    }

    pub async fn open(&mut self, filename: &str) {
        let pending = self.begin_open(filename);
        let completed = pending.resolve().await;
        self.finish_open(completed).await;
    }

    pub fn back_to_list(&mut self) {
        self.content_tracker.cancel();
        self.view.viewer_visible = false;
        self.view.list_visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards() {
        let entries = vec![MindmapEntry {
            name: "Cement".to_string(),
            filename: "cement.md".to_string(),
            size: 500,
        }];
        let html = render_cards(&entries);
        assert!(html.contains("<h3>Cement</h3>"));
        assert!(html.contains("500 B"));
        assert!(html.contains("data-filename=\"cement.md\""));
    }

    #[test]
    fn test_empty_cards() {
        assert!(render_cards(&[]).contains("No mindmaps"));
    }

    #[test]
    fn test_title_strips_extension() {
        assert_eq!(mindmap_title("industry.md"), "industry");
        assert_eq!(mindmap_title("notes"), "notes");
    }
}
