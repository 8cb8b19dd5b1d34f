use crate::api::types::DocumentRecord;
use crate::core::types::Backend;
use crate::fetch::{Completed, Pending, RequestTracker};
use crate::markdown::toc::EMPTY_TOC_HTML;
use crate::markdown::{LinkTarget, MarkdownRenderer, RenderedDocument};
use crate::utils::{escape_html, format_kb};
use std::sync::Arc;

pub const LOADING_HTML: &str = "<div class=\"loading\">Loading...</div>";

/// Where the content view is scrolled to. Heading scrolls are smooth and align
/// the heading with the top of the viewport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScrollPosition {
    #[default]
    Top,
    Heading(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    pub welcome_visible: bool,
    pub document_visible: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub title: String,
    pub path: String,
    pub size: String,
    pub content_html: String,
    pub toc_html: String,
    pub toc_visible: bool,
    pub scroll: ScrollPosition,
}

impl Default for DocumentView {
    fn default() -> Self {
        Self {
            welcome_visible: true,
            document_visible: false,
            loading: false,
            error: None,
            title: String::new(),
            path: String::new(),
            size: String::new(),
            content_html: String::new(),
            toc_html: String::new(),
            toc_visible: false,
            scroll: ScrollPosition::Top,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    Scrolled(String),
    /// In-page link whose target is not in the document; nothing happens.
    MissingTarget(String),
    Navigate(String),
}

fn error_html(prefix: &str, message: &str) -> String {
    format!(
        "<div class=\"loading error\">❌ {}: {}</div>",
        prefix,
        escape_html(message)
    )
}

/// Fetches one document at a time and renders it into the content view.
pub struct DocumentController {
    backend: Arc<dyn Backend>,
    renderer: MarkdownRenderer,
    tracker: RequestTracker,
    current: Option<DocumentRecord>,
    rendered: Option<RenderedDocument>,
    view: DocumentView,
}

impl DocumentController {
    pub fn new(backend: Arc<dyn Backend>, renderer: MarkdownRenderer) -> Self {
        Self {
            backend,
            renderer,
            tracker: RequestTracker::new(),
            current: None,
            rendered: None,
            view: DocumentView::default(),
        }
    }

    pub fn view(&self) -> &DocumentView {
        &self.view
    }

    pub fn current(&self) -> Option<&DocumentRecord> {
        self.current.as_ref()
    }

    pub fn rendered(&self) -> Option<&RenderedDocument> {
        self.rendered.as_ref()
    }

    pub fn begin_open(&mut self, path: &str) -> Pending<DocumentRecord> {
        self.view.welcome_visible = false;
        self.view.document_visible = true;
        self.view.loading = true;
        self.view.error = None;
        self.view.content_html = LOADING_HTML.to_string();

        let backend = Arc::clone(&self.backend);
        let path = path.to_string();
        self.tracker
            .start(async move { backend.markdown_content(&path).await })
    }

    pub async fn finish_open(&mut self, completed: Completed<DocumentRecord>) {
        let Some(result) = self.tracker.accept(completed) else {
            return;
        };
        self.view.loading = false;

        match result {
            Ok(record) => {
                self.view.title = record.filename.clone();
                self.view.path = record.path.clone();
                self.view.size = format_kb(record.size);
                let content = record.content.clone();
                self.current = Some(record);
                self.render_markdown(&content).await;
            }
            Err(e) => {
                log::error!("Failed to load file: {}", e);
                self.current = None;
                self.rendered = None;
                self.view.error = Some(e.to_string());
                self.view.content_html = error_html("Failed to load", &e.to_string());
                self.view.toc_html = EMPTY_TOC_HTML.to_string();
            }
        }
    }

    pub async fn open(&mut self, path: &str) {
        let pending = self.begin_open(path);
        let completed = pending.resolve().await;
        self.finish_open(completed).await;
    }

    /// Renders raw Markdown into the content view and rebuilds the outline.
    pub async fn render_markdown(&mut self, content: &str) {
        match self.renderer.render(content).await {
            Ok(rendered) => {
                self.view.content_html = rendered.html.clone();
                self.view.toc_html = rendered.toc.render();
                self.view.scroll = ScrollPosition::Top;
                self.rendered = Some(rendered);
            }
            Err(e) => {
                log::error!("Failed to render markdown: {}", e);
                self.rendered = None;
                self.view.error = Some(e.to_string());
                self.view.content_html = error_html("Render failed", &e.to_string());
                self.view.toc_html = EMPTY_TOC_HTML.to_string();
            }
        }
    }

    /// Scrolls to an element of the rendered document. Unknown ids are ignored.
    pub fn scroll_to_heading(&mut self, id: &str) -> bool {
        let exists = self
            .rendered
            .as_ref()
            .map(|r| r.anchors.contains(id))
            .unwrap_or(false);
        if exists {
            self.view.scroll = ScrollPosition::Heading(id.to_string());
        }
        exists
    }

    /// Routes a link activation: in-page fragments scroll instead of navigating.
    pub fn activate_link(&mut self, href: &str) -> LinkAction {
        match LinkTarget::parse(href) {
            LinkTarget::Fragment(id) => {
                if self.scroll_to_heading(&id) {
                    LinkAction::Scrolled(id)
                } else {
                    LinkAction::MissingTarget(id)
                }
            }
            LinkTarget::External(href) => LinkAction::Navigate(href),
        }
    }

    pub fn toggle_toc(&mut self) {
        self.view.toc_visible = !self.view.toc_visible;
    }
}
