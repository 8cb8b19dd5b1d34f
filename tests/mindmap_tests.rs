mod common;

use common::MockBackend;
use finview::app::{App, Panel};
use finview::MarkdownRenderer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn app_with(backend: &Arc<MockBackend>) -> App {
    App::new(backend.clone(), MarkdownRenderer::default())
}

#[tokio::test]
async fn test_switching_to_mindmaps_loads_the_list() {
    let backend = Arc::new(
        MockBackend::default()
            .with_mindmap("cement.md", "# Cement\n\n## Supply")
            .with_mindmap("steel.md", "# Steel"),
    );
    let mut app = app_with(&backend);
    assert_eq!(app.panel(), Panel::Report);
    assert_eq!(backend.mindmap_list_calls.load(Ordering::SeqCst), 0);

    app.select_panel(Panel::Mindmap).await;

    assert_eq!(app.panel(), Panel::Mindmap);
    assert_eq!(backend.mindmap_list_calls.load(Ordering::SeqCst), 1);
    let names: Vec<&str> = app.mindmaps.entries().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["cement", "steel"]);
    assert!(app.mindmaps.view().list_html.contains(r#"data-filename="steel.md""#));

    app.select_panel(Panel::Report).await;
    assert_eq!(backend.mindmap_list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_mindmap_list() {
    let backend = Arc::new(MockBackend::default());
    let mut app = app_with(&backend);
    app.select_panel(Panel::Mindmap).await;

    assert!(app.mindmaps.entries().is_empty());
    assert!(app.mindmaps.view().list_html.contains("No mindmaps"));
}

#[tokio::test]
async fn test_open_and_return_to_list() {
    let backend = Arc::new(MockBackend::default().with_mindmap("cement.md", "# Cement\n\n## Supply"));
    let mut app = app_with(&backend);

    app.mindmaps.open("cement.md").await;

    let view = app.mindmaps.view();
    assert!(view.viewer_visible);
    assert!(!view.list_visible);
    assert_eq!(view.title, "cement");
    assert!(view.content_html.contains(r#"<h2 id="heading-1">Supply</h2>"#));
    assert!(view.error.is_none());

    app.mindmaps.back_to_list();
    assert!(app.mindmaps.view().list_visible);
    assert!(!app.mindmaps.view().viewer_visible);
}

#[tokio::test]
async fn test_failed_mindmap_shows_error_state() {
    let backend = Arc::new(MockBackend::default());
    let mut app = app_with(&backend);

    app.mindmaps.open("missing.md").await;

    let view = app.mindmaps.view();
    assert_eq!(view.title, "Failed to load");
    assert!(view.content_html.contains("Unable to load mindmap"));
    assert!(view.content_html.contains("connection refused"));
    assert!(app.mindmaps.rendered().is_none());
}

#[tokio::test]
async fn test_back_to_list_discards_pending_content() {
    let backend = Arc::new(MockBackend::default().with_mindmap("cement.md", "# Cement"));
    let mut app = app_with(&backend);

    let pending = app.mindmaps.begin_open("cement.md");
    assert_eq!(app.mindmaps.view().title, "Loading...");
    app.mindmaps.back_to_list();

    let completed = pending.resolve().await;
    app.mindmaps.finish_open(completed).await;
    assert!(app.mindmaps.rendered().is_none());
    assert!(app.mindmaps.view().list_visible);
}
