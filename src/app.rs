use crate::core::types::Backend;
use crate::markdown::MarkdownRenderer;
use crate::mindmap::MindmapController;
use crate::report::ReportController;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Report,
    Mindmap,
}

/// The financial report page: report lookup and mindmap panels.
pub struct App {
    panel: Panel,
    pub report: ReportController,
    pub mindmaps: MindmapController,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>, renderer: MarkdownRenderer) -> Self {
        Self {
            panel: Panel::default(),
            report: ReportController::new(Arc::clone(&backend)),
            mindmaps: MindmapController::new(backend, renderer),
        }
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    /// Switching to the mindmap panel refreshes its list.
    pub async fn select_panel(&mut self, panel: Panel) {
        self.panel = panel;
        if panel == Panel::Mindmap {
            self.mindmaps.load_list().await;
        }
    }
}
