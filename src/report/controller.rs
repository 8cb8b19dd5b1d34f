use super::statement::StatementType;
use super::table;
use super::view::{render_stock_info, ReportView};
use crate::api::types::{FinancialReportRecord, Market};
use crate::core::types::Backend;
use crate::error::FetchError;
use crate::fetch::{Completed, Pending, RequestTracker};
use std::sync::Arc;

/// Financial report lookup: one held record, re-rendered per statement tab.
pub struct ReportController {
    backend: Arc<dyn Backend>,
    tracker: RequestTracker,
    current: Option<FinancialReportRecord>,
    selected: StatementType,
    view: ReportView,
}

impl ReportController {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            tracker: RequestTracker::new(),
            current: None,
            selected: StatementType::default(),
            view: ReportView::default(),
        }
    }

    pub fn view(&self) -> &ReportView {
        &self.view
    }

    pub fn current(&self) -> Option<&FinancialReportRecord> {
        self.current.as_ref()
    }

    pub fn selected(&self) -> StatementType {
        self.selected
    }

    /// Starts a lookup and switches the view to its loading state. Returns
    /// `None` for a blank company name.
    pub fn begin_search(&mut self, company: &str, market: Option<Market>) -> Option<Pending<FinancialReportRecord>> {
        let company = company.trim();
        if company.is_empty() {
            return None;
        }

        self.view.loading = true;
        self.view.result_visible = false;
        self.view.error = None;

        let backend = Arc::clone(&self.backend);
        let company = company.to_string();
        Some(
            self.tracker
                .start(async move { backend.financial_report(&company, market).await }),
        )
    }

    /// Applies a finished lookup unless a newer one has started since.
    pub fn finish_search(&mut self, completed: Completed<FinancialReportRecord>) {
        let Some(result) = self.tracker.accept(completed) else {
            return;
        };
        self.view.loading = false;

        match result {
            Ok(record) => {
                self.view.stock_info_html = render_stock_info(&record.stock_info);
                self.current = Some(record);
                self.render_report();
                self.view.result_visible = true;
            }
            Err(e) => {
                log::error!("Financial report lookup failed: {}", e);
                self.view.error = Some(error_message(&e));
                self.view.result_visible = false;
            }
        }
    }

    pub async fn search(&mut self, company: &str, market: Option<Market>) {
        if let Some(pending) = self.begin_search(company, market) {
            let completed = pending.resolve().await;
            self.finish_search(completed);
        }
    }

    /// Switches tabs, re-rendering from the held record without a fetch.
    pub fn select_statement(&mut self, statement: StatementType) {
        self.selected = statement;
        self.view.active_tab = statement;
        if self.current.is_some() {
            self.render_report();
        }
    }

    pub fn statement_view(&self) -> Option<table::StatementView> {
        self.current
            .as_ref()
            .map(|record| table::build(self.selected, &record.financial))
    }

    fn render_report(&mut self) {
        if let Some(view) = self.statement_view() {
            self.view.report_html = table::render(&view);
        }
    }
}

/// Backend messages are shown verbatim; everything else gets a prefix.
/// Escaping happens when the message is placed into markup.
fn error_message(e: &FetchError) -> String {
    match e {
        FetchError::Backend(message) => message.clone(),
        other => format!("Query failed: {}", other),
    }
}
