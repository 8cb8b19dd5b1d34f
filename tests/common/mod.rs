#![allow(dead_code)]

use finview::api::types::{
    DocumentRecord, FileEntry, FinancialReportRecord, FinancialStatements, Market, MindmapEntry,
    StockInfo,
};
use finview::{Backend, FetchError};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory backend that counts every call it receives.
#[derive(Default)]
pub struct MockBackend {
    pub reports: HashMap<String, FinancialReportRecord>,
    pub files: Vec<FileEntry>,
    pub documents: HashMap<String, String>,
    pub mindmaps: HashMap<String, String>,
    pub fail_listing: bool,
    pub report_calls: AtomicUsize,
    pub content_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub mindmap_list_calls: AtomicUsize,
}

impl MockBackend {
    pub fn with_report(mut self, company: &str, record: FinancialReportRecord) -> Self {
        self.reports.insert(company.to_string(), record);
        self
    }

    pub fn with_document(mut self, path: &str, content: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        self.files.push(FileEntry {
            name,
            path: path.to_string(),
            size: content.len() as u64,
        });
        self.documents.insert(path.to_string(), content.to_string());
        self
    }

    pub fn with_mindmap(mut self, filename: &str, content: &str) -> Self {
        self.mindmaps.insert(filename.to_string(), content.to_string());
        self
    }

    pub fn report_calls(&self) -> usize {
        self.report_calls.load(Ordering::SeqCst)
    }

    pub fn content_calls(&self) -> usize {
        self.content_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Backend for MockBackend {
    async fn financial_report(
        &self,
        company: &str,
        _market: Option<Market>,
    ) -> Result<FinancialReportRecord, FetchError> {
        self.report_calls.fetch_add(1, Ordering::SeqCst);
        self.reports
            .get(company)
            .cloned()
            .ok_or_else(|| FetchError::Backend(format!("Company not found: {}", company)))
    }

    async fn markdown_files(&self) -> Result<Vec<FileEntry>, FetchError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(FetchError::Status(500));
        }
        Ok(self.files.clone())
    }

    async fn markdown_content(&self, path: &str) -> Result<DocumentRecord, FetchError> {
        self.content_calls.fetch_add(1, Ordering::SeqCst);
        let content = self.documents.get(path).ok_or(FetchError::Status(404))?;
        Ok(DocumentRecord {
            filename: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            size: content.len() as u64,
            content: content.clone(),
        })
    }

    async fn mindmaps(&self) -> Result<Vec<MindmapEntry>, FetchError> {
        self.mindmap_list_calls.fetch_add(1, Ordering::SeqCst);
        let mut entries: Vec<MindmapEntry> = self
            .mindmaps
            .iter()
            .map(|(filename, content)| MindmapEntry {
                name: filename.trim_end_matches(".md").to_string(),
                filename: filename.clone(),
                size: content.len() as u64,
            })
            .collect();
        entries.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(entries)
    }

    async fn mindmap(&self, filename: &str) -> Result<String, FetchError> {
        self.mindmaps
            .get(filename)
            .cloned()
            .ok_or_else(|| FetchError::Transport("connection refused".to_string()))
    }
}

/// A report whose balance sheet has three columns and whose income statement
/// is missing with a per-statement error.
pub fn sample_report() -> FinancialReportRecord {
    let financial: FinancialStatements = serde_json::from_value(json!({
        "balance_sheet": [
            {"REPORT_DATE": "2024-12-31", "TOTAL_ASSETS": "1.25亿", "NET_PROFIT": "-300.00万"},
            {"REPORT_DATE": "2023-12-31", "TOTAL_ASSETS": "0.00亿", "NET_PROFIT": null}
        ],
        "income_statement": [],
        "income_statement_error": "income statement unavailable",
        "cash_flow": [],
        "financial_indicator": [
            {"REPORT_DATE": "2024-12-31", "ROE": "12.5%"}
        ]
    }))
    .expect("valid statements");

    FinancialReportRecord {
        stock_info: StockInfo {
            name: "Kweichow Moutai".to_string(),
            code: "600519".to_string(),
            market: "A".to_string(),
            symbol: Some("SH600519".to_string()),
        },
        financial,
    }
}
