use crate::api::types::{DocumentRecord, FileEntry, FinancialReportRecord, Market, MindmapEntry};
use crate::error::FetchError;

/// The HTTP API the views are wired to. Implemented over `reqwest` by
/// [`crate::api::HttpBackend`]; tests substitute in-memory implementations.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn financial_report(
        &self,
        company: &str,
        market: Option<Market>,
    ) -> Result<FinancialReportRecord, FetchError>;

    async fn markdown_files(&self) -> Result<Vec<FileEntry>, FetchError>;

    async fn markdown_content(&self, path: &str) -> Result<DocumentRecord, FetchError>;

    async fn mindmaps(&self) -> Result<Vec<MindmapEntry>, FetchError>;

    async fn mindmap(&self, filename: &str) -> Result<String, FetchError>;
}
