pub mod http;
pub mod types;

pub use http::HttpBackend;
pub use types::{
    market_label, DocumentRecord, FileEntry, FinancialReportRecord, FinancialStatements, Market,
    MindmapEntry, Row, StockInfo,
};
