use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One row of a financial statement. Key order follows the backend payload.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub filename: String,
    pub path: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindmapEntry {
    pub name: String,
    pub filename: String,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "A")]
    AShare,
    #[serde(rename = "HK")]
    HongKong,
}

impl Market {
    pub fn code(&self) -> &'static str {
        match self {
            Market::AShare => "A",
            Market::HongKong => "HK",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Market::AShare),
            "HK" => Ok(Market::HongKong),
            other => Err(format!("Unknown market: {} (expected A or HK)", other)),
        }
    }
}

/// Display label for a market code as reported by the backend.
pub fn market_label(code: &str) -> &'static str {
    if code == Market::AShare.code() {
        "A-Share"
    } else {
        "Hong Kong"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockInfo {
    pub name: String,
    pub code: String,
    pub market: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl StockInfo {
    pub fn trading_symbol(&self) -> &str {
        match self.symbol.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => &self.code,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatements {
    #[serde(default)]
    pub balance_sheet: Vec<Row>,
    #[serde(default)]
    pub income_statement: Vec<Row>,
    #[serde(default)]
    pub cash_flow: Vec<Row>,
    #[serde(default)]
    pub financial_indicator: Vec<Row>,
    /// Per-statement fetch errors such as `balance_sheet_error`.
    #[serde(flatten)]
    pub errors: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReportRecord {
    pub stock_info: StockInfo,
    pub financial: FinancialStatements,
}

#[derive(Debug, Serialize)]
pub struct ReportRequest<'a> {
    pub company: &'a str,
    pub market: Option<Market>,
}

/// Envelope of `/api/financial-report`. `data` differs between success and
/// failure so it is decoded only once `success` is known.
#[derive(Debug, Deserialize)]
pub struct ReportResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
pub struct MindmapListResponse {
    #[serde(default)]
    pub mindmaps: Vec<MindmapEntry>,
}

#[derive(Debug, Deserialize)]
pub struct MindmapContentResponse {
    pub content: String,
}
