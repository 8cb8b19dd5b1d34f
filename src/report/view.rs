use super::statement::StatementType;
use crate::api::types::{market_label, StockInfo};
use crate::utils::escape_html;
use strum::IntoEnumIterator;

/// Visible state of the report panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportView {
    pub loading: bool,
    pub result_visible: bool,
    pub error: Option<String>,
    pub stock_info_html: String,
    pub report_html: String,
    pub active_tab: StatementType,
}

impl ReportView {
    pub fn error_html(&self) -> Option<String> {
        self.error
            .as_ref()
            .map(|e| format!("<div class=\"error-message\">{}</div>", escape_html(e)))
    }
}

pub fn render_stock_info(info: &StockInfo) -> String {
    format!(
        r#"<h3>{name}</h3>
<div class="info-row">
<div class="info-item"><div class="info-label">Stock Code</div><div class="info-value">{code}</div></div>
<div class="info-item"><div class="info-label">Market</div><div class="info-value">{market}</div></div>
<div class="info-item"><div class="info-label">Trading Symbol</div><div class="info-value">{symbol}</div></div>
</div>"#,
        name = escape_html(&info.name),
        code = escape_html(&info.code),
        market = market_label(&info.market),
        symbol = escape_html(info.trading_symbol()),
    )
}

pub fn render_tabs(active: StatementType) -> String {
    StatementType::iter()
        .map(|t| {
            let class = if t == active { "tab-btn active" } else { "tab-btn" };
            format!(
                "<button class=\"{}\" data-report=\"{}\">{}</button>",
                class,
                t.key(),
                t.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
