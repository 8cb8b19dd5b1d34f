//! Statement table view-model and its HTML rendering.

use super::statement::StatementType;
use crate::api::types::FinancialStatements;
use crate::utils::escape_html;
use serde_json::{Number, Value};

/// Markers the backend attaches to formatted amounts: 亿 (1e8), 万 (1e4), %.
pub const UNIT_MARKERS: [char; 3] = ['亿', '万', '%'];

pub const EMPTY_CELL: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Positive,
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Plain,
    Numeric(Sign),
}

impl CellStyle {
    pub fn class(&self) -> &'static str {
        match self {
            CellStyle::Plain => "",
            CellStyle::Numeric(Sign::Zero) => "number",
            CellStyle::Numeric(Sign::Negative) => "number negative",
            CellStyle::Numeric(Sign::Positive) => "number positive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub statement: StatementType,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementView {
    NoData {
        statement: StatementType,
        error: Option<String>,
    },
    Table(ReportTable),
}

/// Only text carrying a unit marker counts as numeric; plain JSON numbers are
/// shown as-is.
pub fn classify(value: &Value) -> CellStyle {
    let Value::String(text) = value else {
        return CellStyle::Plain;
    };
    if !text.contains(&UNIT_MARKERS[..]) {
        return CellStyle::Plain;
    }
    if text.contains('-') {
        CellStyle::Numeric(Sign::Negative)
    } else if is_zero_amount(text) {
        CellStyle::Numeric(Sign::Zero)
    } else {
        CellStyle::Numeric(Sign::Positive)
    }
}

fn is_zero_amount(text: &str) -> bool {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    matches!(digits.parse::<f64>(), Ok(v) if v == 0.0)
}

pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => EMPTY_CELL.to_string(),
        Some(Value::String(s)) if s.is_empty() => EMPTY_CELL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => display_number(n),
        Some(other) => other.to_string(),
    }
}

/// Whole-valued floats print without a fractional part, so `123456789.0`
/// reads `123456789`.
fn display_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

pub fn cell(value: Option<&Value>) -> Cell {
    Cell {
        text: display_value(value),
        style: value.map(classify).unwrap_or(CellStyle::Plain),
    }
}

/// Columns come from the first row's keys; later rows missing a column get
/// the empty-cell dash.
pub fn build(statement: StatementType, statements: &FinancialStatements) -> StatementView {
    let rows = statement.rows(statements);
    let columns: Vec<String> = rows
        .first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();

    if columns.is_empty() {
        return StatementView::NoData {
            statement,
            error: statement.error(statements).map(str::to_string),
        };
    }

    let rows = rows
        .iter()
        .map(|row| columns.iter().map(|c| cell(row.get(c))).collect())
        .collect();

    StatementView::Table(ReportTable {
        statement,
        columns,
        rows,
    })
}

pub fn render(view: &StatementView) -> String {
    match view {
        StatementView::NoData { statement, error } => {
            let mut html = format!(
                "<div class=\"empty-state\">\n<div class=\"icon\">📊</div>\n<h3>No {label} data</h3>\n<p>This company may not have {label} data available</p>\n",
                label = statement.label()
            );
            if let Some(error) = error {
                html.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(error)));
            }
            html.push_str("</div>");
            html
        }
        StatementView::Table(table) => render_table(table),
    }
}

fn render_table(table: &ReportTable) -> String {
    let mut html = String::from("<table class=\"report-table\">\n<thead>\n<tr>");
    for column in &table.columns {
        html.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            match cell.style.class() {
                "" => html.push_str(&format!("<td>{}</td>", escape_html(&cell.text))),
                class => html.push_str(&format!(
                    "<td class=\"{}\">{}</td>",
                    class,
                    escape_html(&cell.text)
                )),
            }
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}
