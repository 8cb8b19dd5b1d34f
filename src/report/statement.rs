use crate::api::types::{FinancialStatements, Row};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::{EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(try_from = "String", into = "String")]
pub enum StatementType {
    #[default]
    Balance,
    Income,
    CashFlow,
    Indicator,
}

impl StatementType {
    /// Key used by tab markup (`data-report`) and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            StatementType::Balance => "balance",
            StatementType::Income => "income",
            StatementType::CashFlow => "cashflow",
            StatementType::Indicator => "indicator",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatementType::Balance => "Balance Sheet",
            StatementType::Income => "Income Statement",
            StatementType::CashFlow => "Cash Flow Statement",
            StatementType::Indicator => "Financial Indicators",
        }
    }

    /// Field name in the `financial` payload.
    pub fn field(&self) -> &'static str {
        match self {
            StatementType::Balance => "balance_sheet",
            StatementType::Income => "income_statement",
            StatementType::CashFlow => "cash_flow",
            StatementType::Indicator => "financial_indicator",
        }
    }

    pub fn rows<'a>(&self, statements: &'a FinancialStatements) -> &'a [Row] {
        match self {
            StatementType::Balance => &statements.balance_sheet,
            StatementType::Income => &statements.income_statement,
            StatementType::CashFlow => &statements.cash_flow,
            StatementType::Indicator => &statements.financial_indicator,
        }
    }

    /// Backend-reported error for this statement, e.g. `cash_flow_error`.
    pub fn error<'a>(&self, statements: &'a FinancialStatements) -> Option<&'a str> {
        statements
            .errors
            .get(&format!("{}_error", self.field()))
            .and_then(|v| v.as_str())
    }

    pub fn list_types() -> &'static str {
        &STATEMENT_KEYS
    }
}

pub static STATEMENT_KEYS: Lazy<String> = Lazy::new(|| {
    StatementType::iter()
        .map(|t| t.key())
        .collect::<Vec<_>>()
        .join(", ")
});

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for StatementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "balance" => Ok(StatementType::Balance),
            "income" => Ok(StatementType::Income),
            "cashflow" => Ok(StatementType::CashFlow),
            "indicator" => Ok(StatementType::Indicator),
            other => Err(format!(
                "Unknown statement type: {} (expected one of {})",
                other,
                StatementType::list_types()
            )),
        }
    }
}

impl TryFrom<String> for StatementType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        StatementType::from_str(&s)
    }
}

impl From<StatementType> for String {
    fn from(t: StatementType) -> Self {
        t.key().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(" CashFlow ".parse::<StatementType>().unwrap(), StatementType::CashFlow);
        assert_eq!(StatementType::default(), StatementType::Balance);
        assert_eq!(StatementType::list_types(), "balance, income, cashflow, indicator");
    }

    #[test]
    fn test_unknown_key() {
        assert!("equity".parse::<StatementType>().is_err());
    }

    #[test]
    fn test_statement_error_lookup() {
        let statements: FinancialStatements =
            serde_json::from_str(r#"{"cash_flow_error": "upstream timeout"}"#).unwrap();
        assert_eq!(StatementType::CashFlow.error(&statements), Some("upstream timeout"));
        assert_eq!(StatementType::Balance.error(&statements), None);
    }
}
