use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{LedgerError, Result};

/// The two categories that feed the income, expense and savings totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedCategory {
    Income,
    Expense,
}

impl ReservedCategory {
    pub fn label(self) -> &'static str {
        match self {
            ReservedCategory::Income => "income",
            ReservedCategory::Expense => "expense",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReservedCategory::Income => "Income",
            ReservedCategory::Expense => "Expense",
        }
    }

    /// Case-insensitive match against a stored category.
    pub fn matches(self, category: &str) -> bool {
        category.eq_ignore_ascii_case(self.label())
    }

    pub fn of(category: &str) -> Option<Self> {
        [ReservedCategory::Income, ReservedCategory::Expense]
            .into_iter()
            .find(|reserved| reserved.matches(category))
    }
}

/// One stored row, field for field as it appears in the ledger file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl LedgerRow {
    pub fn new(
        date: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
        }
    }

    /// Fields in column order.
    pub fn fields(&self) -> [&str; 4] {
        [&self.date, &self.amount, &self.category, &self.description]
    }
}

/// A ledger row whose date has been parsed.
///
/// The amount stays as entered until it is aggregated, so rows outside the
/// reserved categories never fail on a bad amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl Transaction {
    pub fn new(date: NaiveDate, row: &LedgerRow) -> Self {
        Self {
            date,
            amount: row.amount.clone(),
            category: row.category.clone(),
            description: row.description.clone(),
        }
    }

    pub fn amount_value(&self) -> Result<Decimal> {
        Decimal::from_str(self.amount.trim())
            .or_else(|_| Decimal::from_scientific(self.amount.trim()))
            .map_err(|_| LedgerError::MalformedAmount(self.amount.clone()))
    }

    pub fn reserved_category(&self) -> Option<ReservedCategory> {
        ReservedCategory::of(&self.category)
    }
}
