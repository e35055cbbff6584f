use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::LedgerConfig;
use crate::db::LedgerStore;
use crate::error::{LedgerError, Result};
use crate::models::transaction::{LedgerRow, ReservedCategory};

/// An empty answer means today.
pub fn parse_entry_date(config: &LedgerConfig, input: &str, today: NaiveDate) -> Result<NaiveDate> {
    if input.trim().is_empty() {
        return Ok(today);
    }
    config.parse_date(input)
}

/// Checks the amount is a number and returns it trimmed, as it will be stored.
pub fn parse_amount(input: &str) -> Result<String> {
    let amount = input.trim();
    Decimal::from_str(amount)
        .or_else(|_| Decimal::from_scientific(amount))
        .map_err(|_| LedgerError::MalformedAmount(input.to_string()))?;
    Ok(amount.to_string())
}

/// Builds the stored row from prompt answers.
///
/// Date and amount are checked here; category and description are kept as typed.
pub fn create_entry(
    config: &LedgerConfig,
    date: &str,
    amount: &str,
    category: &str,
    description: &str,
    today: NaiveDate,
) -> Result<LedgerRow> {
    let date = parse_entry_date(config, date, today)?;
    let amount = parse_amount(amount)?;

    let category = category.trim();
    if ReservedCategory::of(category).is_none() {
        tracing::warn!(
            category,
            "category is not income or expense and will not count towards totals"
        );
    }

    Ok(LedgerRow::new(
        config.format_date(date),
        amount,
        category,
        description.trim(),
    ))
}

pub fn add_transaction(store: &LedgerStore, row: &LedgerRow) -> Result<()> {
    store.ensure_initialized()?;
    store.append(row)
}
