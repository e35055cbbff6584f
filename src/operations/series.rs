use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::summary::{DailyPoint, DailySeries, checked_total};
use crate::models::transaction::{ReservedCategory, Transaction};

/// Every calendar day from the earliest to the latest transaction, inclusive.
pub fn daily_index(transactions: &[Transaction]) -> Vec<NaiveDate> {
    let first = transactions.iter().map(|t| t.date).min();
    let last = transactions.iter().map(|t| t.date).max();
    let (Some(first), Some(last)) = (first, last) else {
        return Vec::new();
    };
    first.iter_days().take_while(|day| *day <= last).collect()
}

/// Per-day totals of `category`, zero-filled across the whole span of `transactions`.
pub fn to_daily_series(
    transactions: &[Transaction],
    category: ReservedCategory,
) -> Result<DailySeries> {
    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for transaction in transactions.iter().filter(|t| category.matches(&t.category)) {
        let total = totals.entry(transaction.date).or_insert(Decimal::ZERO);
        *total = checked_total(*total, transaction.amount_value()?)?;
    }

    let points = daily_index(transactions)
        .into_iter()
        .map(|day| DailyPoint {
            day,
            amount: totals.get(&day).copied().unwrap_or(Decimal::ZERO),
        })
        .collect();

    Ok(DailySeries { category, points })
}

/// Income and expense series over the same day index, ready to overlay.
pub fn income_and_expense_series(
    transactions: &[Transaction],
) -> Result<(DailySeries, DailySeries)> {
    Ok((
        to_daily_series(transactions, ReservedCategory::Income)?,
        to_daily_series(transactions, ReservedCategory::Expense)?,
    ))
}
