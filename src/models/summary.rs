use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::transaction::ReservedCategory;
use crate::error::{LedgerError, Result};

/// Income, expense and savings totals over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub total_savings: Decimal,
}

impl Summary {
    pub fn new(total_income: Decimal, total_expense: Decimal) -> Result<Self> {
        Ok(Self {
            total_income,
            total_expense,
            total_savings: total_income
                .checked_sub(total_expense)
                .ok_or(LedgerError::AmountOverflow)?,
        })
    }

    /// Totals of two disjoint sets of transactions.
    pub fn combine(self, other: Summary) -> Result<Summary> {
        Summary::new(
            checked_total(self.total_income, other.total_income)?,
            checked_total(self.total_expense, other.total_expense)?,
        )
    }
}

pub fn checked_total(total: Decimal, amount: Decimal) -> Result<Decimal> {
    total.checked_add(amount).ok_or(LedgerError::AmountOverflow)
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Income: ${:.2}", self.total_income)?;
        writeln!(f, "Total Expense: ${:.2}", self.total_expense)?;
        write!(f, "Total Savings: ${:.2}", self.total_savings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyPoint {
    pub day: NaiveDate,
    pub amount: Decimal,
}

/// Per-day totals of one reserved category over a contiguous run of days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySeries {
    pub category: ReservedCategory,
    pub points: Vec<DailyPoint>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|point| point.day).collect()
    }

    pub fn amounts(&self) -> Vec<Decimal> {
        self.points.iter().map(|point| point.amount).collect()
    }
}
