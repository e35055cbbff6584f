use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::LedgerConfig;
use crate::db::LedgerStore;
use crate::error::Result;
use crate::models::summary::Summary;
use crate::models::transaction::{LedgerRow, ReservedCategory, Transaction};

/// The rows of a date range together with their totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
}

impl RangeReport {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

pub struct QueryEngine {
    config: LedgerConfig,
}

impl QueryEngine {
    pub fn new(config: LedgerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Rows dated within `start..=end`, in their original order.
    ///
    /// Every row date and both bounds must parse; one bad date fails the
    /// whole call.
    pub fn filter_by_range(
        &self,
        rows: &[LedgerRow],
        start: &str,
        end: &str,
    ) -> Result<Vec<Transaction>> {
        let (start, end) = self.parse_range(start, end)?;

        let mut transactions = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let date = self.config.parse_date(&row.date).inspect_err(|_| {
                tracing::warn!(
                    row = index + 1,
                    date = %row.date,
                    "ledger row has an unreadable date"
                );
            })?;
            transactions.push(Transaction::new(date, row));
        }

        transactions.retain(|transaction| start <= transaction.date && transaction.date <= end);
        Ok(transactions)
    }

    /// Reads the whole ledger and reports on `start..=end`.
    pub fn query_range(&self, store: &LedgerStore, start: &str, end: &str) -> Result<RangeReport> {
        let rows = store.read_all()?;
        let transactions = self.filter_by_range(&rows, start, end)?;
        let summary = summarize(&transactions)?;
        let (start, end) = self.parse_range(start, end)?;

        if transactions.is_empty() {
            tracing::info!(%start, %end, "no transactions found within the given date range");
        } else {
            tracing::debug!(
                %start,
                %end,
                matched = transactions.len(),
                scanned = rows.len(),
                "range query"
            );
        }

        Ok(RangeReport {
            start,
            end,
            transactions,
            summary,
        })
    }

    fn parse_range(&self, start: &str, end: &str) -> Result<(NaiveDate, NaiveDate)> {
        Ok((self.config.parse_date(start)?, self.config.parse_date(end)?))
    }
}

/// Sums income and expense rows; other categories are ignored.
pub fn summarize(transactions: &[Transaction]) -> Result<Summary> {
    let mut summary = Summary::default();

    for transaction in transactions {
        let part = match transaction.reserved_category() {
            Some(ReservedCategory::Income) => {
                Summary::new(transaction.amount_value()?, Decimal::ZERO)?
            }
            Some(ReservedCategory::Expense) => {
                Summary::new(Decimal::ZERO, transaction.amount_value()?)?
            }
            None => continue,
        };
        summary = summary.combine(part)?;
    }

    Ok(summary)
}

#[cfg(test)]
pub(crate) fn sample_rows() -> Vec<LedgerRow> {
    vec![
        LedgerRow::new("01-01-2024", "100", "Income", "salary"),
        LedgerRow::new("02-01-2024", "40", "Expense", "food"),
        LedgerRow::new("05-01-2024", "20", "Expense", "transport"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_store;
    use crate::error::LedgerError;

    fn engine() -> QueryEngine {
        QueryEngine::new(LedgerConfig::default())
    }

    fn descriptions(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|t| t.description.as_str()).collect()
    }

    #[test]
    fn test_filter_is_inclusive_on_both_ends() {
        let filtered = engine()
            .filter_by_range(&sample_rows(), "01-01-2024", "05-01-2024")
            .unwrap();
        assert_eq!(descriptions(&filtered), vec!["salary", "food", "transport"]);
    }

    #[test]
    fn test_filter_keeps_file_order() {
        let rows = vec![
            LedgerRow::new("05-01-2024", "20", "Expense", "transport"),
            LedgerRow::new("01-01-2024", "100", "Income", "salary"),
            LedgerRow::new("09-01-2024", "5", "Expense", "late"),
            LedgerRow::new("02-01-2024", "40", "Expense", "food"),
        ];
        let filtered = engine().filter_by_range(&rows, "02-01-2024", "05-01-2024").unwrap();
        assert_eq!(descriptions(&filtered), vec!["transport", "food"]);
    }

    #[test]
    fn test_filter_with_no_matches_is_empty() {
        let filtered = engine()
            .filter_by_range(&sample_rows(), "01-02-2024", "28-02-2024")
            .unwrap();
        assert!(filtered.is_empty());
        assert_eq!(summarize(&filtered).unwrap(), Summary::default());
    }

    #[test]
    fn test_filter_with_reversed_bounds_is_empty() {
        let filtered = engine()
            .filter_by_range(&sample_rows(), "05-01-2024", "01-01-2024")
            .unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_fails_on_impossible_row_date() {
        let mut rows = sample_rows();
        rows.push(LedgerRow::new("31-02-2024", "1", "Expense", "bad"));

        let result = engine().filter_by_range(&rows, "01-01-2024", "05-01-2024");
        assert!(matches!(
            result,
            Err(LedgerError::MalformedDate { value, .. }) if value == "31-02-2024"
        ));
    }

    #[test]
    fn test_filter_fails_on_malformed_bound() {
        let result = engine().filter_by_range(&sample_rows(), "2024-01-01", "05-01-2024");
        assert!(matches!(result, Err(LedgerError::MalformedDate { .. })));
    }

    #[test]
    fn test_summarize_sample() {
        let filtered = engine()
            .filter_by_range(&sample_rows(), "01-01-2024", "05-01-2024")
            .unwrap();
        let summary = summarize(&filtered).unwrap();

        assert_eq!(summary.total_income, Decimal::new(10000, 2));
        assert_eq!(summary.total_expense, Decimal::new(6000, 2));
        assert_eq!(summary.total_savings, Decimal::new(4000, 2));
    }

    #[test]
    fn test_summarize_ignores_other_categories() {
        let rows = vec![
            LedgerRow::new("01-01-2024", "100", "INCOME", "salary"),
            LedgerRow::new("01-01-2024", "not-a-number", "Gift", "socks"),
            LedgerRow::new("01-01-2024", "12.5", "expense", "lunch"),
        ];
        let filtered = engine().filter_by_range(&rows, "01-01-2024", "01-01-2024").unwrap();
        assert_eq!(filtered.len(), 3);

        let summary = summarize(&filtered).unwrap();
        assert_eq!(summary.total_income, Decimal::new(100, 0));
        assert_eq!(summary.total_expense, Decimal::new(125, 1));
    }

    #[test]
    fn test_summarize_is_additive() {
        let filtered = engine()
            .filter_by_range(&sample_rows(), "01-01-2024", "05-01-2024")
            .unwrap();
        let (income, expense): (Vec<_>, Vec<_>) = filtered
            .iter()
            .cloned()
            .partition(|t| t.reserved_category() == Some(ReservedCategory::Income));

        assert_eq!(
            summarize(&filtered).unwrap(),
            summarize(&income)
                .unwrap()
                .combine(summarize(&expense).unwrap())
                .unwrap()
        );
    }

    #[test]
    fn test_summarize_fails_on_overflowing_total() {
        let rows = vec![
            LedgerRow::new("01-01-2024", "79228162514264337593543950335", "Income", "jackpot"),
            LedgerRow::new("02-01-2024", "79228162514264337593543950335", "Income", "jackpot"),
        ];
        let filtered = engine()
            .filter_by_range(&rows, "01-01-2024", "02-01-2024")
            .unwrap();
        assert!(matches!(summarize(&filtered), Err(LedgerError::AmountOverflow)));
    }

    #[test]
    fn test_summarize_fails_on_malformed_amount() {
        let rows = vec![LedgerRow::new("01-01-2024", "lots", "Income", "bonus")];
        let filtered = engine().filter_by_range(&rows, "01-01-2024", "01-01-2024").unwrap();
        assert!(matches!(summarize(&filtered), Err(LedgerError::MalformedAmount(_))));
    }

    #[test]
    fn test_query_range_reads_store() {
        let (_dir, store) = establish_test_store();
        store.ensure_initialized().unwrap();
        for row in sample_rows() {
            store.append(&row).unwrap();
        }

        let report = engine().query_range(&store, "02-01-2024", "31-01-2024").unwrap();
        assert_eq!(descriptions(&report.transactions), vec!["food", "transport"]);
        assert_eq!(report.summary.total_expense, Decimal::new(60, 0));
        assert_eq!(report.start, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_query_range_on_missing_ledger() {
        let (_dir, store) = establish_test_store();
        let result = engine().query_range(&store, "01-01-2024", "31-01-2024");
        assert!(matches!(result, Err(LedgerError::NotFound(_))));
    }
}
