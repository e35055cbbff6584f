use crate::config::LedgerConfig;
use crate::models::transaction::Transaction;

use super::query::RangeReport;

/// Renders the transactions as an aligned table with a header row.
pub fn format_transactions_table(config: &LedgerConfig, transactions: &[Transaction]) -> String {
    let rows: Vec<[String; 4]> = transactions
        .iter()
        .map(|t| {
            [
                config.format_date(t.date),
                display_amount(t),
                t.category.clone(),
                t.description.clone(),
            ]
        })
        .collect();

    let columns = *config.columns();
    let mut widths = columns.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_line(&columns.map(str::to_string), &widths));
    for row in &rows {
        lines.push(format_line(row, &widths));
    }
    lines.join("\n")
}

/// Full text shown for a range query: heading, table and summary.
pub fn format_report(config: &LedgerConfig, report: &RangeReport) -> String {
    if report.is_empty() {
        return "No transactions found within the given date range".to_string();
    }

    format!(
        "Transactions from {} to {}\n{}\n\nSummary:\n{}",
        config.format_date(report.start),
        config.format_date(report.end),
        format_transactions_table(config, &report.transactions),
        report.summary
    )
}

fn display_amount(transaction: &Transaction) -> String {
    match transaction.amount_value() {
        Ok(value) => format!("{:.2}", value),
        Err(_) => transaction.amount.clone(),
    }
}

// Amount is right aligned, everything else left aligned.
fn format_line(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let line = format!(
        "{:<w0$}  {:>w1$}  {:<w2$}  {}",
        cells[0],
        cells[1],
        cells[2],
        cells[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    );
    line.trim_end().to_string()
}
