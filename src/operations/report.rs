use crate::config::LedgerConfig;
use crate::error::Result;
use crate::models::summary::DailySeries;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::io;

/// Draws the income and expense series as two lines until `q` or `Esc` is pressed.
///
/// Both series must share one day index.
pub fn run_chart(config: &LedgerConfig, income: &DailySeries, expense: &DailySeries) -> Result<()> {
    if income.is_empty() && expense.is_empty() {
        tracing::info!("nothing to plot");
        return Ok(());
    }

    let data = build_chart_data(config, income, expense);
    render_chart(&data)
}

#[derive(Debug, PartialEq)]
struct ChartData {
    income: Vec<(f64, f64)>,
    expense: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_labels: Vec<String>,
    y_labels: Vec<String>,
    single_day: bool,
    income_name: &'static str,
    expense_name: &'static str,
}

fn build_chart_data(
    config: &LedgerConfig,
    income: &DailySeries,
    expense: &DailySeries,
) -> ChartData {
    let days = if income.len() >= expense.len() {
        income.days()
    } else {
        expense.days()
    };
    let single_day = days.len() <= 1;

    let income_points = to_points(income);
    let expense_points = to_points(expense);

    let x_bounds = if single_day {
        [-1.0, 1.0]
    } else {
        [0.0, (days.len() - 1) as f64]
    };

    let x_labels = match days.as_slice() {
        [] => Vec::new(),
        [only] => vec![String::new(), config.format_date(*only), String::new()],
        [first, .., last] => {
            let middle = days[days.len() / 2];
            vec![
                config.format_date(*first),
                config.format_date(middle),
                config.format_date(*last),
            ]
        }
    };

    let amounts = income.amounts().into_iter().chain(expense.amounts());
    let (low, high) = amounts.fold((Decimal::ZERO, Decimal::ZERO), |(low, high), amount| {
        (low.min(amount), high.max(amount))
    });
    let low = low.to_f64().unwrap_or(0.0);
    let mut high = high.to_f64().unwrap_or(0.0);
    if high <= low {
        high = low + 1.0;
    }

    let y_labels = [low, (low + high) / 2.0, high]
        .iter()
        .map(|value| format!("{:.2}", value))
        .collect();

    ChartData {
        income: income_points,
        expense: expense_points,
        x_bounds,
        y_bounds: [low, high],
        x_labels,
        y_labels,
        single_day,
        income_name: income.category.title(),
        expense_name: expense.category.title(),
    }
}

fn to_points(series: &DailySeries) -> Vec<(f64, f64)> {
    series
        .points
        .iter()
        .enumerate()
        .map(|(idx, point)| (idx as f64, point.amount.to_f64().unwrap_or(0.0)))
        .collect()
}

fn render_chart(data: &ChartData) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = (|| -> Result<()> {
        let backend = ratatui::backend::CrosstermBackend::new(io::stdout());
        let mut terminal = ratatui::Terminal::new(backend)?;

        loop {
            terminal.draw(|frame| {
                let (graph_type, marker) = if data.single_day {
                    (GraphType::Scatter, Marker::Dot)
                } else {
                    (GraphType::Line, Marker::Braille)
                };

                let datasets = vec![
                    Dataset::default()
                        .name(data.income_name)
                        .marker(marker)
                        .graph_type(graph_type)
                        .style(Style::default().fg(Color::Green))
                        .data(&data.income),
                    Dataset::default()
                        .name(data.expense_name)
                        .marker(marker)
                        .graph_type(graph_type)
                        .style(Style::default().fg(Color::Red))
                        .data(&data.expense),
                ];

                let chart = Chart::new(datasets)
                    .block(
                        Block::default()
                            .title(Line::from(vec![Span::styled(
                                "Income and Expenses over time  (press q to exit)",
                                Style::default().fg(Color::White),
                            )]))
                            .borders(Borders::ALL),
                    )
                    .x_axis(
                        Axis::default()
                            .title("Date")
                            .style(Style::default().fg(Color::Gray))
                            .bounds(data.x_bounds)
                            .labels(data.x_labels.clone()),
                    )
                    .y_axis(
                        Axis::default()
                            .title("Amount")
                            .style(Style::default().fg(Color::Gray))
                            .bounds(data.y_bounds)
                            .labels(data.y_labels.clone()),
                    );

                frame.render_widget(chart, frame.area());
            })?;

            if event::poll(std::time::Duration::from_millis(250))? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Press => continue,
                    Event::Key(key) if key.code == KeyCode::Char('q') => break,
                    Event::Key(key) if key.code == KeyCode::Esc => break,
                    Event::Resize(_, _) => continue,
                    _ => {}
                }
            }
        }

        Ok(())
    })();

    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::summary::DailyPoint;
    use crate::models::transaction::ReservedCategory;
    use crate::operations::query::{sample_rows, QueryEngine};
    use crate::operations::series::income_and_expense_series;

    fn chart_for(start: &str, end: &str) -> ChartData {
        let config = LedgerConfig::default();
        let transactions = QueryEngine::new(config.clone())
            .filter_by_range(&sample_rows(), start, end)
            .unwrap();
        let (income, expense) = income_and_expense_series(&transactions).unwrap();
        build_chart_data(&config, &income, &expense)
    }

    #[test]
    fn test_chart_data_for_sample() {
        let data = chart_for("01-01-2024", "05-01-2024");

        assert!(!data.single_day);
        assert_eq!(data.x_bounds, [0.0, 4.0]);
        assert_eq!(data.y_bounds, [0.0, 100.0]);
        assert_eq!(
            data.expense,
            vec![(0.0, 0.0), (1.0, 40.0), (2.0, 0.0), (3.0, 0.0), (4.0, 20.0)]
        );
        assert_eq!(data.income[0], (0.0, 100.0));
        assert_eq!(data.x_labels, vec!["01-01-2024", "03-01-2024", "05-01-2024"]);
        assert_eq!(data.y_labels, vec!["0.00", "50.00", "100.00"]);
    }

    #[test]
    fn test_chart_data_for_single_day() {
        let data = chart_for("02-01-2024", "02-01-2024");

        assert!(data.single_day);
        assert_eq!(data.x_bounds, [-1.0, 1.0]);
        assert_eq!(data.expense, vec![(0.0, 40.0)]);
        assert_eq!(data.x_labels[1], "02-01-2024");
    }

    #[test]
    fn test_chart_data_with_only_zero_amounts() {
        let config = LedgerConfig::default();
        let day = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let flat = |category: ReservedCategory| DailySeries {
            category,
            points: day
                .iter_days()
                .take(3)
                .map(|day| DailyPoint { day, amount: Decimal::ZERO })
                .collect(),
        };

        let data = build_chart_data(
            &config,
            &flat(ReservedCategory::Income),
            &flat(ReservedCategory::Expense),
        );

        assert_eq!(data.y_bounds, [0.0, 1.0]);
        assert_eq!(data.x_bounds, [0.0, 2.0]);
    }
}
