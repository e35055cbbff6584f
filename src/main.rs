mod config;
mod db;
mod error;
mod models;
mod operations;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use config::{DEFAULT_LEDGER_FILE, LedgerConfig};
use db::LedgerStore;
use error::Result;
use operations::add::{add_transaction, create_entry, parse_amount, parse_entry_date};
use operations::query::QueryEngine;
use operations::report::run_chart;
use operations::series::income_and_expense_series;
use operations::view::format_report;

#[derive(Debug, Parser)]
#[command(name = "fintrack", version, about = "Track income and expenses in a CSV ledger")]
struct Cli {
    /// Ledger file to read and append to.
    #[arg(short, long, env = "FINTRACK_FILE", default_value = DEFAULT_LEDGER_FILE)]
    file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Append one transaction.
    Add {
        /// dd-mm-yyyy, defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
        /// Income, Expense or any other label.
        #[arg(short, long)]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Show transactions and a summary for a date range.
    View {
        /// dd-mm-yyyy, inclusive.
        start: String,
        /// dd-mm-yyyy, inclusive.
        end: String,
        /// Plot income and expenses per day.
        #[arg(long)]
        plot: bool,
    },
}

pub enum UserCommands {
    Add,
    View,
    Exit,
    Invalid,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                ),
        )
        .init();

    let cli = Cli::parse();
    let config = LedgerConfig::new(cli.file);
    let store = LedgerStore::new(config.clone());
    let engine = QueryEngine::new(config);

    let result = match cli.command {
        Some(Command::Add {
            date,
            amount,
            category,
            description,
        }) => run_add(&store, date.as_deref().unwrap_or(""), &amount, &category, &description),
        Some(Command::View { start, end, plot }) => run_view(&store, &engine, &start, &end, plot),
        None => run_interactive(&store, &engine),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_add(
    store: &LedgerStore,
    date: &str,
    amount: &str,
    category: &str,
    description: &str,
) -> Result<()> {
    let today = Local::now().date_naive();
    let row = create_entry(store.config(), date, amount, category, description, today)?;
    add_transaction(store, &row)?;
    println!("New entry written");
    Ok(())
}

fn run_view(
    store: &LedgerStore,
    engine: &QueryEngine,
    start: &str,
    end: &str,
    plot: bool,
) -> Result<()> {
    let report = engine.query_range(store, start, end)?;
    println!("{}", format_report(engine.config(), &report));

    if plot && !report.is_empty() {
        let (income, expense) = income_and_expense_series(&report.transactions)?;
        run_chart(engine.config(), &income, &expense)?;
    }
    Ok(())
}

fn run_interactive(store: &LedgerStore, engine: &QueryEngine) -> Result<()> {
    store.ensure_initialized()?;
    let config = store.config();

    loop {
        println!("\n1. Add a new transaction");
        println!("2. View transactions and summary within a date range");
        println!("3. Exit");
        let input = prompt("Enter your choice (1-3): ")?;

        match check_for_command(&input) {
            UserCommands::Add => {
                let today = Local::now().date_naive();
                let date = prompt_until(
                    &format!(
                        "Enter the date of the transaction ({}) \
                         or press 'ENTER' for today's date: ",
                        config.date_hint()
                    ),
                    |input| parse_entry_date(config, input, today).map(|_| ()),
                )?;
                let amount =
                    prompt_until("Enter the amount: ", |input| parse_amount(input).map(|_| ()))?;
                let category = prompt("Enter the category (Income/Expense): ")?;
                let description = prompt("Enter the description: ")?;

                match create_entry(config, &date, &amount, &category, &description, today)
                    .and_then(|row| add_transaction(store, &row))
                {
                    Ok(()) => println!("New entry written"),
                    Err(err) => println!("Error adding transaction: {}", err),
                }
            }
            UserCommands::View => {
                let start = prompt(&format!("Enter the start date ({}): ", config.date_hint()))?;
                let end = prompt(&format!("Enter the end date ({}): ", config.date_hint()))?;

                let report = match engine.query_range(store, &start, &end) {
                    Ok(report) => report,
                    Err(err) => {
                        println!("Error viewing transactions: {}", err);
                        continue;
                    }
                };
                println!("{}", format_report(config, &report));

                if !report.is_empty()
                    && prompt("Do you want to see a plot? (y/n) ")?.eq_ignore_ascii_case("y")
                {
                    let plotted = income_and_expense_series(&report.transactions)
                        .and_then(|(income, expense)| run_chart(config, &income, &expense));
                    if let Err(err) = plotted {
                        println!("Error plotting transactions: {}", err);
                    }
                }
            }
            UserCommands::Exit => {
                println!("Exiting the program...");
                return Ok(());
            }
            UserCommands::Invalid => {
                println!("Invalid input, please enter numbers '1-3'");
            }
        }
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    read_user_input()
}

/// Asks again until `check` accepts the answer.
fn prompt_until(message: &str, check: impl Fn(&str) -> Result<()>) -> Result<String> {
    loop {
        let input = prompt(message)?;
        match check(&input) {
            Ok(()) => return Ok(input),
            Err(err) => println!("{}. Please try again.", err),
        }
    }
}

fn read_user_input() -> Result<String> {
    let mut input = String::new();
    let read = io::stdin().read_line(&mut input)?;
    if read == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
    }
    Ok(input.trim().to_string())
}

fn check_for_command(input: &str) -> UserCommands {
    match input {
        "1" => UserCommands::Add,
        "2" => UserCommands::View,
        "3" => UserCommands::Exit,
        _ => UserCommands::Invalid,
    }
}
