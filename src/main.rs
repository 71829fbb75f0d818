use anyhow::{Context, bail};
use cadence::generate_dates;
use chrono::{Months, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use configuration::{Config, DataSource, DataSourceKind, Logging, init_tracing, load_config};
use core_types::{DividendAccounting, Frequency, InvestmentPolicy};
use market_data::{JsonFileProvider, MarketDataProvider, SyntheticProvider};
use rust_decimal::Decimal;
use scheduler::{DcaAnalysis, run_analysis};
use std::path::PathBuf;

/// The main entry point for the DCA analysis tool.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; it only supplies optional DCA__* overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Analyze(args) => handle_analyze(args).await,
        Commands::Dates(args) => handle_dates(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Back-tests dollar-cost averaging into a single security, with optional dividend reinvestment.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the investment ledger for a policy and summarize its performance.
    Analyze(AnalyzeArgs),
    /// Print the trading-day-adjusted contribution dates for a range.
    Dates(DatesArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Configuration file. Flags below override its values; if it does not
    /// exist, the policy is built from flags alone.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// The symbol to analyze (e.g., "AAPL").
    #[arg(long)]
    symbol: Option<String>,

    /// First contribution date (format: YYYY-MM-DD). Defaults to one year before --to.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last possible contribution date (format: YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Contribution cadence: daily, weekly or monthly.
    #[arg(long)]
    frequency: Option<Frequency>,

    /// Amount contributed on every cadence date.
    #[arg(long)]
    amount: Option<Decimal>,

    /// Reinvest dividends into additional shares.
    #[arg(long, conflicts_with = "no_reinvest")]
    reinvest: bool,

    /// Take dividends as cash even if the config file reinvests them.
    #[arg(long)]
    no_reinvest: bool,

    /// Whether reinvested dividends count as principal: principal or growth.
    #[arg(long)]
    dividend_accounting: Option<DividendAccounting>,

    /// Where prices come from.
    #[arg(long, value_enum)]
    source: Option<DataSourceKind>,

    /// JSON price file; implies `--source file`.
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Annual dividend yield of the synthetic series (e.g., 0.02).
    #[arg(long)]
    dividend_yield: Option<Decimal>,

    /// Print the ledger and summary as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct DatesArgs {
    /// The start date (format: YYYY-MM-DD).
    #[arg(long)]
    from: NaiveDate,

    /// The end date (format: YYYY-MM-DD).
    #[arg(long)]
    to: NaiveDate,

    /// Contribution cadence: daily, weekly or monthly.
    #[arg(long, default_value = "monthly")]
    frequency: Frequency,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

/// Handles the orchestration of a single analysis run.
async fn handle_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let _log_guard = init_tracing(&config.logging)?;
    tracing::info!(
        symbol = %config.policy.symbol,
        source = ?config.data.source,
        "Starting analysis"
    );

    let provider: Box<dyn MarketDataProvider> = match config.data.source {
        DataSourceKind::Synthetic => {
            Box::new(SyntheticProvider::new().with_dividend_yield(config.data.dividend_yield))
        }
        DataSourceKind::File => {
            let path = config
                .data
                .path
                .clone()
                .context("data.path is required for the file source")?;
            Box::new(JsonFileProvider::new(path))
        }
    };

    let analysis = run_analysis(provider.as_ref(), &config.policy).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else if analysis.has_data() {
        print_ledger(&analysis);
        print_summary(&analysis);
    } else {
        println!(
            "No price data for {} between {} and {}.",
            analysis.policy.symbol, analysis.policy.start_date, analysis.policy.end_date
        );
    }

    Ok(())
}

/// Loads the config file when present and layers the command-line flags on top.
fn resolve_config(args: &AnalyzeArgs) -> anyhow::Result<Config> {
    let mut config = if args.config.exists() {
        load_config(&args.config)
            .with_context(|| format!("Failed to load {}", args.config.display()))?
    } else {
        config_from_flags(args)?
    };

    let policy = &mut config.policy;
    if let Some(symbol) = &args.symbol {
        policy.symbol = symbol.clone();
    }
    if let Some(from) = args.from {
        policy.start_date = from;
    }
    if let Some(to) = args.to {
        policy.end_date = to;
    }
    if let Some(frequency) = args.frequency {
        policy.frequency = frequency;
    }
    if let Some(amount) = args.amount {
        policy.amount = amount;
    }
    if args.reinvest {
        policy.reinvest_dividends = true;
    }
    if args.no_reinvest {
        policy.reinvest_dividends = false;
    }
    if let Some(accounting) = args.dividend_accounting {
        policy.dividend_accounting = accounting;
    }

    if let Some(source) = args.source {
        config.data.source = source;
    }
    if let Some(path) = &args.data_file {
        config.data.source = DataSourceKind::File;
        config.data.path = Some(path.clone());
    }
    if let Some(dividend_yield) = args.dividend_yield {
        config.data.dividend_yield = dividend_yield;
    }

    config.validate()?;
    Ok(config)
}

fn config_from_flags(args: &AnalyzeArgs) -> anyhow::Result<Config> {
    let Some(symbol) = args.symbol.clone() else {
        bail!(
            "{} not found; pass --symbol and --amount (or create the file)",
            args.config.display()
        );
    };
    let amount = args.amount.context("--amount is required without a config file")?;
    let end_date = args.to.unwrap_or_else(|| Utc::now().date_naive());
    let start_date = match args.from {
        Some(from) => from,
        None => end_date
            .checked_sub_months(Months::new(12))
            .context("--to is too early to default --from")?,
    };
    let frequency = args.frequency.unwrap_or(Frequency::Monthly);

    Ok(Config {
        policy: InvestmentPolicy::new(symbol, start_date, end_date, frequency, amount),
        data: DataSource::default(),
        logging: Logging::default(),
    })
}

fn print_ledger(analysis: &DcaAnalysis) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Date",
            "Amount",
            "Price",
            "Shares Bought",
            "Total Shares",
            "Invested",
            "Value",
            "Dividend",
            "Cum. Dividends",
        ]);

    for entry in &analysis.ledger {
        table.add_row(vec![
            Cell::new(entry.date),
            right(entry.amount),
            right(entry.price),
            right(entry.shares_purchased),
            right(entry.total_shares),
            right(entry.total_invested),
            right(entry.current_value),
            right(entry.dividend),
            right(entry.cumulative_dividends),
        ]);
    }

    println!("{table}");
}

fn print_summary(analysis: &DcaAnalysis) {
    let summary = &analysis.summary;
    let policy = &analysis.policy;

    let mut table = Table::new();
    let title = format!("{} ({}, {})", policy.symbol, policy.frequency, policy.amount);
    table.load_preset(UTF8_FULL).set_header(vec![title, String::new()]);
    table.add_row(vec![Cell::new("Total invested"), right(summary.total_invested)]);
    table.add_row(vec![Cell::new("Final value"), right(summary.final_value)]);
    table.add_row(vec![Cell::new("Total return"), right(summary.total_return)]);
    table.add_row(vec![Cell::new("Return %"), right(summary.percentage_return)]);
    table.add_row(vec![Cell::new("Annualized %"), right(summary.annualized_return)]);
    table.add_row(vec![Cell::new("Dividends received"), right(summary.dividends_received)]);

    println!("{table}");
}

fn right(value: Decimal) -> Cell {
    Cell::new(value.normalize()).set_alignment(CellAlignment::Right)
}

// ==============================================================================
// Dates Command Logic
// ==============================================================================

fn handle_dates(args: DatesArgs) -> anyhow::Result<()> {
    if args.from > args.to {
        bail!("--from {} is after --to {}", args.from, args.to);
    }
    for date in generate_dates(args.from, args.to, args.frequency) {
        println!("{}", date.format("%Y-%m-%d (%a)"));
    }
    Ok(())
}
