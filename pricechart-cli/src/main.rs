//! PriceChart CLI: list symbols, print aligned price charts and tooltips.
//!
//! Commands:
//! - `symbols`: list the symbols the configured source can serve
//! - `chart`: fetch histories, align them on one date axis, print a table or JSON
//! - `tooltip`: print the hover tooltip for one axis index or date

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pricechart_core::chart::{build_chart_series, tooltip_for_date, ChartData};
use pricechart_core::config::{PriceChartConfig, SourceKind};
use pricechart_core::data::{fetch_histories, PriceSource};
use pricechart_core::domain::DateKey;
use pricechart_core::selection::{ChartRequest, SelectionError};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pricechart",
    about = "PriceChart CLI: multi-symbol OHLCV history on one aligned date axis"
)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Price source. Overrides the config file.
    #[arg(long, global = true, value_enum)]
    source: Option<SourceArg>,

    /// Finance-data service URL. Overrides config and PRICECHART_API_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory of {SYMBOL}.csv files for the csv source.
    #[arg(long, global = true)]
    csv_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Http,
    Csv,
    Synthetic,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Http => SourceKind::Http,
            SourceArg::Csv => SourceKind::Csv,
            SourceArg::Synthetic => SourceKind::Synthetic,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List available symbols.
    Symbols,
    /// Print the aligned close series for one or more symbols.
    Chart {
        #[command(flatten)]
        selection: Selection,

        /// Emit chart series and axis as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the O/H/L/C tooltip for one axis position.
    Tooltip {
        #[command(flatten)]
        selection: Selection,

        /// Axis index (0-based).
        #[arg(long, conflicts_with = "date", required_unless_present = "date")]
        index: Option<usize>,

        /// Axis date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,

        /// Emit the tooltip as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Args)]
struct Selection {
    /// Comma-separated symbols (e.g., AAPL,MSFT).
    symbols: String,

    /// Start date (YYYY-MM-DD), inclusive. Defaults to the config, else earliest data.
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD), inclusive. Defaults to the config, else latest data.
    #[arg(long)]
    end: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Symbols => run_symbols(&config),
        Commands::Chart { selection, json } => run_chart(&config, &selection, json),
        Commands::Tooltip {
            selection,
            index,
            date,
            json,
        } => run_tooltip(&config, &selection, index, date.as_deref(), json),
    }
}

/// Config file, then environment, then flags.
fn resolve_config(cli: &Cli) -> Result<PriceChartConfig> {
    let mut config = PriceChartConfig::load(cli.config.as_deref()).context("load config")?;
    if let Some(kind) = cli.source {
        config.source.kind = kind.into();
    }
    config.apply_base_url_override(cli.base_url.clone());
    if let Some(dir) = &cli.csv_dir {
        config.source.csv_dir = dir.clone();
    }
    Ok(config)
}

fn build_source(config: &PriceChartConfig, request: Option<&ChartRequest>) -> Result<Box<dyn PriceSource>> {
    let window = request
        .map(|r| (r.range.start.map(|k| k.date()), r.range.end.map(|k| k.date())))
        .unwrap_or((None, None));
    let today = chrono::Local::now().date_naive();
    config
        .source
        .build(window, today)
        .context("initialise price source")
}

fn run_symbols(config: &PriceChartConfig) -> Result<()> {
    let source = build_source(config, None)?;
    let symbols = source.list_symbols().context("list symbols")?;
    if symbols.is_empty() {
        println!("No symbols available.");
    }
    for symbol in symbols {
        println!("{symbol}");
    }
    Ok(())
}

fn parse_request(config: &PriceChartConfig, selection: &Selection) -> Result<ChartRequest> {
    let start = selection.start.as_deref().or(config.chart.start.as_deref());
    let end = selection.end.as_deref().or(config.chart.end.as_deref());
    match ChartRequest::parse(&selection.symbols, start, end) {
        Ok(request) => Ok(request),
        Err(SelectionError::NoSymbols) => {
            bail!("No symbols selected. Select one or more symbols to view their historical prices.")
        }
        Err(e) => Err(e.into()),
    }
}

/// Fetch every requested symbol and build the chart. Any failed symbol fails
/// the whole load.
fn load_chart(config: &PriceChartConfig, request: &ChartRequest) -> Result<ChartData> {
    let source = build_source(config, Some(request))?;
    let outcome = fetch_histories(source.as_ref(), &request.symbols);

    if !outcome.all_succeeded() {
        let reasons: Vec<String> = outcome
            .failures
            .iter()
            .map(|f| format!("{}: {}", f.symbol, f.error))
            .collect();
        bail!("Failed to load price data. {}", reasons.join("; "));
    }

    tracing::info!(
        symbols = request.symbols.len(),
        range = %request.range_label(),
        "building chart"
    );
    Ok(build_chart_series(&outcome.histories, &request.range))
}

fn run_chart(config: &PriceChartConfig, selection: &Selection, json: bool) -> Result<()> {
    let request = parse_request(config, selection)?;
    let chart = load_chart(config, &request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
        return Ok(());
    }

    println!("Price history");
    println!("{}", request.symbols.join(", "));
    println!("{}", request.range_label());
    println!();

    if !chart.has_renderable_data() {
        println!("No price data available for the selected configuration.");
        return Ok(());
    }

    print_table(&chart);
    Ok(())
}

fn print_table(chart: &ChartData) {
    let width = chart
        .series
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0)
        .max(10);

    print!("{:<10}", "date");
    for series in &chart.series {
        print!("  {:>width$}", series.name);
    }
    println!();

    for (i, date) in chart.axis.iter().enumerate() {
        print!("{date}");
        for series in &chart.series {
            match series.points[i].y() {
                Some(close) => print!("  {:>width$.2}", close),
                None => print!("  {:>width$}", "-"),
            }
        }
        println!();
    }
}

fn run_tooltip(
    config: &PriceChartConfig,
    selection: &Selection,
    index: Option<usize>,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let request = parse_request(config, selection)?;
    let chart = load_chart(config, &request)?;

    let tooltip = match (index, date) {
        (Some(i), _) => chart.tooltip(i).with_context(|| {
            format!("index {i} is outside the date axis ({} dates)", chart.axis.len())
        })?,
        (None, Some(raw)) => {
            let key = DateKey::parse(raw)?;
            tooltip_for_date(key, &chart.series, &chart.axis)
                .with_context(|| format!("{key} is not on the date axis"))?
        }
        (None, None) => bail!("one of --index or --date is required"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tooltip)?);
    } else {
        println!("{tooltip}");
    }
    Ok(())
}
