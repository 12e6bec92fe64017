//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::console_report::ConsoleReport;
use crate::adapters::csv_adapter::{write_candles, CsvAdapter};
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::candle::Candle;
use crate::domain::config_validation::{validate_market_config, validate_strategy_config};
use crate::domain::error::SigtraderError;
use crate::domain::market::{
    is_valid_interval, MarketConfig, DEFAULT_BASE_URL, DEFAULT_INTERVAL, DEFAULT_LIMIT,
    DEFAULT_SYMBOL, VALID_INTERVALS,
};
use crate::domain::price_series::PriceSeries;
use crate::domain::strategy::{Strategy, StrategyParams};
use crate::domain::timeline::SignalTimeline;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::CandleSource;
use crate::ports::report_port::SignalReportPort;

#[derive(Parser, Debug)]
#[command(name = "sigtrader", about = "Walk-forward technical signals over Binance klines")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Market selection flags shared by `signals` and `fetch`.
#[derive(Args, Debug, Default, Clone)]
pub struct MarketArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub symbol: Option<String>,
    #[arg(long)]
    pub interval: Option<String>,
    #[arg(long)]
    pub limit: Option<usize>,
    /// Read `{SYMBOL}_{interval}.csv` from this directory instead of the API
    #[arg(long)]
    pub csv_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate all strategies over every prefix and print the latest signals
    Signals {
        #[command(flatten)]
        market: MarketArgs,
        /// Export the full signal timeline as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Build the timeline incrementally instead of re-evaluating each prefix
        #[arg(long)]
        streaming: bool,
    },
    /// Download candles and save them as CSV
    Fetch {
        #[command(flatten)]
        market: MarketArgs,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Signals {
            market,
            output,
            streaming,
        } => run_signals(&market, output.as_deref(), streaming),
        Command::Fetch { market, output } => run_fetch(&market, &output),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, SigtraderError> {
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| SigtraderError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Loads `path` when given; otherwise every key takes its default.
fn load_optional_config(path: Option<&Path>) -> Result<FileConfigAdapter, SigtraderError> {
    match path {
        Some(p) => load_config(p),
        None => FileConfigAdapter::from_string("").map_err(|reason| SigtraderError::ConfigParse {
            file: "<defaults>".into(),
            reason,
        }),
    }
}

fn positive(section: &str, key: &str, value: i64) -> Result<usize, SigtraderError> {
    usize::try_from(value)
        .ok()
        .filter(|&v| v >= 1)
        .ok_or_else(|| SigtraderError::ConfigInvalid {
            section: section.into(),
            key: key.into(),
            reason: format!("{key} must be at least 1"),
        })
}

pub fn build_market_config(config: &dyn ConfigPort) -> Result<MarketConfig, SigtraderError> {
    let limit = config.get_int("market", "limit", DEFAULT_LIMIT as i64);

    Ok(MarketConfig {
        symbol: config
            .get_string("market", "symbol")
            .unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
        interval: config
            .get_string("market", "interval")
            .unwrap_or_else(|| DEFAULT_INTERVAL.to_string()),
        limit: positive("market", "limit", limit)?,
        base_url: config
            .get_string("market", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
    })
}

/// Applies command-line flags on top of a config-derived market selection.
pub fn apply_market_overrides(
    mut market: MarketConfig,
    args: &MarketArgs,
) -> Result<MarketConfig, SigtraderError> {
    if let Some(symbol) = &args.symbol {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(SigtraderError::ConfigInvalid {
                section: "market".into(),
                key: "symbol".into(),
                reason: "symbol must not be empty".into(),
            });
        }
        market.symbol = symbol.to_uppercase();
    }
    if let Some(interval) = &args.interval {
        if !is_valid_interval(interval) {
            return Err(SigtraderError::ConfigInvalid {
                section: "market".into(),
                key: "interval".into(),
                reason: format!("interval must be one of {}", VALID_INTERVALS.join(", ")),
            });
        }
        market.interval = interval.clone();
    }
    if let Some(limit) = args.limit {
        market.limit = positive("market", "limit", limit as i64)?;
    }
    Ok(market)
}

pub fn build_strategy_params(config: &dyn ConfigPort) -> Result<StrategyParams, SigtraderError> {
    let d = StrategyParams::default();
    let window = |key: &str, default: usize| -> Result<usize, SigtraderError> {
        positive("strategy", key, config.get_int("strategy", key, default as i64))
    };

    Ok(StrategyParams {
        sma_fast_window: window("sma_fast_window", d.sma_fast_window)?,
        sma_slow_window: window("sma_slow_window", d.sma_slow_window)?,
        ewm_fast_span: window("ewm_fast_span", d.ewm_fast_span)?,
        ewm_slow_span: window("ewm_slow_span", d.ewm_slow_span)?,
        rsi_window: window("rsi_window", d.rsi_window)?,
        rsi_buy_threshold: config.get_double("strategy", "rsi_buy_threshold", d.rsi_buy_threshold),
        rsi_sell_threshold: config.get_double("strategy", "rsi_sell_threshold", d.rsi_sell_threshold),
        bollinger_window: window("bollinger_window", d.bollinger_window)?,
        bollinger_k: config.get_double("strategy", "bollinger_k", d.bollinger_k),
    })
}

/// CSV directory from the flag, else `[data] csv_dir`.
pub fn resolve_csv_dir(args: &MarketArgs, config: &dyn ConfigPort) -> Option<PathBuf> {
    args.csv_dir
        .clone()
        .or_else(|| config.get_string("data", "csv_dir").map(PathBuf::from))
}

fn open_source(
    market: &MarketConfig,
    csv_dir: Option<PathBuf>,
) -> Result<Box<dyn CandleSource>, SigtraderError> {
    if let Some(dir) = csv_dir {
        info!("Reading candles from {}", dir.display());
        return Ok(Box::new(CsvAdapter::new(dir)));
    }

    #[cfg(feature = "binance")]
    {
        use crate::adapters::binance_adapter::BinanceAdapter;
        return Ok(Box::new(BinanceAdapter::new(&market.base_url)?));
    }

    #[cfg(not(feature = "binance"))]
    {
        let _ = market;
        return Err(SigtraderError::ConfigMissing {
            section: "data".into(),
            key: "csv_dir".into(),
        });
    }
}

/// Fetches candles for `market` and validates them into a series.
pub fn load_series(
    source: &dyn CandleSource,
    market: &MarketConfig,
) -> Result<PriceSeries, SigtraderError> {
    let candles: Vec<Candle> = source.fetch_candles(&market.symbol, &market.interval, market.limit)?;
    if candles.is_empty() {
        return Err(SigtraderError::NoData {
            symbol: market.symbol.clone(),
            interval: market.interval.clone(),
        });
    }
    info!(
        "Loaded {} candles for {} ({})",
        candles.len(),
        market.symbol,
        market.interval
    );
    PriceSeries::new(candles)
}

pub fn run_signals_pipeline(
    source: &dyn CandleSource,
    market: &MarketConfig,
    params: &StrategyParams,
    streaming: bool,
) -> Result<SignalTimeline, SigtraderError> {
    let series = load_series(source, market)?;

    info!(
        "Building signal timeline over {} prefixes{}",
        series.len(),
        if streaming { " (streaming)" } else { "" }
    );
    let timeline = if streaming {
        SignalTimeline::build_streaming(&series, params)
    } else {
        SignalTimeline::build(&series, params)
    };
    Ok(timeline)
}

fn run_signals(
    args: &MarketArgs,
    output: Option<&Path>,
    streaming: bool,
) -> Result<(), SigtraderError> {
    let config = load_optional_config(args.config.as_deref())?;
    validate_market_config(&config)?;
    validate_strategy_config(&config)?;

    let market = apply_market_overrides(build_market_config(&config)?, args)?;
    let params = build_strategy_params(&config)?;
    let streaming = streaming || config.get_bool("output", "streaming", false);
    let output = output
        .map(Path::to_path_buf)
        .or_else(|| config.get_string("output", "signals_csv").map(PathBuf::from));

    let source = open_source(&market, resolve_csv_dir(args, &config))?;
    let timeline = run_signals_pipeline(source.as_ref(), &market, &params, streaming)?;

    ConsoleReport.write(&timeline, &params, &market.symbol)?;
    if let Some(path) = output {
        CsvReportAdapter::new(path).write(&timeline, &params, &market.symbol)?;
    }
    Ok(())
}

fn run_fetch(args: &MarketArgs, output: &Path) -> Result<(), SigtraderError> {
    let config = load_optional_config(args.config.as_deref())?;
    validate_market_config(&config)?;

    let market = apply_market_overrides(build_market_config(&config)?, args)?;
    let source = open_source(&market, resolve_csv_dir(args, &config))?;
    let series = load_series(source.as_ref(), &market)?;

    write_candles(output, series.candles())?;
    info!("Wrote {} candles to {}", series.len(), output.display());
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), SigtraderError> {
    let config = load_config(config_path)?;
    validate_market_config(&config)?;
    validate_strategy_config(&config)?;

    let market = build_market_config(&config)?;
    let params = build_strategy_params(&config)?;

    println!(
        "Market: {} {} (limit {}) from {}",
        market.symbol, market.interval, market.limit, market.base_url
    );
    for strategy in Strategy::ALL {
        println!("{:<14}{}", strategy.label(), strategy.indicator(&params));
    }
    println!("Configuration is valid.");
    Ok(())
}
