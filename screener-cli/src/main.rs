//! Screener CLI: screen, universe and inspect commands.
//!
//! Commands:
//! - `screen`: run a scan from a TOML config and print the report as JSON
//! - `universe`: print (or save) the built-in instrument catalog as TOML
//! - `inspect`: show one or more symbols' records and the stage that rejects them
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); stdout carries only output.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use screener_core::data::{
    CsvDirSource, PriceSource, StaticUniverse, SyntheticSource, UniverseProvider,
};
use screener_core::domain::InstrumentMeta;
use screener_runner::{rank, RankKey, ScreenConfig};

#[derive(Parser)]
#[command(name = "screener", about = "Screener CLI: trend and momentum equity screener")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen a universe and print the report as JSON.
    Screen {
        /// Path to a TOML screen config. Without one, every instrument passes.
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,

        /// Override the config's rank key (e.g. adx, ppo_slope, price).
        #[arg(long)]
        rank_by: Option<RankKey>,

        /// Write the report to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the built-in instrument catalog as TOML.
    Universe {
        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Evaluate individual symbols and report which filter rejects them.
    Inspect {
        /// Symbols to inspect.
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Path to a TOML screen config.
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Where instruments and their price history come from.
#[derive(Args)]
struct SourceArgs {
    /// Universe TOML file. Defaults to the built-in catalog.
    #[arg(long)]
    universe: Option<PathBuf>,

    /// Directory of `<SYMBOL>.csv` files.
    #[arg(long, conflicts_with = "synthetic")]
    data_dir: Option<PathBuf>,

    /// Use the deterministic price simulator.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Simulator master seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated bars per symbol.
    #[arg(long, default_value_t = SyntheticSource::DEFAULT_BARS)]
    bars: usize,

    /// First simulated date (YYYY-MM-DD).
    #[arg(long)]
    start: Option<String>,
}

impl SourceArgs {
    fn universe(&self) -> Result<StaticUniverse> {
        match &self.universe {
            Some(path) => StaticUniverse::from_file(path)
                .with_context(|| format!("loading universe {}", path.display())),
            None => Ok(StaticUniverse::default_us()),
        }
    }

    fn price_source(&self) -> Result<Box<dyn PriceSource>> {
        if let Some(dir) = &self.data_dir {
            if !dir.is_dir() {
                bail!("data directory not found: {}", dir.display());
            }
            return Ok(Box::new(CsvDirSource::new(dir)));
        }
        if !self.synthetic {
            bail!("one of --data-dir or --synthetic is required");
        }

        let mut source = SyntheticSource::new(self.seed).with_bar_count(self.bars);
        if let Some(start) = &self.start {
            source = source.with_start(NaiveDate::parse_from_str(start, "%Y-%m-%d")?);
        }
        Ok(Box::new(source))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            config,
            source,
            rank_by,
            output,
        } => run_screen(config.as_deref(), &source, rank_by, output.as_deref()),
        Commands::Universe { output } => run_universe(output.as_deref()),
        Commands::Inspect {
            symbols,
            config,
            source,
        } => run_inspect(&symbols, config.as_deref(), &source),
    }
}

fn load_config(path: Option<&Path>) -> Result<ScreenConfig> {
    let config = match path {
        Some(path) => ScreenConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ScreenConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn run_screen(
    config_path: Option<&Path>,
    source_args: &SourceArgs,
    rank_by: Option<RankKey>,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let universe = source_args.universe()?;
    let source = source_args.price_source()?;

    info!(
        instruments = universe.len(),
        source = source.name(),
        criteria = %config.criteria.fingerprint(),
        "starting screen"
    );

    let mut report = config
        .screener()
        .screen_universe(&universe, source.as_ref(), &config.criteria, None)?;

    if let Some(key) = rank_by.or(config.run.rank_by) {
        rank(&mut report.results, key, config.run.descending);
    }

    emit(&serde_json::to_string_pretty(&report)?, output)
}

fn run_universe(output: Option<&Path>) -> Result<()> {
    let text = StaticUniverse::default_us().to_toml()?;
    emit(&text, output)
}

fn run_inspect(
    symbols: &[String],
    config_path: Option<&Path>,
    source_args: &SourceArgs,
) -> Result<()> {
    let config = load_config(config_path)?;
    let universe = source_args.universe()?;
    let source = source_args.price_source()?;
    let screener = config.screener();

    let mut inspections = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let symbol = symbol.to_ascii_uppercase();
        let meta = match universe.get(&symbol) {
            Some(meta) => meta.clone(),
            None => {
                warn!(symbol = %symbol, "not in universe, inspecting without metadata");
                InstrumentMeta::new(symbol.as_str(), "Unknown")
            }
        };
        let series = source
            .fetch(&symbol)
            .with_context(|| format!("fetching {symbol}"))?;
        inspections.push(screener.inspect(&meta, &series, &config.criteria)?);
    }

    println!("{}", serde_json::to_string_pretty(&inspections)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn data_dir_conflicts_with_synthetic() {
        let parsed = Cli::try_parse_from([
            "screener",
            "screen",
            "--data-dir",
            "data",
            "--synthetic",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn screen_requires_a_price_source() {
        let cli = Cli::try_parse_from(["screener", "screen"]).unwrap();
        let Commands::Screen { source, .. } = cli.command else {
            panic!("expected screen command");
        };
        assert!(source.price_source().is_err());
    }

    #[test]
    fn rank_key_parses_from_flag() {
        let cli =
            Cli::try_parse_from(["screener", "screen", "--synthetic", "--rank-by", "ppo-slope"])
                .unwrap();
        let Commands::Screen { rank_by, source, .. } = cli.command else {
            panic!("expected screen command");
        };
        assert_eq!(rank_by, Some(RankKey::PpoSlope));
        assert_eq!(source.seed, 42);
        assert!(source.price_source().is_ok());
    }
}
