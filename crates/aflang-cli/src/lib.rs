//! Library crate backing the `aflang` binary. `main.rs` stays a thin
//! delegate to [`run`]; everything else lives here so it is covered by the
//! crate's own test suite as well as the `tests/` integration suite.

mod config;
mod confusables;
mod demo_functions;
mod error;
mod framing;

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use aflang_eval::Evaluator;
use config::Config;
use confusables::ConfusableTable;

/// Evaluates filter-language expressions against a NUL-delimited request
/// stream, read from stdin or from a single request file.
#[derive(Parser, Debug)]
#[command(name = "aflang")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Filter expression evaluator", long_about = None)]
struct Cli {
    /// Path to a single request file. Omit to read a stream of requests
    /// from stdin until EOF.
    request_file: Option<PathBuf>,

    /// Path to a TOML configuration file.
    #[arg(short, long, env = "AFLANG_CONFIG")]
    config: Option<PathBuf>,

    /// Log verbosity filter, e.g. "info", "debug", "aflang_eval=trace".
    #[arg(long, env = "AFLANG_LOG")]
    log_level: Option<String>,

    /// Maximum AST node visits per evaluation before aborting with
    /// `ResourceExhausted`.
    #[arg(long)]
    budget_steps: Option<u64>,

    /// Maximum wall-clock milliseconds per evaluation before aborting.
    #[arg(long)]
    budget_millis: Option<u64>,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level))?;

    let table = match &config.confusable_table {
        Some(path) => ConfusableTable::load(path)?,
        None => ConfusableTable::empty(),
    };

    let budget_steps = cli.budget_steps.or(config.budget_steps);
    let budget_millis = cli.budget_millis.or(config.budget_millis);
    let mut evaluator = Evaluator::new();
    if budget_steps.is_some() || budget_millis.is_some() {
        evaluator = evaluator.with_budget(budget_steps, budget_millis);
    }
    demo_functions::register(&mut evaluator, table);

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    match cli.request_file {
        Some(path) => {
            let file = File::open(&path)?;
            let mut reader = BufReader::new(file);
            framing::run_loop(&mut reader, &mut writer, &mut evaluator)?;
        }
        None => {
            let stdin = io::stdin();
            let mut reader = stdin.lock();
            framing::run_loop(&mut reader, &mut writer, &mut evaluator)?;
        }
    }
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    Ok(match path {
        Some(p) => Config::load_from_path(p)?,
        None => Config::load()?,
    })
}

fn init_logging(filter: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_no_arguments() {
        let cli = Cli::parse_from(["aflang"]);
        assert!(cli.request_file.is_none());
    }

    #[test]
    fn parses_request_file_positional() {
        let cli = Cli::parse_from(["aflang", "requests.bin"]);
        assert_eq!(cli.request_file, Some(PathBuf::from("requests.bin")));
    }

    #[test]
    fn parses_budget_flags() {
        let cli = Cli::parse_from(["aflang", "--budget-steps", "1000", "--budget-millis", "50"]);
        assert_eq!(cli.budget_steps, Some(1000));
        assert_eq!(cli.budget_millis, Some(50));
    }

    #[test]
    fn parses_log_level_flag() {
        let cli = Cli::parse_from(["aflang", "--log-level", "debug"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn parses_config_flag() {
        let cli = Cli::parse_from(["aflang", "--config", "/tmp/aflang.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/aflang.toml")));
    }
}
