use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tablecore_core::config::Config;
use tablecore_core::logging::init_logging_with_config;
use tablecore_core::LocalStore;
use tracing::info;

mod script;

#[derive(Parser, Debug)]
#[command(name = "tablecore")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,

    /// Configuration file (TOML); defaults to ./tablecore.toml when present,
    /// environment variables otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a store script, one operation per line ('-' reads stdin)
    Run {
        /// Path to the script
        script: PathBuf,
    },
    /// Run the built-in Person walkthrough
    Demo,
}

fn load_config(args: &Args) -> Result<Config> {
    let fallback = Config::default_path();
    let path = match &args.config {
        Some(path) => Some(path.as_path()),
        None => fallback.exists().then_some(fallback.as_path()),
    };
    let mut config = match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::from_env().context("failed to load config from environment")?,
    };

    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.json_format = true;
    }
    config.validate()?;
    Ok(config)
}

fn read_script(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).context("failed to read script from stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read script {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    init_logging_with_config(config.logging.to_log_config()?)?;
    tablecore_core::metrics::init_metrics();

    let store = LocalStore::with_config(config.store);
    let source = match &args.command {
        Command::Run { script } => read_script(script)?,
        Command::Demo => script::DEMO_SCRIPT.to_string(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let executed = script::run_script(&source, &store, &mut out)?;

    info!(executed, "script finished");
    Ok(())
}
