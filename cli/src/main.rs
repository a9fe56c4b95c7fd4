use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use innkeep_kernel::config::LedgerConfig;
use innkeep_kernel::desk::FrontDesk;

mod commands;
mod render;
mod shell;

use commands::{execute, Command, Outcome};

/// Innkeep front desk
#[derive(Parser, Debug)]
#[command(name = "innkeep")]
#[command(about = "Hotel guest and booking records in flat files", long_about = None)]
struct Cli {
    /// Path to config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory that relative store paths resolve against
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    pub fn render(self, outcome: &Outcome) -> Result<String> {
        Ok(match self {
            Format::Text => render::text(outcome),
            Format::Json => serde_json::to_string_pretty(outcome)?,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "innkeep=warn,innkeep_kernel=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    // ----------------------------
    // Load config
    // ----------------------------
    let config = if let Some(path) = &cli.config {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        LedgerConfig::from_json(&data)?
    } else {
        LedgerConfig::default_config()
    };

    let mut desk = FrontDesk::open(&config, cli.data_dir.as_deref());

    // ----------------------------
    // Dispatch
    // ----------------------------
    if let Command::Shell = cli.command {
        let stdin = io::stdin();
        return shell::run(&mut desk, cli.format, stdin.lock(), io::stdout());
    }

    let outcome = execute(&mut desk, cli.command)?;
    println!("{}", cli.format.render(&outcome)?);

    Ok(())
}
