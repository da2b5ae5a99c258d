mod commands;
mod config;
mod main_lib;

use clap::{Parser, Subcommand};
use commands::{run_bulk, run_check, run_watch, BulkArgs, CheckArgs};
use config::Config;
use main_lib::init_tracing;

/// Billing ID tools for allocation forms.
#[derive(Parser)]
#[command(name = "billing-forms", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate billing IDs against the portal, one verdict per ID.
    Check(CheckArgs),
    /// Validate stdin lines as you type them (one line per keystroke snapshot).
    Watch,
    /// Apply "find and replace" or "set to" to rows of an update form.
    Bulk(BulkArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(&config.log_format);

    match cli.command {
        Command::Check(args) => run_check(&config, args).await,
        Command::Watch => run_watch(&config).await,
        Command::Bulk(args) => run_bulk(args),
    }
}
