use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "luna", version, about = "Luna cycle tracker CLI")]
struct Cli {
    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long, global = true)]
    date: Option<String>,
    /// Shift the reference date by whole days (negative for the past)
    #[arg(long, global = true, allow_hyphen_values = true, default_value = "0")]
    shift: i64,
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Phase, cycle day and today's insight
    Status {
        /// Ask the remote insight provider (falls back to local phrases)
        #[arg(long)]
        ai: bool,
    },
    /// Record period start or end
    Period {
        #[command(subcommand)]
        action: commands::period::PeriodAction,
    },
    /// Add one love tap for the reference date
    Love,
    /// Toggle the intimacy mark for the reference date
    Intimacy,
    /// Daily log entries
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Month calendar with period days and marks
    Calendar {
        /// Month to show (YYYY-MM); defaults to the reference month
        #[arg(long)]
        month: Option<String>,
        /// Months to move from the selected month
        #[arg(long, allow_hyphen_values = true, default_value = "0")]
        offset: i32,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LUNA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = Context::new(cli.date.as_deref(), cli.shift, cli.json).and_then(|ctx| {
        match cli.command {
            Commands::Status { ai } => commands::status::run(&ctx, ai),
            Commands::Period { action } => commands::period::run(&ctx, action),
            Commands::Love => commands::marks::love(&ctx),
            Commands::Intimacy => commands::marks::intimacy(&ctx),
            Commands::Log { action } => commands::log::run(&ctx, action),
            Commands::Calendar { month, offset } => {
                commands::calendar::run(&ctx, month.as_deref(), offset)
            }
            Commands::Config { action } => commands::config::run(&ctx, action),
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
