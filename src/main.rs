use anyhow::Result;
use clap::{Parser, Subcommand};

use loanwiz::config::Settings;
use loanwiz::tui::run_tui;
use loanwiz::wizard::Step;

#[derive(Parser)]
#[command(
    name = "loanwiz",
    version,
    about = "Terminal-based three-step loan application wizard",
    long_about = "loanwiz walks an applicant through three form steps \
                  (personal data, address and employment, loan parameters), \
                  validates each step, and submits the application to a \
                  remote service."
)]
struct Cli {
    /// Base URL of the catalog/submission service
    #[arg(long, env = "LOANWIZ_API_URL", global = true)]
    api_url: Option<String>,

    /// Append logs to this file (stderr is owned by the TUI)
    #[arg(long, env = "LOANWIZ_LOG_FILE", global = true)]
    log_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the wizard (default)
    #[command(alias = "ui")]
    Tui {
        /// Step to open with ("1"/"step1" .. "3"/"step3"); entry is guarded,
        /// so an unreachable step falls back to the earliest incomplete one
        #[arg(long, default_value = "step1")]
        step: String,
    },

    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    let settings = Settings::with_base_url(cli.api_url)?;

    match cli.command {
        Some(Commands::Config) => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
        Some(Commands::Tui { step }) => run_tui(settings, Step::parse(&step)),
        None => run_tui(settings, Step::Personal),
    }
}

/// Initialize tracing; without a log file, logging stays off because the
/// terminal is in raw mode
fn init_logging(log_file: Option<&std::path::Path>) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let Some(path) = log_file else {
        return Ok(());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loanwiz=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file),
        )
        .init();

    Ok(())
}
