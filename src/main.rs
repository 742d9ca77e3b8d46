//! book-extractor command-line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, warn};

use book_extractor::config::{ConfigOverrides, ConfigSource};
use book_extractor::{Config, Pipeline, PipelineSummary, Result, ToExitCode, exit_status};

#[derive(Parser)]
#[command(
    name = "book-extractor",
    about = "Fetch books from an API, keep NJ/CO titles, group them by parent and write a report",
    version
)]
struct Cli {
    /// Path to the JSON settings file [default: appsettings.json].
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override ApiSettings.ApiUrl from the settings file.
    #[arg(long)]
    api_url: Option<String>,

    /// Override the report file path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Always exit 0, printing errors instead of failing.
    #[arg(long)]
    lenient: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = run(&cli).await;
    match &result {
        Ok(summary) => debug!(?summary, "done"),
        Err(e) => error!(code = e.error_code(), "{e}"),
    }
    ExitCode::from(exit_status(&result, cli.lenient))
}

async fn run(cli: &Cli) -> Result<PipelineSummary> {
    let config = load_config(cli).inspect_err(report_error)?;
    let mut pipeline = Pipeline::from_config(&config).inspect_err(report_error)?;

    let mut events = pipeline.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            println!("{event}");
        }
    });

    let result = pipeline.run().await;

    // Dropping the pipeline closes the channel so the printer drains and exits
    drop(pipeline);
    if let Err(e) = printer.await {
        warn!(error = %e, "progress printer task failed");
    }

    result
}

/// Print setup failures; pipeline failures arrive as a `Failed` event
fn report_error(e: &book_extractor::Error) {
    println!("An error occurred: {e}");
}

fn load_config(cli: &Cli) -> Result<Config> {
    let source = ConfigSource::from_arg(cli.config.clone());
    let overrides = ConfigOverrides {
        api_url: cli.api_url.clone(),
        output_path: cli.output.clone(),
    };
    Config::resolve(&source, &overrides)
}
