use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

mod app;
mod config;
mod extraction;
mod output;
mod sheets;
mod telemetry;

use config::{Settings, DEFAULT_SPREADSHEET_ID};
use sheets::google::DEFAULT_SHEETS_API_BASE;

#[derive(Parser)]
#[command(name = "meta-keywords", about = "Fill a spreadsheet's URL list with each page's meta keywords")]
struct Cli {
    /// Spreadsheet to enrich (URLs in A2:A, results written to B2:D)
    #[arg(long, env = "SPREADSHEET_ID")]
    spreadsheet_id: Option<String>,
    /// Service-account key file; the run is skipped when unset
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    credentials: Option<PathBuf>,
    /// Per-page fetch deadline in milliseconds
    #[arg(long, env = "FETCH_TIMEOUT_MS", default_value_t = 10_000)]
    timeout_ms: u64,
    #[arg(long, env = "SHEETS_API_BASE", default_value = DEFAULT_SHEETS_API_BASE)]
    sheets_api: String,
    /// Fetch and extract, but do not write results back
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(usage_exit_code(&err));
        }
    };
    output::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and KEYWORDS_LOG_FORMAT
    telemetry::config::init_tracing();
    let log = telemetry::extract();
    log.info("🚀 Starting meta keywords extraction...");

    let spreadsheet_id = spreadsheet_id_or_default(cli.spreadsheet_id).unwrap_or_else(|default| {
        log.info(format!("Using default spreadsheet {default}"));
        default.to_string()
    });
    let settings = Settings {
        spreadsheet_id,
        credentials_path: cli.credentials,
        fetch_timeout: Duration::from_millis(cli.timeout_ms),
        sheets_api_base: cli.sheets_api,
        dry_run: cli.dry_run,
    };

    match app::run(settings).await {
        Ok(outcome) => {
            log.info(format!("🎉 Meta keywords extraction finished ({})", outcome.status()));
            ExitCode::from(outcome.exit_code())
        }
        Err(err) => {
            log.error(format!("❌ Error in main execution: {err:#}"));
            ExitCode::FAILURE
        }
    }
}

/// `Ok` with the configured id, or `Err` with the default when the id is unset or blank.
fn spreadsheet_id_or_default(configured: Option<String>) -> Result<String, &'static str> {
    configured
        .filter(|id| !id.trim().is_empty())
        .ok_or(DEFAULT_SPREADSHEET_ID)
}

/// Help and version are printed to stdout and succeed; any other parse error is a failure.
fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() { 1 } else { 0 }
}
