use std::time::Instant;

use anyhow::{Context, Result};
use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{self, RunConfig, Settings, SkipReason};
use crate::extraction::fetch::PageFetcher;
use crate::extraction::parse::KeywordExtractor;
use crate::extraction::types::RunSummary;
use crate::extraction::ExtractionRunner;
use crate::output::types::Meta;
use crate::sheets::auth::ServiceAccountTokens;
use crate::sheets::credentials::load_service_account_key;
use crate::sheets::google::{GoogleSheetsClient, DEFAULT_API_TIMEOUT};
use crate::telemetry::{self, ctx::LogCtx};
use crate::telemetry::ops::extract::{Extract, Phase as ExtractPhase};

/// How a run ended. Only an `Err` out of [`run`] fails the process.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(RunSummary),
    Skipped(SkipReason),
    /// Credentials or spreadsheet access failed; enrichment is best-effort.
    Degraded(anyhow::Error),
}

impl RunOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Completed(_) | RunOutcome::Skipped(_) | RunOutcome::Degraded(_) => 0,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            RunOutcome::Completed(_) => "completed",
            RunOutcome::Skipped(_) => "skipped",
            RunOutcome::Degraded(_) => "degraded",
        }
    }
}

pub async fn run(settings: Settings) -> Result<RunOutcome> {
    let started = Instant::now();
    let run_id = Uuid::new_v4().to_string();
    let log = telemetry::extract();
    let root = log.root_span_kv([
        ("run_id", run_id.clone()),
        ("spreadsheet_id", settings.spreadsheet_id.clone()),
        ("dry_run", settings.dry_run.to_string()),
        ("timeout_ms", settings.fetch_timeout.as_millis().to_string()),
    ]);

    let outcome = execute(&log, settings).instrument(root).await?;

    let meta = Meta {
        duration_ms: Some(started.elapsed().as_millis()),
        run_id: Some(run_id),
    };
    report(&log, &outcome, meta)?;
    Ok(outcome)
}

async fn execute(log: &LogCtx<Extract>, settings: Settings) -> Result<RunOutcome> {
    let cfg = {
        let _s = log.span(&ExtractPhase::Config).entered();
        match config::resolve(settings) {
            Ok(cfg) => cfg,
            Err(reason) => {
                log.info_kv(
                    &format!("ℹ️ No spreadsheet configuration found ({reason}). Please check environment variables."),
                    [("reason", reason.as_str().to_string())],
                );
                return Ok(RunOutcome::Skipped(reason));
            }
        }
    };

    let fetcher = PageFetcher::new(cfg.fetch_timeout).context("building page fetch client")?;
    let extractor = KeywordExtractor::new().context("compiling keywords pattern")?;
    let api_http = HttpClient::builder()
        .timeout(DEFAULT_API_TIMEOUT)
        .build()
        .context("building sheets api client")?;

    match enrich(&cfg, api_http, fetcher, extractor).await {
        Ok(summary) => Ok(RunOutcome::Completed(summary)),
        Err(err) => {
            log.warn_kv(
                &format!("⚠️ Could not update spreadsheet: {err:#}"),
                [("spreadsheet_id", cfg.spreadsheet_id.clone()), ("error", format!("{err:#}"))],
            );
            Ok(RunOutcome::Degraded(err))
        }
    }
}

async fn enrich(
    cfg: &RunConfig,
    api_http: HttpClient,
    fetcher: PageFetcher,
    extractor: KeywordExtractor,
) -> Result<RunSummary> {
    let key = load_service_account_key(&cfg.credentials_path).await?;
    let tokens = ServiceAccountTokens::new(key).await?;
    let sheets = GoogleSheetsClient::new(api_http, &cfg.sheets_api_base, Box::new(tokens))?;

    let runner = ExtractionRunner::new(&sheets, fetcher, extractor);
    let summary = runner
        .run(&cfg.spreadsheet_id, cfg.dry_run)
        .await
        .with_context(|| format!("spreadsheet {}", cfg.spreadsheet_id))?;
    Ok(summary)
}

fn report(log: &LogCtx<Extract>, outcome: &RunOutcome, meta: Meta) -> Result<()> {
    if let RunOutcome::Completed(summary) = outcome {
        if summary.written {
            log.info("✅ Spreadsheet updated successfully!");
        }
    }
    if !crate::output::config::json_mode() {
        return Ok(());
    }
    match outcome {
        RunOutcome::Completed(summary) if !summary.written => log.plan(summary, Some(meta)),
        RunOutcome::Completed(summary) => log.result(summary, Some(meta)),
        RunOutcome::Skipped(reason) => log.result(
            &json!({ "status": outcome.status(), "reason": reason.as_str() }),
            Some(meta),
        ),
        RunOutcome::Degraded(err) => log.result(
            &json!({ "status": outcome.status(), "error": format!("{err:#}") }),
            Some(meta),
        ),
    }
}
