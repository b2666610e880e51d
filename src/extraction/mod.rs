use tracing::Instrument;

use crate::sheets::{SheetsClient, SheetsError, ValueInputOption, RESULT_RANGE, URL_RANGE};
use crate::telemetry::{self, ctx::LogCtx};
use crate::telemetry::ops::extract::{Extract, Phase as ExtractPhase};

pub mod fetch;
pub mod parse;
pub mod types;

use fetch::{FetchError, PageFetcher};
use parse::KeywordExtractor;
use types::{ResultRow, RowReport, RunSummary, StatusCounts};

/// Reads URLs from column A, fetches them one by one in sheet order and
/// writes `[keywords, status, detail]` back to columns B–D in a single call.
pub struct ExtractionRunner<'a> {
    sheets: &'a dyn SheetsClient,
    fetcher: PageFetcher,
    extractor: KeywordExtractor,
    log: LogCtx<Extract>,
}

impl<'a> ExtractionRunner<'a> {
    pub fn new(
        sheets: &'a dyn SheetsClient,
        fetcher: PageFetcher,
        extractor: KeywordExtractor,
    ) -> Self {
        Self { sheets, fetcher, extractor, log: telemetry::extract() }
    }

    pub async fn read_urls(&self, spreadsheet_id: &str) -> Result<Vec<String>, SheetsError> {
        let rows = self.sheets.read_range(spreadsheet_id, URL_RANGE).await?;
        // A row with no first cell stays in place so results line up with the sheet.
        Ok(rows
            .into_iter()
            .map(|row| row.into_iter().next().unwrap_or_default())
            .collect())
    }

    pub async fn process_url(&self, url: &str) -> ResultRow {
        let fetched = self
            .fetcher
            .fetch_page(url)
            .instrument(self.log.span_kv(&ExtractPhase::Fetch, [("url", url.to_string())]))
            .await;
        let html = match fetched {
            Ok(html) => html,
            Err(FetchError::Status(code)) => return ResultRow::http_failure(code),
            Err(FetchError::Transport(msg)) => return ResultRow::error(msg),
        };

        let _s = self.log.span(&ExtractPhase::Parse).entered();
        match self.extractor.extract_keywords(&html) {
            Some(keywords) => ResultRow::success(keywords),
            None => ResultRow::no_keywords(),
        }
    }

    /// Exactly one row per input URL, in input order.
    pub async fn process_all(&self, urls: &[String]) -> Vec<ResultRow> {
        let mut results = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            let row = self.process_url(url).await;
            self.log.row_outcome(i, url, row.status.as_str(), &row.detail);
            results.push(row);
        }
        results
    }

    pub async fn write_results(
        &self,
        spreadsheet_id: &str,
        results: &[ResultRow],
    ) -> Result<(), SheetsError> {
        let rows = results.iter().cloned().map(ResultRow::into_cells).collect();
        self.sheets
            .write_range(spreadsheet_id, RESULT_RANGE, ValueInputOption::Raw, rows)
            .await
    }

    /// Full pass over the sheet. With `dry_run` the results are computed but not written.
    pub async fn run(&self, spreadsheet_id: &str, dry_run: bool) -> Result<RunSummary, SheetsError> {
        let urls = self
            .read_urls(spreadsheet_id)
            .instrument(self.log.span_kv(&ExtractPhase::ReadUrls, [("range", URL_RANGE.to_string())]))
            .await?;
        self.log.info_kv(&format!("🔗 Found {} URLs", urls.len()), [("urls", urls.len().to_string())]);

        let total = urls.len();
        let results = self.process_all(&urls).await;
        debug_assert_eq!(results.len(), total);

        let counts = StatusCounts::tally(&results);
        self.log.totals(total, counts.success, counts.failed, counts.no_keywords, counts.errors);

        if dry_run {
            self.log.info(format!("📝 Dry run — {} rows not written to {}", results.len(), RESULT_RANGE));
        } else {
            self.write_results(spreadsheet_id, &results)
                .instrument(self.log.span_kv(
                    &ExtractPhase::WriteResults,
                    [("range", RESULT_RANGE.to_string()), ("rows", results.len().to_string())],
                ))
                .await?;
            self.log.info("📊 Sheet updated with meta keywords data");
        }

        let rows = urls
            .into_iter()
            .zip(results)
            .map(|(url, row)| RowReport { url, row })
            .collect();
        Ok(RunSummary {
            spreadsheet_id: spreadsheet_id.to_string(),
            urls: total,
            counts,
            written: !dry_run,
            rows,
        })
    }
}
