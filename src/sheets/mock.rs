use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{Rows, SheetsClient, SheetsError, ValueInputOption};

#[derive(Clone, Debug, PartialEq)]
pub enum SheetsCall {
    Read { spreadsheet_id: String, range: String },
    Write { spreadsheet_id: String, range: String, mode: ValueInputOption, rows: Rows },
}

/// In-memory spreadsheet: serves fixed rows for every read and records calls.
#[derive(Debug, Default)]
pub struct MockSheets {
    rows: Rows,
    fail_reads: bool,
    fail_writes: bool,
    calls: Mutex<Vec<SheetsCall>>,
}

impl MockSheets {
    pub fn with_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: urls.into_iter().map(|u| vec![u.into()]).collect(),
            ..Self::default()
        }
    }

    pub fn with_rows(rows: Rows) -> Self {
        Self { rows, ..Self::default() }
    }

    pub fn failing_reads() -> Self {
        Self { fail_reads: true, ..Self::default() }
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn calls(&self) -> Vec<SheetsCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<(String, ValueInputOption, Rows)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SheetsCall::Write { range, mode, rows, .. } => Some((range, mode, rows)),
                SheetsCall::Read { .. } => None,
            })
            .collect()
    }
}

fn permission_denied() -> SheetsError {
    SheetsError::Api {
        status: StatusCode::FORBIDDEN,
        message: "The caller does not have permission".into(),
    }
}

#[async_trait]
impl SheetsClient for MockSheets {
    async fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<Rows, SheetsError> {
        self.calls.lock().unwrap().push(SheetsCall::Read {
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
        });
        if self.fail_reads {
            return Err(permission_denied());
        }
        Ok(self.rows.clone())
    }

    async fn write_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
        mode: ValueInputOption,
        rows: Rows,
    ) -> Result<(), SheetsError> {
        self.calls.lock().unwrap().push(SheetsCall::Write {
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
            mode,
            rows,
        });
        if self.fail_writes {
            return Err(permission_denied());
        }
        Ok(())
    }
}
