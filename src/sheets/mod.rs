use async_trait::async_trait;
use reqwest::StatusCode;

pub mod auth;
pub mod credentials;
pub mod google;
#[cfg(test)]
pub mod mock;

/// Column A below the header row: one URL per row.
pub const URL_RANGE: &str = "A2:A";
/// Columns B–D below the header row: keywords, status, detail.
pub const RESULT_RANGE: &str = "B2:D";

pub type Rows = Vec<Vec<String>>;

/// How the Sheets API interprets written cells. Only raw input is used:
/// cell text is stored as-is and never evaluated as a formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueInputOption {
    Raw,
}

impl ValueInputOption {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
        }
    }
}

#[async_trait]
pub trait SheetsClient: Send + Sync {
    async fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<Rows, SheetsError>;

    async fn write_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
        mode: ValueInputOption,
        rows: Rows,
    ) -> Result<(), SheetsError>;
}

#[derive(Debug)]
pub enum SheetsError {
    InvalidBaseUrl(String),
    Auth(String),
    Http(reqwest::Error),
    Timeout,
    Api { status: StatusCode, message: String },
    Decode(String),
}

impl SheetsError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SheetsError::Timeout
        } else if err.is_decode() {
            SheetsError::Decode(err.to_string())
        } else {
            SheetsError::Http(err)
        }
    }
}

impl std::fmt::Display for SheetsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsError::InvalidBaseUrl(url) => write!(f, "invalid sheets api base url: {url}"),
            SheetsError::Auth(msg) => write!(f, "authentication failed: {msg}"),
            SheetsError::Http(err) => write!(f, "http error: {err}"),
            SheetsError::Timeout => write!(f, "request timed out"),
            SheetsError::Api { status, message } => write!(f, "api error {status}: {message}"),
            SheetsError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for SheetsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SheetsError::Http(err) => Some(err),
            _ => None,
        }
    }
}
