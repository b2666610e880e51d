use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::auth::TokenProvider;
use super::{Rows, SheetsClient, SheetsError, ValueInputOption};

pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);

/// Google Sheets v4 `spreadsheets.values` over REST.
pub struct GoogleSheetsClient {
    http: HttpClient,
    base_url: Url,
    tokens: Box<dyn TokenProvider>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: &'a Rows,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

impl GoogleSheetsClient {
    pub fn new(
        http: HttpClient,
        base_url: &str,
        tokens: Box<dyn TokenProvider>,
    ) -> Result<Self, SheetsError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| SheetsError::InvalidBaseUrl(base_url.to_string()))?;
        Ok(Self { http, base_url, tokens })
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url, SheetsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SheetsError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", spreadsheet_id, "values", range]);
        Ok(url)
    }

    async fn check(response: Response) -> Result<Response, SheetsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let bytes = response.bytes().await.map_err(SheetsError::from_reqwest)?;
        let message = serde_json::from_slice::<ApiErrorEnvelope>(&bytes)
            .map(|env| env.error.message)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).trim().to_string());
        Err(SheetsError::Api { status, message })
    }
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl SheetsClient for GoogleSheetsClient {
    async fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<Rows, SheetsError> {
        let url = self.values_url(spreadsheet_id, range)?;
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .timeout(DEFAULT_API_TIMEOUT)
            .send()
            .await
            .map_err(SheetsError::from_reqwest)?;
        let parsed: ValueRange = Self::check(response)
            .await?
            .json()
            .await
            .map_err(SheetsError::from_reqwest)?;

        Ok(parsed
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn write_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
        mode: ValueInputOption,
        rows: Rows,
    ) -> Result<(), SheetsError> {
        let url = self.values_url(spreadsheet_id, range)?;
        let token = self.tokens.access_token().await?;
        let body = ValueRangeBody { range, major_dimension: "ROWS", values: &rows };
        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", mode.as_api_str())])
            .json(&body)
            .timeout(DEFAULT_API_TIMEOUT)
            .send()
            .await
            .map_err(SheetsError::from_reqwest)?;
        Self::check(response).await?;
        Ok(())
    }
}
