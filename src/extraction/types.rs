use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RowStatus {
    Success,
    Failed,
    #[serde(rename = "No Keywords")]
    NoKeywords,
    Error,
}

impl RowStatus {
    /// Cell text written to column C.
    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Success => "Success",
            RowStatus::Failed => "Failed",
            RowStatus::NoKeywords => "No Keywords",
            RowStatus::Error => "Error",
        }
    }
}

/// One output row: columns B, C, D for the URL in column A of the same row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub keywords: String,
    pub status: RowStatus,
    pub detail: String,
}

impl ResultRow {
    pub fn success(keywords: impl Into<String>) -> Self {
        Self { keywords: keywords.into(), status: RowStatus::Success, detail: String::new() }
    }

    pub fn http_failure(status: u16) -> Self {
        Self { keywords: String::new(), status: RowStatus::Failed, detail: format!("HTTP {status}") }
    }

    pub fn no_keywords() -> Self {
        Self {
            keywords: String::new(),
            status: RowStatus::NoKeywords,
            detail: "Meta tag not found".to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { keywords: String::new(), status: RowStatus::Error, detail: message.into() }
    }

    pub fn into_cells(self) -> Vec<String> {
        vec![self.keywords, self.status.as_str().to_string(), self.detail]
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RowReport {
    pub url: String,
    #[serde(flatten)]
    pub row: ResultRow,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub success: usize,
    pub failed: usize,
    pub no_keywords: usize,
    pub errors: usize,
}

impl StatusCounts {
    pub fn tally<'a>(rows: impl IntoIterator<Item = &'a ResultRow>) -> Self {
        let mut counts = Self::default();
        for r in rows {
            match r.status {
                RowStatus::Success => counts.success += 1,
                RowStatus::Failed => counts.failed += 1,
                RowStatus::NoKeywords => counts.no_keywords += 1,
                RowStatus::Error => counts.errors += 1,
            }
        }
        counts
    }
}

// Apply/result envelope types
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub spreadsheet_id: String,
    pub urls: usize,
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub written: bool,
    pub rows: Vec<RowReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_follow_column_order() {
        assert_eq!(ResultRow::success("a,b").into_cells(), vec!["a,b", "Success", ""]);
        assert_eq!(ResultRow::http_failure(404).into_cells(), vec!["", "Failed", "HTTP 404"]);
        assert_eq!(ResultRow::no_keywords().into_cells(), vec!["", "No Keywords", "Meta tag not found"]);
        assert_eq!(ResultRow::error("boom").into_cells(), vec!["", "Error", "boom"]);
    }

    #[test]
    fn status_serializes_as_cell_text() {
        let v = serde_json::to_value(RowStatus::NoKeywords).unwrap();
        assert_eq!(v, "No Keywords");
    }

    #[test]
    fn tally_counts_each_status() {
        let rows = vec![
            ResultRow::success("x"),
            ResultRow::success("y"),
            ResultRow::http_failure(500),
            ResultRow::no_keywords(),
        ];
        let c = StatusCounts::tally(&rows);
        assert_eq!(c, StatusCounts { success: 2, failed: 1, no_keywords: 1, errors: 0 });
    }

    #[test]
    fn report_flattens_row_fields() {
        let report = RowReport { url: "https://a.test".into(), row: ResultRow::success("k") };
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["url"], "https://a.test");
        assert_eq!(v["keywords"], "k");
        assert_eq!(v["status"], "Success");
    }
}
