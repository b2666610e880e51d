use std::path::PathBuf;
use std::time::Duration;

/// Sheet used when neither `--spreadsheet-id` nor `SPREADSHEET_ID` is given.
pub const DEFAULT_SPREADSHEET_ID: &str = "1u_6w8LhMj-zg8qQxg71zNRmdzdDVPDm1UKDNj_9IAtg";

/// Raw inputs as gathered from flags and environment.
#[derive(Clone, Debug)]
pub struct Settings {
    pub spreadsheet_id: String,
    pub credentials_path: Option<PathBuf>,
    pub fetch_timeout: Duration,
    pub sheets_api_base: String,
    pub dry_run: bool,
}

/// Everything a run needs, with the required parts known to be present.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub spreadsheet_id: String,
    pub credentials_path: PathBuf,
    pub fetch_timeout: Duration,
    pub sheets_api_base: String,
    pub dry_run: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    MissingSpreadsheetId,
    MissingCredentialsPath,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::MissingSpreadsheetId => "missing-spreadsheet-id",
            SkipReason::MissingCredentialsPath => "missing-credentials-path",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingSpreadsheetId => write!(f, "no spreadsheet id configured"),
            SkipReason::MissingCredentialsPath => {
                write!(f, "GOOGLE_APPLICATION_CREDENTIALS is not set")
            }
        }
    }
}

pub fn resolve(settings: Settings) -> Result<RunConfig, SkipReason> {
    let spreadsheet_id = settings.spreadsheet_id.trim().to_string();
    if spreadsheet_id.is_empty() {
        return Err(SkipReason::MissingSpreadsheetId);
    }
    let credentials_path = settings
        .credentials_path
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(SkipReason::MissingCredentialsPath)?;

    Ok(RunConfig {
        spreadsheet_id,
        credentials_path,
        fetch_timeout: settings.fetch_timeout,
        sheets_api_base: settings.sheets_api_base,
        dry_run: settings.dry_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::fetch::DEFAULT_FETCH_TIMEOUT;
    use crate::sheets::google::DEFAULT_SHEETS_API_BASE;

    fn settings(id: &str, creds: Option<&str>) -> Settings {
        Settings {
            spreadsheet_id: id.to_string(),
            credentials_path: creds.map(PathBuf::from),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            sheets_api_base: DEFAULT_SHEETS_API_BASE.to_string(),
            dry_run: false,
        }
    }

    #[test]
    fn ready_when_both_present() {
        let cfg = resolve(settings(" sheet-1 ", Some("/etc/key.json"))).unwrap();
        assert_eq!(cfg.spreadsheet_id, "sheet-1");
        assert_eq!(cfg.credentials_path, PathBuf::from("/etc/key.json"));
        assert_eq!(cfg.fetch_timeout, Duration::from_millis(10_000));
    }

    #[test]
    fn skip_without_credentials_path() {
        assert_eq!(resolve(settings("sheet-1", None)).unwrap_err(), SkipReason::MissingCredentialsPath);
        assert_eq!(resolve(settings("sheet-1", Some(""))).unwrap_err(), SkipReason::MissingCredentialsPath);
    }

    #[test]
    fn skip_with_blank_spreadsheet_id() {
        assert_eq!(resolve(settings("  ", Some("/etc/key.json"))).unwrap_err(), SkipReason::MissingSpreadsheetId);
    }

    #[test]
    fn default_id_is_not_blank() {
        assert!(resolve(settings(DEFAULT_SPREADSHEET_ID, Some("k.json"))).is_ok());
    }
}
