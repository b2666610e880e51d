use std::path::{Path, PathBuf};

use yup_oauth2::ServiceAccountKey;

#[derive(Debug)]
pub enum CredentialsError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: std::io::Error },
}

impl std::fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialsError::Read { path, source } => {
                write!(f, "cannot read credentials file {}: {source}", path.display())
            }
            CredentialsError::Parse { path, source } => {
                write!(f, "cannot parse credentials file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CredentialsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CredentialsError::Read { source, .. } | CredentialsError::Parse { source, .. } => Some(source),
        }
    }
}

/// Service-account key as downloaded from the Google Cloud console. The key
/// holds the private key, so never log it.
pub async fn load_service_account_key(path: &Path) -> Result<ServiceAccountKey, CredentialsError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CredentialsError::Read { path: path.to_path_buf(), source })?;
    yup_oauth2::parse_service_account_key(raw)
        .map_err(|source| CredentialsError::Parse { path: path.to_path_buf(), source })
}
