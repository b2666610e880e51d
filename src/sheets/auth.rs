use std::time::Duration;

use async_trait::async_trait;
use yup_oauth2::authenticator::{Authenticator, DefaultHyperClient, HyperClientBuilder};
use yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey};

use super::google::DEFAULT_API_TIMEOUT;
use super::SheetsError;

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

type DefaultConnector = <DefaultHyperClient as HyperClientBuilder>::Connector;

#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, SheetsError>;
}

/// Service-account tokens for the spreadsheets scope. The authenticator
/// caches and refreshes tokens itself; each exchange is bounded by `timeout`.
pub struct ServiceAccountTokens {
    auth: Authenticator<DefaultConnector>,
    timeout: Duration,
}

impl ServiceAccountTokens {
    pub async fn new(key: ServiceAccountKey) -> Result<Self, SheetsError> {
        let auth = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| SheetsError::Auth(format!("invalid service account key: {e}")))?;
        Ok(Self { auth, timeout: DEFAULT_API_TIMEOUT })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountTokens {
    async fn access_token(&self) -> Result<String, SheetsError> {
        let token = tokio::time::timeout(self.timeout, self.auth.token(&[SPREADSHEETS_SCOPE]))
            .await
            .map_err(|_| SheetsError::Timeout)?
            .map_err(|e| SheetsError::Auth(e.to_string()))?;
        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| SheetsError::Auth("token endpoint returned no access token".to_string()))
    }
}

/// Fixed bearer token, for exercising the REST client without a token endpoint.
#[cfg(test)]
pub struct StaticToken(pub String);

#[cfg(test)]
#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String, SheetsError> {
        Ok(self.0.clone())
    }
}
