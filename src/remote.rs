//! Remote fallback source: the public placeholder API.
//!
//! One-shot fetches only. No authentication, no pagination, no retries; a
//! failure is reported once and the caller decides what to do without it.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::domain::UserRecord;
use crate::error::FetchError;

pub const PLACEHOLDER_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Opaque boundary to the remote user directory.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetches the full user list (list context).
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError>;

    /// Fetches a single user by id (detail context).
    async fn fetch_user(&self, id: u32) -> Result<UserRecord, FetchError>;
}

/// `RemoteSource` backed by `jsonplaceholder.typicode.com` (or any server
/// speaking the same shape, which is what the tests point it at).
pub struct PlaceholderApi {
    http: reqwest::Client,
    base_url: String,
}

impl PlaceholderApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for PlaceholderApi {
    fn default() -> Self {
        Self::new(PLACEHOLDER_BASE_URL)
    }
}

#[async_trait]
impl RemoteSource for PlaceholderApi {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        let url = format!("{}/users", self.base_url);
        debug!(%url, "Fetching user list");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.json::<Vec<UserRecord>>().await?)
    }

    async fn fetch_user(&self, id: u32) -> Result<UserRecord, FetchError> {
        let url = format!("{}/users/{}", self.base_url, id);
        debug!(%url, "Fetching user detail");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.json::<UserRecord>().await?)
    }
}
