//! Startup hydration: persisted state first, remote fallback second.
//!
//! Whichever source wins is exclusive; there is no merging of local and
//! remote data and no retry on a failed fetch.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::clients::UserClient;
use crate::domain::UserRecord;
use crate::error::HydrateError;
use crate::remote::RemoteSource;
use crate::storage::{Storage, USERS_KEY};

/// Which source the user list was hydrated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Local,
    Remote,
}

/// Observable progress of the one-shot hydration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrateState {
    Idle,
    CheckingLocal,
    FetchingRemote,
    Hydrated(Source),
    Failed,
}

/// Decides, once at startup, whether the user service is populated from
/// persisted state or from the remote directory, and resolves single
/// records for the detail flow afterwards.
pub struct SourceResolver {
    storage: Arc<dyn Storage>,
    remote: Arc<dyn RemoteSource>,
    state: HydrateState,
}

impl SourceResolver {
    pub fn new(storage: Arc<dyn Storage>, remote: Arc<dyn RemoteSource>) -> Self {
        Self {
            storage,
            remote,
            state: HydrateState::Idle,
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> HydrateState {
        self.state
    }

    /// Populates the service. A persisted list wins outright, even an empty
    /// one; the remote is consulted only when nothing was ever persisted.
    /// On failure the service is left empty and the error reported once.
    #[instrument(skip(self, users))]
    pub async fn hydrate(&mut self, users: &UserClient) -> Result<Source, HydrateError> {
        self.state = HydrateState::CheckingLocal;

        let stored = match self.storage.read(USERS_KEY) {
            Ok(stored) => stored,
            Err(err) => {
                self.state = HydrateState::Failed;
                return Err(err.into());
            }
        };

        if let Some(raw) = stored {
            let records: Vec<UserRecord> = match serde_json::from_str(&raw) {
                Ok(records) => records,
                Err(err) => {
                    self.state = HydrateState::Failed;
                    return Err(HydrateError::Corrupt(err));
                }
            };
            let count = match users.hydrate_users(records).await {
                Ok(count) => count,
                Err(err) => {
                    self.state = HydrateState::Failed;
                    return Err(err.into());
                }
            };
            info!(count, "Hydrated from persisted state");
            self.state = HydrateState::Hydrated(Source::Local);
            return Ok(Source::Local);
        }

        self.state = HydrateState::FetchingRemote;
        info!("No persisted state, fetching users from remote");

        let records = match self.remote.fetch_users().await {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "Remote fetch failed, leaving list empty");
                self.state = HydrateState::Failed;
                return Err(err.into());
            }
        };

        let count = match users.hydrate_users(records).await {
            Ok(count) => count,
            Err(err) => {
                self.state = HydrateState::Failed;
                return Err(err.into());
            }
        };
        info!(count, "Hydrated from remote");
        self.state = HydrateState::Hydrated(Source::Remote);
        Ok(Source::Remote)
    }

    /// Detail lookup: the in-memory list first, then a one-shot remote
    /// fetch. A record found remotely is returned as-is, not added to the
    /// list.
    #[instrument(skip(self, users))]
    pub async fn resolve_user(
        &self,
        users: &UserClient,
        id: u32,
    ) -> Result<UserRecord, HydrateError> {
        if let Some(user) = users.get_user(id).await? {
            return Ok(user);
        }
        info!("User not in list, fetching detail from remote");
        self.remote.fetch_user(id).await.map_err(HydrateError::Fetch)
    }
}
