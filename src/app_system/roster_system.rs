use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use crate::actors::UserService;
use crate::clients::UserClient;
use crate::domain::UserRecord;
use crate::error::HydrateError;
use crate::notify::{LogNotifier, Notifier};
use crate::remote::{PlaceholderApi, RemoteSource, PLACEHOLDER_BASE_URL};
use crate::source::{Source, SourceResolver};
use crate::storage::{FileStorage, Storage};

/// Construction-time knobs for the roster system.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    /// Directory the persisted user list lives in.
    pub storage_path: PathBuf,
    /// Base URL of the placeholder API used as the hydration fallback.
    pub remote_base_url: String,
    /// Channel capacity of the user service mailbox.
    pub buffer_size: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("data"),
            remote_base_url: PLACEHOLDER_BASE_URL.to_string(),
            buffer_size: 32,
        }
    }
}

/// The main application system.
///
/// Responsible for starting the user service, wiring the persistence,
/// remote and notification collaborators together, running the one-shot
/// startup hydration, and handling shutdown.
pub struct RosterSystem {
    pub user_client: UserClient,
    resolver: SourceResolver,
    notifier: Arc<dyn Notifier>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl RosterSystem {
    pub fn new(config: RosterConfig) -> Self {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(config.storage_path.clone()));
        let remote: Arc<dyn RemoteSource> =
            Arc::new(PlaceholderApi::new(config.remote_base_url.clone()));
        let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
        Self::with_collaborators(config, storage, remote, notifier)
    }

    /// Wires the system around externally supplied collaborators. This is
    /// the seam tests use to substitute in-memory fakes.
    pub fn with_collaborators(
        config: RosterConfig,
        storage: Arc<dyn Storage>,
        remote: Arc<dyn RemoteSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (service, user_client) =
            UserService::new(config.buffer_size, storage.clone(), notifier.clone());
        let handle = tokio::spawn(service.run());

        let resolver = SourceResolver::new(storage, remote);

        Self {
            user_client,
            resolver,
            notifier,
            handles: vec![handle],
        }
    }

    /// One-shot startup hydration. On failure the list stays empty, the
    /// user is notified once, and the system keeps running.
    pub async fn hydrate(&mut self) -> Result<Source, HydrateError> {
        match self.resolver.hydrate(&self.user_client).await {
            Ok(source) => Ok(source),
            Err(err) => {
                self.notifier.error("Error fetching users");
                Err(err)
            }
        }
    }

    /// Detail lookup with remote fallback.
    pub async fn resolve_user(&self, id: u32) -> Result<UserRecord, HydrateError> {
        self.resolver.resolve_user(&self.user_client, id).await
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Dropping the last client closes the mailbox, which stops the
        // service loop.
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
