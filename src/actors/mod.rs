use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::clients::UserClient;
use crate::domain::{UserDraft, UserPatch, UserRecord};
use crate::error::{StorageError, UserError};
use crate::messages::{ServiceResponse, UserRequest};
use crate::notify::Notifier;
use crate::storage::{Storage, USERS_KEY};
use crate::validation::{validate_draft, validate_patch};

// =============================================================================
// USER SERVICE
// =============================================================================

/// Owns the canonical in-memory user list.
///
/// All reads and writes go through this actor, which serializes them on a
/// single task. After every successful mutation the full list is written
/// through to storage, so persisted state and in-memory state never
/// diverge; if the write fails the in-memory change is rolled back and the
/// error returned to the caller.
///
/// Ids come from a monotonic counter seeded past the highest hydrated id,
/// which keeps them unique across the list for the lifetime of the service.
pub struct UserService {
    receiver: mpsc::Receiver<UserRequest>,
    users: Vec<UserRecord>,
    next_id: u32,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
}

impl UserService {
    pub fn new(
        buffer_size: usize,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, UserClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            users: Vec::new(),
            next_id: 1,
            storage,
            notifier,
        };
        let client = UserClient::new(sender);
        (service, client)
    }

    #[instrument(name = "user_service", skip(self))]
    pub async fn run(mut self) {
        info!("UserService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                UserRequest::ListUsers { respond_to } => {
                    self.handle_list_users(respond_to);
                }
                UserRequest::SearchUsers { term, respond_to } => {
                    self.handle_search_users(term, respond_to);
                }
                UserRequest::GetUser { id, respond_to } => {
                    self.handle_get_user(id, respond_to);
                }
                UserRequest::CreateUser { draft, respond_to } => {
                    self.handle_create_user(draft, respond_to);
                }
                UserRequest::UpdateUser {
                    id,
                    patch,
                    respond_to,
                } => {
                    self.handle_update_user(id, patch, respond_to);
                }
                UserRequest::DeleteUser { id, respond_to } => {
                    self.handle_delete_user(id, respond_to);
                }
                UserRequest::HydrateUsers {
                    records,
                    respond_to,
                } => {
                    self.handle_hydrate_users(records, respond_to);
                }
                #[cfg(test)]
                UserRequest::GetUserCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.users.len()));
                }
            }
        }
        info!("UserService stopped");
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_users(&self, respond_to: ServiceResponse<Vec<UserRecord>, UserError>) {
        debug!(count = self.users.len(), "Listing users");
        let _ = respond_to.send(Ok(self.users.clone()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_search_users(
        &self,
        term: String,
        respond_to: ServiceResponse<Vec<UserRecord>, UserError>,
    ) {
        let needle = term.to_lowercase();
        let matches: Vec<UserRecord> = self
            .users
            .iter()
            .filter(|user| user.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        debug!(count = matches.len(), "Search complete");
        let _ = respond_to.send(Ok(matches));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_get_user(&self, id: u32, respond_to: ServiceResponse<Option<UserRecord>, UserError>) {
        let user = self.users.iter().find(|user| user.id == id).cloned();
        let _ = respond_to.send(Ok(user));
    }

    #[instrument(fields(user_name = %draft.name), skip(self, draft, respond_to))]
    fn handle_create_user(
        &mut self,
        draft: UserDraft,
        respond_to: ServiceResponse<UserRecord, UserError>,
    ) {
        info!("Processing create_user request");

        let errors = validate_draft(&draft);
        if !errors.is_empty() {
            warn!(error_count = errors.len(), %errors, "Draft failed validation");
            let _ = respond_to.send(Err(UserError::ValidationError(errors)));
            return;
        }

        let id = self.next_id;
        let record = UserRecord::from_draft(id, draft);
        self.users.push(record.clone());

        if let Err(err) = self.persist() {
            self.users.pop();
            error!(error = %err, "Write-through failed, create rolled back");
            self.notifier.error("Failed to create/update user");
            let _ = respond_to.send(Err(err.into()));
            return;
        }

        self.next_id += 1;
        info!(user_id = id, "User created successfully");
        self.notifier.success("User created successfully");
        let _ = respond_to.send(Ok(record));
    }

    #[instrument(skip(self, patch, respond_to))]
    fn handle_update_user(
        &mut self,
        id: u32,
        patch: UserPatch,
        respond_to: ServiceResponse<UserRecord, UserError>,
    ) {
        info!("Processing update_user request");

        let errors = validate_patch(&patch);
        if !errors.is_empty() {
            warn!(error_count = errors.len(), %errors, "Patch failed validation");
            let _ = respond_to.send(Err(UserError::ValidationError(errors)));
            return;
        }

        let Some(position) = self.users.iter().position(|user| user.id == id) else {
            warn!("Update target not found");
            let _ = respond_to.send(Err(UserError::NotFound(id)));
            return;
        };

        let previous = self.users[position].clone();
        self.users[position].apply_patch(patch);

        if let Err(err) = self.persist() {
            self.users[position] = previous;
            error!(error = %err, "Write-through failed, update rolled back");
            self.notifier.error("Failed to create/update user");
            let _ = respond_to.send(Err(err.into()));
            return;
        }

        info!("User updated successfully");
        self.notifier.success("User updated successfully!");
        let _ = respond_to.send(Ok(self.users[position].clone()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_delete_user(&mut self, id: u32, respond_to: ServiceResponse<(), UserError>) {
        info!("Processing delete_user request");

        // Deleting an id that is not present is a quiet no-op by contract.
        let Some(position) = self.users.iter().position(|user| user.id == id) else {
            warn!("Delete target not found, nothing to do");
            let _ = respond_to.send(Ok(()));
            return;
        };

        let removed = self.users.remove(position);

        if let Err(err) = self.persist() {
            self.users.insert(position, removed);
            error!(error = %err, "Write-through failed, delete rolled back");
            self.notifier.error("Failed to delete user");
            let _ = respond_to.send(Err(err.into()));
            return;
        }

        info!("User deleted successfully");
        self.notifier.success("User deleted successfully!");
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, records, respond_to))]
    fn handle_hydrate_users(
        &mut self,
        records: Vec<UserRecord>,
        respond_to: ServiceResponse<usize, UserError>,
    ) {
        let count = records.len();
        self.users = records;
        // Reseed so freshly created records can never collide with a
        // hydrated id.
        self.next_id = self
            .users
            .iter()
            .map(|user| user.id)
            .max()
            .map_or(1, |max| max + 1);
        info!(count, next_id = self.next_id, "Hydrated user list");
        let _ = respond_to.send(Ok(count));
    }

    fn persist(&self) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&self.users)?;
        self.storage.write(USERS_KEY, &payload)
    }
}
