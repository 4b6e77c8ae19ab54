//! # Mock Framework
//!
//! Utilities for testing clients and collaborators in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then helpers
//! like [`expect_create`] to assert the requests a caller produces. The
//! collaborator fakes ([`StubRemote`], [`RecordingNotifier`],
//! [`FailingStorage`]) substitute for the real boundaries in actor and
//! system tests.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::clients::UserClient;
use crate::domain::{Address, UserDraft, UserRecord};
use crate::error::{FetchError, StorageError, UserError};
use crate::messages::{ServiceResponse, UserRequest};
use crate::notify::Notifier;
use crate::remote::RemoteSource;
use crate::storage::Storage;

/// Creates a mock client and a receiver for asserting requests.
///
/// Instead of spinning up a full `UserService`, tests of caller logic get a
/// client whose requests arrive on a channel the test controls, so the
/// service's behavior (success, failure, delays) can be simulated
/// deterministically.
pub fn create_mock_client(buffer_size: usize) -> (UserClient, mpsc::Receiver<UserRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (UserClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(UserDraft, ServiceResponse<UserRecord, UserError>)> {
    match receiver.recv().await {
        Some(UserRequest::CreateUser { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(u32, ServiceResponse<Option<UserRecord>, UserError>)> {
    match receiver.recv().await {
        Some(UserRequest::GetUser { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// A fully populated record for seeding tests.
pub fn sample_record(id: u32, name: &str) -> UserRecord {
    UserRecord::from_draft(
        id,
        UserDraft {
            name: name.into(),
            email: "someone@example.com".into(),
            phone: "0123456789".into(),
            website: None,
            address: Address {
                street: "1 Main St".into(),
                city: "Springfield".into(),
            },
            company: None,
        },
    )
}

/// Remote directory fake: either serves a fixed list or fails every call.
/// Call counters let tests assert the one-shot contract.
pub struct StubRemote {
    users: Option<Vec<UserRecord>>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl StubRemote {
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        Self {
            users: Some(users),
            list_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            users: None,
            list_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteSource for StubRemote {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match &self.users {
            Some(users) => Ok(users.clone()),
            None => Err(FetchError::Status(500)),
        }
    }

    async fn fetch_user(&self, id: u32) -> Result<UserRecord, FetchError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        match &self.users {
            Some(users) => users
                .iter()
                .find(|user| user.id == id)
                .cloned()
                .ok_or(FetchError::NotFound),
            None => Err(FetchError::Status(500)),
        }
    }
}

/// Notifier fake that records every notice for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Storage fake whose writes always fail, for exercising rollback paths.
pub struct FailingStorage;

impl Storage for FailingStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(io::Error::other("disk unavailable")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task = tokio::spawn(async move {
            let draft = UserDraft {
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
                phone: "0123456789".to_string(),
                ..UserDraft::default()
            };
            client.create_user(draft).await
        });

        let (draft, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(draft.name, "Test User");
        responder
            .send(Ok(UserRecord::from_draft(1, draft)))
            .unwrap();

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.username, "USER-Test-User");
    }

    #[tokio::test]
    async fn test_mock_get() {
        let (client, mut receiver) = create_mock_client(10);

        let get_task = tokio::spawn(async move { client.get_user(5).await });

        let (id, responder) = expect_get(&mut receiver)
            .await
            .expect("Expected Get request");
        assert_eq!(id, 5);
        responder.send(Ok(None)).unwrap();

        assert_eq!(get_task.await.unwrap().unwrap(), None);
    }
}
