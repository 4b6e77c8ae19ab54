use tokio::sync::oneshot;

use crate::domain::{UserDraft, UserPatch, UserRecord};
use crate::error::UserError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed messages for the user service. Each variant carries its parameters
/// and a oneshot channel for the response.
#[derive(Debug)]
pub enum UserRequest {
    ListUsers {
        respond_to: ServiceResponse<Vec<UserRecord>, UserError>,
    },
    SearchUsers {
        term: String,
        respond_to: ServiceResponse<Vec<UserRecord>, UserError>,
    },
    GetUser {
        id: u32,
        respond_to: ServiceResponse<Option<UserRecord>, UserError>,
    },
    CreateUser {
        draft: UserDraft,
        respond_to: ServiceResponse<UserRecord, UserError>,
    },
    UpdateUser {
        id: u32,
        patch: UserPatch,
        respond_to: ServiceResponse<UserRecord, UserError>,
    },
    DeleteUser {
        id: u32,
        respond_to: ServiceResponse<(), UserError>,
    },
    /// Wholesale replacement of the list at startup. Does not write through:
    /// the records just came from a source of truth.
    HydrateUsers {
        records: Vec<UserRecord>,
        respond_to: ServiceResponse<usize, UserError>,
    },
    #[cfg(test)]
    GetUserCount {
        respond_to: ServiceResponse<usize, UserError>,
    },
}
