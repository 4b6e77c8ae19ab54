use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::domain::{UserDraft, UserPatch, UserRecord};
use crate::error::UserError;
use crate::messages::UserRequest;

/// Generate client methods with oneshot channel boilerplate and automatic
/// tracing.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

/// Client for interacting with the user service actor. Cheap to clone;
/// dropping every clone shuts the actor down.
#[derive(Clone)]
pub struct UserClient {
    sender: mpsc::Sender<UserRequest>,
}

impl UserClient {
    pub fn new(sender: mpsc::Sender<UserRequest>) -> Self {
        Self { sender }
    }
}

client_method!(UserClient => fn list_users() -> Vec<UserRecord> as UserRequest::ListUsers, Error = UserError);
client_method!(UserClient => fn search_users(term: String) -> Vec<UserRecord> as UserRequest::SearchUsers, Error = UserError);
client_method!(UserClient => fn get_user(id: u32) -> Option<UserRecord> as UserRequest::GetUser, Error = UserError);
client_method!(UserClient => fn create_user(draft: UserDraft) -> UserRecord as UserRequest::CreateUser, Error = UserError);
client_method!(UserClient => fn update_user(id: u32, patch: UserPatch) -> UserRecord as UserRequest::UpdateUser, Error = UserError);
client_method!(UserClient => fn delete_user(id: u32) -> () as UserRequest::DeleteUser, Error = UserError);
client_method!(UserClient => fn hydrate_users(records: Vec<UserRecord>) -> usize as UserRequest::HydrateUsers, Error = UserError);

#[cfg(test)]
impl UserClient {
    pub async fn user_count(&self) -> Result<usize, UserError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(UserRequest::GetUserCount { respond_to })
            .await
            .map_err(|_| UserError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| UserError::ActorCommunicationError("Actor dropped".to_string()))?
    }
}
