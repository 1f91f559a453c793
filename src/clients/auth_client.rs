use tokio::sync::mpsc;

use crate::domain::User;
use crate::error::AuthError;
use crate::messages::AuthRequest;

/// Client for the auth collaborator.
///
/// `login` and `logout` only start a flow; callers observe the outcome through
/// [`crate::auth::AuthStore`], not through the return value.
#[derive(Clone, Debug)]
pub struct AuthClient {
    sender: mpsc::Sender<AuthRequest>,
}

impl AuthClient {
    pub fn new(sender: mpsc::Sender<AuthRequest>) -> Self {
        Self { sender }
    }

    pub async fn shutdown(&self) -> Result<(), AuthError> {
        self.sender
            .send(AuthRequest::Shutdown)
            .await
            .map_err(|_| AuthError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(AuthClient => fn login(user: User) -> () as AuthRequest::Login, Error = AuthError);
client_method!(AuthClient => fn logout() -> () as AuthRequest::Logout, Error = AuthError);
client_method!(AuthClient => fn me() -> User as AuthRequest::Me, Error = AuthError);
