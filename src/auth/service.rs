use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use super::store::{AuthState, AuthStore};
use crate::clients::AuthClient;
use crate::domain::User;
use crate::error::AuthError;
use crate::messages::{AuthRequest, ServiceResponse};

/// Session actor. Owns the signed-in user and publishes every change to the
/// shared [`AuthStore`].
pub struct AuthService {
    receiver: mpsc::Receiver<AuthRequest>,
    store: AuthStore,
    session: Option<User>,
}

impl AuthService {
    pub fn new(buffer_size: usize, store: AuthStore) -> (Self, AuthClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            store,
            session: None,
        };
        (service, AuthClient::new(sender))
    }

    #[instrument(name = "auth_service", skip(self))]
    pub async fn run(mut self) {
        info!("AuthService starting");
        // No persisted session to restore, so status is known right away.
        self.store.publish(AuthState::resolved(self.session.clone()));

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                AuthRequest::Login { user, respond_to } => {
                    self.handle_login(user, respond_to);
                }
                AuthRequest::Logout { respond_to } => {
                    self.handle_logout(respond_to);
                }
                AuthRequest::Me { respond_to } => {
                    self.handle_me(respond_to);
                }
                AuthRequest::Shutdown => {
                    info!("AuthService shutting down");
                    break;
                }
            }
        }

        info!("AuthService stopped");
    }

    #[instrument(fields(user_id = %user.id), skip(self, user, respond_to))]
    fn handle_login(&mut self, user: User, respond_to: ServiceResponse<(), AuthError>) {
        info!("User signed in");
        self.session = Some(user);
        self.store.publish(AuthState::resolved(self.session.clone()));
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_logout(&mut self, respond_to: ServiceResponse<(), AuthError>) {
        if let Some(user) = self.session.take() {
            info!(user_id = %user.id, "User signed out");
        }
        self.store.publish(AuthState::resolved(None));
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_me(&self, respond_to: ServiceResponse<User, AuthError>) {
        debug!("Processing me request");
        let result = self.session.clone().ok_or(AuthError::Unauthenticated);
        let _ = respond_to.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_me_logout_round() {
        let store = AuthStore::new();
        let (service, client) = AuthService::new(8, store.clone());
        let handle = tokio::spawn(service.run());

        assert_eq!(client.me().await, Err(AuthError::Unauthenticated));

        let user = User::new("u1", "fan@example.com");
        client.login(user.clone()).await.unwrap();
        assert_eq!(client.me().await, Ok(user.clone()));
        assert_eq!(store.current(), AuthState::resolved(Some(user)));

        client.logout().await.unwrap();
        assert_eq!(client.me().await, Err(AuthError::Unauthenticated));
        assert_eq!(store.current(), AuthState::resolved(None));

        client.shutdown().await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_startup_resolves_loading_state() {
        let store = AuthStore::new();
        let mut sub = store.subscribe();
        assert!(sub.next().await.unwrap().is_loading);

        let (service, client) = AuthService::new(8, store.clone());
        tokio::spawn(service.run());

        assert_eq!(sub.next().await, Some(AuthState::resolved(None)));
        client.shutdown().await.unwrap();
    }
}
