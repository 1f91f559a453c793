use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::domain::User;

/// What every auth subscriber sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl AuthState {
    /// Session status not yet known.
    pub fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    pub fn resolved(user: Option<User>) -> Self {
        Self {
            user,
            is_loading: false,
        }
    }
}

/// Process-wide auth state with counted subscriptions.
///
/// One store is shared by the shell, the header and any page that needs the
/// user. Each [`AuthSubscription`] holds a slot in the count until dropped.
#[derive(Clone, Debug)]
pub struct AuthStore {
    sender: Arc<watch::Sender<AuthState>>,
    subscribers: Arc<AtomicUsize>,
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(AuthState::loading());
        Self {
            sender: Arc::new(sender),
            subscribers: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replaces the state and wakes every subscriber.
    pub fn publish(&self, state: AuthState) {
        debug!(
            signed_in = state.user.is_some(),
            is_loading = state.is_loading,
            "Publishing auth state"
        );
        self.sender.send_replace(state);
    }

    pub fn current(&self) -> AuthState {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> AuthSubscription {
        let count = self.subscribers.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(subscribers = count, "Auth subscription opened");
        AuthSubscription {
            receiver: self.sender.subscribe(),
            subscribers: Arc::clone(&self.subscribers),
            delivered_initial: false,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.load(Ordering::SeqCst)
    }
}

/// A live listener on the [`AuthStore`]. Dropping it unsubscribes.
#[derive(Debug)]
pub struct AuthSubscription {
    receiver: watch::Receiver<AuthState>,
    subscribers: Arc<AtomicUsize>,
    delivered_initial: bool,
}

impl AuthSubscription {
    /// Next notification. The first call yields the state at subscription time
    /// immediately; later calls wait for a change. `None` once the store is gone.
    pub async fn next(&mut self) -> Option<AuthState> {
        if !self.delivered_initial {
            self.delivered_initial = true;
            return Some(self.receiver.borrow_and_update().clone());
        }
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        let left = self.subscribers.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!(subscribers = left, "Auth subscription closed");
    }
}
