use tracing::{debug, info};

use super::Header;
use super::routes::Route;
use crate::auth::{AuthState, AuthStore, AuthSubscription};
use crate::domain::User;

/// Auth gate for the whole page tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShellState {
    #[default]
    Loading,
    Ready { user: Option<User> },
}

impl ShellState {
    /// Folds one auth notification in. Leaves `Loading` on the first
    /// notification with a known status and never goes back.
    pub fn apply(&mut self, auth: &AuthState) {
        match self {
            ShellState::Loading if auth.is_loading => {
                debug!("Auth status still unknown");
            }
            ShellState::Loading => {
                info!(signed_in = auth.user.is_some(), "Shell ready");
                *self = ShellState::Ready {
                    user: auth.user.clone(),
                };
            }
            ShellState::Ready { user } => {
                *user = auth.user.clone();
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ShellState::Ready { .. })
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            ShellState::Ready { user } => user.as_ref(),
            ShellState::Loading => None,
        }
    }
}

/// What the shell draws for a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellView {
    Loading,
    Page {
        header: Header,
        /// `None` for paths outside the route table.
        route: Option<Route>,
    },
}

/// The app root: one subscription on the shared [`AuthStore`].
#[derive(Debug)]
pub struct AppShell {
    subscription: AuthSubscription,
    state: ShellState,
}

impl AppShell {
    pub fn mount(store: &AuthStore) -> Self {
        Self {
            subscription: store.subscribe(),
            state: ShellState::Loading,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Waits for the next auth notification and applies it.
    /// Returns `false` once the store has gone away.
    pub async fn sync(&mut self) -> bool {
        match self.subscription.next().await {
            Some(auth) => {
                self.state.apply(&auth);
                true
            }
            None => false,
        }
    }

    /// Pumps notifications until the shell is ready.
    pub async fn wait_ready(&mut self) -> &ShellState {
        while !self.state.is_ready() {
            if !self.sync().await {
                break;
            }
        }
        &self.state
    }

    pub fn render(&self, target: &str) -> ShellView {
        if !self.state.is_ready() {
            return ShellView::Loading;
        }
        let path = target.split(['?', '#']).next().unwrap_or(target);
        ShellView::Page {
            header: Header::build(path, self.state.user()),
            route: Route::parse(target),
        }
    }
}
