//! Page shell: auth-driven loading gate, route table, header and toasts.

pub mod nav;
pub mod notification;
pub mod routes;
pub mod state;

pub use nav::{AuthAction, Header};
pub use notification::*;
pub use routes::*;
pub use state::*;
