//! Auth collaborator: the session actor and the shared state it publishes.

pub mod service;
pub mod store;

pub use service::*;
pub use store::*;
