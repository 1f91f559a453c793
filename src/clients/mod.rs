//! Typed handles for the remote data and auth collaborators.

#[macro_use]
mod macros;

pub mod auth_client;
pub mod celebrity_client;
pub mod request_client;

pub use auth_client::*;
pub use celebrity_client::*;
pub use request_client::*;
