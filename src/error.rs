use thiserror::Error;

use crate::actor_framework::StoreError;

/// Failure of a remote data call. Callers treat every fault the same way.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DataError {
    #[error("Remote data error: {0}")]
    Remote(String),
}

impl From<StoreError> for DataError {
    fn from(e: StoreError) -> Self {
        DataError::Remote(e.to_string())
    }
}

/// Errors from the auth collaborator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Not signed in")]
    Unauthenticated,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
