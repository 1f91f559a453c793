use tokio::sync::oneshot;

use crate::domain::User;
use crate::error::AuthError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Messages understood by [`crate::auth::AuthService`].
#[derive(Debug)]
pub enum AuthRequest {
    Login {
        user: User,
        respond_to: ServiceResponse<(), AuthError>,
    },
    Logout {
        respond_to: ServiceResponse<(), AuthError>,
    },
    Me {
        respond_to: ServiceResponse<User, AuthError>,
    },
    Shutdown,
}
