pub mod celebrity;
pub mod user;
pub mod video_request;

pub use celebrity::*;
pub use user::*;
pub use video_request::*;
