//! System orchestration, startup, and shutdown logic.

pub mod logging;
pub mod market_system;

pub use logging::*;
pub use market_system::*;
