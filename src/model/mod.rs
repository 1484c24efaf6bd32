//! Domain model types (pure).
//!
//! All types in this module are plain data shared by the core and the shell.

pub mod endpoint;
pub mod error;
pub mod event;
pub mod key_action;

// Re-export for convenience
pub use endpoint::{Endpoint, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{ConnectError, ExportError};
pub use event::{PointerButton, ScopeEvent, WheelDirection};
pub use key_action::ScopeAction;
