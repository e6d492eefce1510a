//! authgate-core — protocol catalog, event registry and response builder
//! of the authgate authentication engine.
//!
//! The server crate consumes this one; transport adapters only need the
//! [`protocol`] and [`response`] modules.

pub mod config;
pub mod error;
pub mod events;
pub mod policy;
pub mod protocol;
pub mod registry;
pub mod response;
pub mod user;

pub use config::{MethodStates, Secrets, Sensitive, ServerConfig};
pub use error::{HookError, HookResult};
pub use events::{GateDecision, InterceptEvents, UseEventName, UseEvents};
pub use protocol::{Method, MethodState, StatusCode};
pub use registry::EventRegistry;
pub use response::{AuthResponse, ErrorType};
pub use user::{StoredUser, TokenPayload};
