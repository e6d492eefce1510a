//! authgate-server — the server-side method pipeline of the authgate
//! authentication engine.
//!
//! [`AuthServer`] implements validate, register, login, logout, refresh
//! and check over pluggable collaborators: use events for every storage,
//! crypto and validation step, intercept events as veto gates before each
//! commit. [`memory::MemoryStore`] is a complete in-process collaborator
//! for tests and demos.

pub mod memory;
mod methods;
pub mod server;
pub mod token;

pub use server::AuthServer;
pub use token::TokenError;
