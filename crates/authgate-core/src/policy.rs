//! Sensitive-mode disclosure policy.
//!
//! Consulted at error-construction time so the precision trade-off lives in
//! one auditable place instead of being branched inside every method.

use crate::config::Sensitive;
use crate::protocol::{LoginStatus, RegisterStatus};

/// Which register uniqueness check collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterConflict {
    Email,
    Username,
}

/// Why a login attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRejection {
    UnknownUser,
    WrongPassword,
}

/// Decides how much error precision leaves the engine.
///
/// With `api` set, distinct business failures that would let a caller
/// enumerate accounts are merged into one ambiguous status. With `logs`
/// set, the same masking applies to log lines.
#[derive(Debug, Clone, Copy)]
pub struct DisclosurePolicy {
    api: bool,
    logs: bool,
}

impl DisclosurePolicy {
    pub fn new(sensitive: &Sensitive) -> Self {
        Self {
            api: sensitive.api,
            logs: sensitive.logs,
        }
    }

    /// Status for a duplicate email/username during registration.
    pub fn register_conflict(&self, conflict: RegisterConflict) -> RegisterStatus {
        if self.api {
            return RegisterStatus::LoginTaken;
        }
        match conflict {
            RegisterConflict::Email => RegisterStatus::EmailTaken,
            RegisterConflict::Username => RegisterStatus::UsernameTaken,
        }
    }

    /// Status for a failed credential check during login.
    pub fn login_rejection(&self, rejection: LoginRejection) -> LoginStatus {
        if self.api {
            return LoginStatus::BadCredentials;
        }
        match rejection {
            LoginRejection::UnknownUser => LoginStatus::UnknownUser,
            LoginRejection::WrongPassword => LoginStatus::WrongPassword,
        }
    }

    /// Pick the log line: precise by default, masked under `sensitive.logs`.
    pub fn log_reason<'a>(&self, precise: &'a str, masked: &'a str) -> &'a str {
        if self.logs { masked } else { precise }
    }
}
