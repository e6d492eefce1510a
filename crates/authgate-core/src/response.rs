//! Structured, versioned method responses and the factories that build
//! them.
//!
//! The factories here are the only constructors, which is what keeps the
//! wire invariants true: `error` iff `status != 0`, `intercepted` iff
//! `intercept != 0`, and `data` is `null` whenever `error` is set.

use serde::{Deserialize, Serialize};

use crate::protocol::{SERVER_ERROR_MESSAGE, SERVER_ERROR_STATUS, StatusCode};

/// Which half of the outcome taxonomy a response belongs to.
///
/// `Method` outcomes are enumerated business results; `Server` is the one
/// content-free outcome every collaborator failure collapses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    Method,
    Server,
}

/// The `(status, intercept)` code pair of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codes {
    pub status: u8,
    pub intercept: u32,
}

/// Unified response shape of every method, generic over the method's
/// success payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse<D> {
    pub error: bool,
    pub intercepted: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub codes: Codes,
    pub data: Option<D>,
}

/// Build the success outcome of a method. `status` must be the method's
/// code-0 variant.
pub fn success<S: StatusCode, D>(status: S, data: D) -> AuthResponse<D> {
    AuthResponse {
        error: false,
        intercepted: false,
        error_type: ErrorType::Method,
        message: status.message().to_owned(),
        codes: Codes {
            status: status.code(),
            intercept: 0,
        },
        data: Some(data),
    }
}

/// Build an enumerated method failure with its fixed message.
pub fn failure<S: StatusCode, D>(status: S) -> AuthResponse<D> {
    AuthResponse {
        error: true,
        intercepted: false,
        error_type: ErrorType::Method,
        message: status.message().to_owned(),
        codes: Codes {
            status: status.code(),
            intercept: 0,
        },
        data: None,
    }
}

/// Build the interception outcome (status 9) carrying the gate's sub-code.
pub fn intercepted<S: StatusCode, D>(status: S, intercept_code: u32) -> AuthResponse<D> {
    AuthResponse {
        error: true,
        intercepted: true,
        error_type: ErrorType::Method,
        message: status.message().to_owned(),
        codes: Codes {
            status: status.code(),
            intercept: intercept_code,
        },
        data: None,
    }
}

/// The single generic server-error outcome, used whenever a collaborator
/// fails or an unexpected fault occurs. Content-free on purpose: callers
/// must not learn anything about the failing collaborator.
pub fn server_error<D>() -> AuthResponse<D> {
    AuthResponse {
        error: true,
        intercepted: false,
        error_type: ErrorType::Server,
        message: SERVER_ERROR_MESSAGE.to_owned(),
        codes: Codes {
            status: SERVER_ERROR_STATUS,
            intercept: 0,
        },
        data: None,
    }
}
