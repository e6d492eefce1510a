//! The protocol catalog: the closed, per-method enumeration of request
//! shapes and every `(status code → outcome)` pair.
//!
//! Status codes are method-scoped business outcomes; they are not transport
//! status codes. Mapping them onto HTTP or anything else is an adapter
//! concern — the catalog only guarantees that each method's set is stable,
//! mutually exclusive and exhaustive.
//!
//! Two conventions hold across every method: status 1 is always "method
//! disabled", status 2 is always "required field missing", and status 9 is
//! reserved exclusively for interception. The generic server error is a
//! separately named outcome (see [`crate::response::server_error`]) that
//! happens to share the number 5 with some method statuses; the two are
//! told apart by `errorType`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::response::AuthResponse;
use crate::user::{Identity, RegisteredUser};

/// Status code of the generic server error. Numerically overlaps with
/// method status 5; disambiguated by `errorType: "server"`.
pub const SERVER_ERROR_STATUS: u8 = 5;

/// The single, content-free message of the generic server error.
pub const SERVER_ERROR_MESSAGE: &str =
    "An error occurred on the server. Please try again later.";

/// The closed set of protocol methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Validate,
    Register,
    Login,
    Logout,
    Refresh,
    Check,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::Validate,
        Method::Register,
        Method::Login,
        Method::Logout,
        Method::Refresh,
        Method::Check,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Validate => "validate",
            Method::Register => "register",
            Method::Login => "login",
            Method::Logout => "logout",
            Method::Refresh => "refresh",
            Method::Check => "check",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a method.
///
/// `Disabled` methods stay on the surface but answer status 1. `Removed`
/// methods are absent from the exposed surface altogether.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodState {
    #[default]
    Active,
    Disabled,
    Removed,
}

impl MethodState {
    pub fn is_active(self) -> bool {
        self == MethodState::Active
    }

    pub fn is_removed(self) -> bool {
        self == MethodState::Removed
    }
}

/// A method-scoped status code with its fixed message.
///
/// Implemented by each per-method status enum; the response builder is
/// generic over this trait.
pub trait StatusCode: Copy + fmt::Debug {
    fn code(self) -> u8;
    fn message(self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Requests — deep-optional: every field may be absent, the pipeline answers
// status 2 when a required one is missing or empty.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidateRequest {
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Email or username; resolved email-first.
    pub login: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckRequest {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

// ---------------------------------------------------------------------------
// Success payloads
// ---------------------------------------------------------------------------

/// Tokens issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// The fresh access token issued by a successful refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGrant {
    pub access_token: String,
}

// ---------------------------------------------------------------------------
// Per-method status enumerations
// ---------------------------------------------------------------------------

/// `validate` has no intercept gate, so no status 9 is declared — the
/// interception outcome is unreachable for it by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateStatus {
    Success,
    Disabled,
    MissingToken,
    InvalidToken,
}

impl ValidateStatus {
    pub const ALL: [ValidateStatus; 4] = [
        ValidateStatus::Success,
        ValidateStatus::Disabled,
        ValidateStatus::MissingToken,
        ValidateStatus::InvalidToken,
    ];
}

impl StatusCode for ValidateStatus {
    fn code(self) -> u8 {
        match self {
            ValidateStatus::Success => 0,
            ValidateStatus::Disabled => 1,
            ValidateStatus::MissingToken => 2,
            ValidateStatus::InvalidToken => 3,
        }
    }

    fn message(self) -> &'static str {
        match self {
            ValidateStatus::Success => "Validation successful.",
            ValidateStatus::Disabled => "The validation method is disabled.",
            ValidateStatus::MissingToken => "The \"accessToken\" is missing.",
            ValidateStatus::InvalidToken => "The \"accessToken\" is invalid.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterStatus {
    Success,
    Disabled,
    MissingFields,
    MalformedEmail,
    WeakPassword,
    EmailTaken,
    UsernameTaken,
    /// Ambiguous duplicate under `sensitive.api`: deliberately does not say
    /// whether the email or the username collided.
    LoginTaken,
    Intercepted,
}

impl RegisterStatus {
    pub const ALL: [RegisterStatus; 9] = [
        RegisterStatus::Success,
        RegisterStatus::Disabled,
        RegisterStatus::MissingFields,
        RegisterStatus::MalformedEmail,
        RegisterStatus::WeakPassword,
        RegisterStatus::EmailTaken,
        RegisterStatus::UsernameTaken,
        RegisterStatus::LoginTaken,
        RegisterStatus::Intercepted,
    ];
}

impl StatusCode for RegisterStatus {
    fn code(self) -> u8 {
        match self {
            RegisterStatus::Success => 0,
            RegisterStatus::Disabled => 1,
            RegisterStatus::MissingFields => 2,
            RegisterStatus::MalformedEmail => 3,
            RegisterStatus::WeakPassword => 4,
            RegisterStatus::EmailTaken => 5,
            RegisterStatus::UsernameTaken => 6,
            RegisterStatus::LoginTaken => 7,
            RegisterStatus::Intercepted => 9,
        }
    }

    fn message(self) -> &'static str {
        match self {
            RegisterStatus::Success => "Registration successful.",
            RegisterStatus::Disabled => "The registration method is disabled.",
            RegisterStatus::MissingFields => {
                "The \"email\", \"username\" or \"password\" is missing."
            }
            RegisterStatus::MalformedEmail => "The \"email\" is malformed.",
            RegisterStatus::WeakPassword => "The \"password\" is too weak.",
            RegisterStatus::EmailTaken => "The \"email\" is already in use.",
            RegisterStatus::UsernameTaken => "The \"username\" is already in use.",
            RegisterStatus::LoginTaken => "The \"login\" is already in use.",
            RegisterStatus::Intercepted => "The registration request was intercepted.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    Success,
    Disabled,
    MissingFields,
    UnknownUser,
    WrongPassword,
    /// Not-found and wrong-password collapsed under `sensitive.api`.
    BadCredentials,
    Intercepted,
}

impl LoginStatus {
    pub const ALL: [LoginStatus; 7] = [
        LoginStatus::Success,
        LoginStatus::Disabled,
        LoginStatus::MissingFields,
        LoginStatus::UnknownUser,
        LoginStatus::WrongPassword,
        LoginStatus::BadCredentials,
        LoginStatus::Intercepted,
    ];
}

impl StatusCode for LoginStatus {
    fn code(self) -> u8 {
        match self {
            LoginStatus::Success => 0,
            LoginStatus::Disabled => 1,
            LoginStatus::MissingFields => 2,
            LoginStatus::UnknownUser => 3,
            LoginStatus::WrongPassword => 4,
            LoginStatus::BadCredentials => 5,
            LoginStatus::Intercepted => 9,
        }
    }

    fn message(self) -> &'static str {
        match self {
            LoginStatus::Success => "Login successful.",
            LoginStatus::Disabled => "The login method is disabled.",
            LoginStatus::MissingFields => {
                "The \"login\" (\"email\" or \"username\") or \"password\" is missing."
            }
            LoginStatus::UnknownUser => "The user was not found.",
            LoginStatus::WrongPassword => "The \"password\" is incorrect.",
            LoginStatus::BadCredentials => {
                "The user was not found or the \"password\" is incorrect."
            }
            LoginStatus::Intercepted => "The login request was intercepted.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutStatus {
    Success,
    Disabled,
    MissingToken,
    InvalidToken,
    UnknownToken,
    Intercepted,
}

impl LogoutStatus {
    pub const ALL: [LogoutStatus; 6] = [
        LogoutStatus::Success,
        LogoutStatus::Disabled,
        LogoutStatus::MissingToken,
        LogoutStatus::InvalidToken,
        LogoutStatus::UnknownToken,
        LogoutStatus::Intercepted,
    ];
}

impl StatusCode for LogoutStatus {
    fn code(self) -> u8 {
        match self {
            LogoutStatus::Success => 0,
            LogoutStatus::Disabled => 1,
            LogoutStatus::MissingToken => 2,
            LogoutStatus::InvalidToken => 3,
            LogoutStatus::UnknownToken => 4,
            LogoutStatus::Intercepted => 9,
        }
    }

    fn message(self) -> &'static str {
        match self {
            LogoutStatus::Success => "Logout successful.",
            LogoutStatus::Disabled => "The logout method is disabled.",
            LogoutStatus::MissingToken => "The \"refreshToken\" is missing.",
            LogoutStatus::InvalidToken => "The \"refreshToken\" is invalid.",
            LogoutStatus::UnknownToken => "The \"refreshToken\" does not exist.",
            LogoutStatus::Intercepted => "The logout request was intercepted.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    Success,
    Disabled,
    MissingToken,
    InvalidToken,
    UnknownToken,
    Intercepted,
}

impl RefreshStatus {
    pub const ALL: [RefreshStatus; 6] = [
        RefreshStatus::Success,
        RefreshStatus::Disabled,
        RefreshStatus::MissingToken,
        RefreshStatus::InvalidToken,
        RefreshStatus::UnknownToken,
        RefreshStatus::Intercepted,
    ];
}

impl StatusCode for RefreshStatus {
    fn code(self) -> u8 {
        match self {
            RefreshStatus::Success => 0,
            RefreshStatus::Disabled => 1,
            RefreshStatus::MissingToken => 2,
            RefreshStatus::InvalidToken => 3,
            RefreshStatus::UnknownToken => 4,
            RefreshStatus::Intercepted => 9,
        }
    }

    fn message(self) -> &'static str {
        match self {
            RefreshStatus::Success => "Refresh successful.",
            RefreshStatus::Disabled => "The refresh method is disabled.",
            RefreshStatus::MissingToken => "The \"refreshToken\" is missing.",
            RefreshStatus::InvalidToken => "The \"refreshToken\" is invalid.",
            RefreshStatus::UnknownToken => "The \"refreshToken\" does not exist.",
            RefreshStatus::Intercepted => "The refresh request was intercepted.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Success,
    Disabled,
    MissingTokens,
    InvalidRefreshToken,
    UnknownRefreshToken,
    InvalidAccessToken,
    Intercepted,
}

impl CheckStatus {
    pub const ALL: [CheckStatus; 7] = [
        CheckStatus::Success,
        CheckStatus::Disabled,
        CheckStatus::MissingTokens,
        CheckStatus::InvalidRefreshToken,
        CheckStatus::UnknownRefreshToken,
        CheckStatus::InvalidAccessToken,
        CheckStatus::Intercepted,
    ];
}

impl StatusCode for CheckStatus {
    fn code(self) -> u8 {
        match self {
            CheckStatus::Success => 0,
            CheckStatus::Disabled => 1,
            CheckStatus::MissingTokens => 2,
            CheckStatus::InvalidRefreshToken => 3,
            CheckStatus::UnknownRefreshToken => 4,
            CheckStatus::InvalidAccessToken => 5,
            CheckStatus::Intercepted => 9,
        }
    }

    fn message(self) -> &'static str {
        match self {
            CheckStatus::Success => "Check successful.",
            CheckStatus::Disabled => "The check method is disabled.",
            CheckStatus::MissingTokens => {
                "The \"accessToken\" or \"refreshToken\" is missing."
            }
            CheckStatus::InvalidRefreshToken => "The \"refreshToken\" is invalid.",
            CheckStatus::UnknownRefreshToken => "The \"refreshToken\" does not exist.",
            CheckStatus::InvalidAccessToken => "The \"accessToken\" is invalid.",
            CheckStatus::Intercepted => "The check request was intercepted.",
        }
    }
}

// ---------------------------------------------------------------------------
// Response aliases — one per method, pairing its status set with its data.
// ---------------------------------------------------------------------------

pub type ValidateResponse = AuthResponse<Identity>;
pub type RegisterResponse = AuthResponse<RegisteredUser>;
pub type LoginResponse = AuthResponse<TokenPair>;
pub type LogoutResponse = AuthResponse<()>;
pub type RefreshResponse = AuthResponse<AccessGrant>;
pub type CheckResponse = AuthResponse<()>;
