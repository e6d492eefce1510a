//! Projections over the closed user-record field set.
//!
//! The full record is `{id, email, username, password, hashedPassword,
//! accessToken, refreshToken}`. Every event payload is a strict projection
//! of it: a hook can neither observe nor return fields outside the struct
//! it is handed. Distinct projections therefore get distinct types instead
//! of one record with optional fields.

use serde::{Deserialize, Serialize};

/// The projection a storage collaborator persists and returns on lookup.
///
/// The raw password never appears here — only its hash, produced by the
/// `hashPassword` use event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub hashed_password: String,
}

/// Claim content of every signed token. Only the id — email and username
/// can change, so they are never cached inside a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub id: String,
}

/// Success payload of `validate`: the authenticated user's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
}

/// Success payload of `register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
    pub username: String,
}

/// Input for `getUserByMail` and `validateMail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailQuery {
    pub email: String,
}

/// Input for `getUserByName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameQuery {
    pub username: String,
}

/// Return of the two user lookups; `None` means no such user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLookup {
    pub user: Option<StoredUser>,
}

/// Input for `hashPassword` and `validatePassword`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordInput {
    pub password: String,
}

/// Return of `hashPassword`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashedPassword {
    pub hashed_password: String,
}

/// Input for `checkPassword`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCheck {
    pub password: String,
    pub hashed_password: String,
}

/// Return of `checkPassword`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordMatch {
    pub matches: bool,
}

/// Input for `checkToken`, `storeToken` and `deleteToken`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenInput {
    pub refresh_token: String,
}

/// Return of `checkToken`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenExists {
    pub exists: bool,
}

/// Return of `validateMail` and `validatePassword`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validity {
    pub is_valid: bool,
}

/// Input for `genId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSeed {
    pub email: String,
    pub username: String,
}

/// Return of `genId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedId {
    pub id: String,
}

/// Input for `storeUser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreUserInput {
    pub user: StoredUser,
}
