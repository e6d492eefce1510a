//! Access and refresh token signing and verification.
//!
//! Both credential kinds are HS256 JWTs over their own secret. The only
//! claim content is the user id — profile data can change and is never
//! cached inside a credential. Access tokens always carry an expiry;
//! refresh tokens never do, their revocation is the explicit deletion of
//! the stored token.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use authgate_core::TokenPayload;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: String,
    iat: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Sign a token over `secret`. `expires_in` is set for access tokens and
/// left `None` for refresh tokens.
pub fn generate(
    payload: &TokenPayload,
    secret: &str,
    expires_in: Option<u64>,
) -> Result<String, TokenError> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        id: payload.id.clone(),
        iat,
        exp: expires_in.map(|seconds| iat + seconds as i64),
    };
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verify and decode a token.
///
/// Signature, format and expiry failures all collapse to `None` so callers
/// cannot build an oracle that tells "expired" from "tampered". Tokens
/// without an `exp` claim verify indefinitely — that is the refresh-token
/// contract.
pub fn decode(token: &str, secret: &str) -> Option<TokenPayload> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    // Refresh tokens have no exp claim; expiry is still enforced when the
    // claim is present.
    validation.set_required_spec_claims::<&str>(&[]);

    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .ok()
    .map(|data| TokenPayload {
        id: data.claims.id,
    })
}
