//! `refresh` — mint a new access token from a stored refresh token.
//!
//! The refresh token itself is never rotated here; it stays valid until
//! logout deletes it.

use tracing::debug;

use authgate_core::events::{GateDecision, RefreshContext};
use authgate_core::protocol::{AccessGrant, Method, RefreshRequest, RefreshResponse, RefreshStatus};
use authgate_core::registry::EventRegistry;
use authgate_core::response;
use authgate_core::user::RefreshTokenInput;

use super::{Flow, field, recover};
use crate::token;

pub(crate) async fn run(registry: &EventRegistry, request: RefreshRequest) -> RefreshResponse {
    if !registry.config.methods.refresh.is_active() {
        debug!("the refresh method is disabled");
        return response::failure(RefreshStatus::Disabled);
    }
    recover(Method::Refresh, run_inner(registry, request).await)
}

async fn run_inner(registry: &EventRegistry, request: RefreshRequest) -> Flow<RefreshResponse> {
    let events = &registry.use_events;

    let Some(refresh_token) = field(&request.refresh_token) else {
        debug!("the \"refreshToken\" is missing");
        return Ok(response::failure(RefreshStatus::MissingToken));
    };

    let Some(payload) = token::decode(refresh_token, &registry.config.secrets.refresh_token)
    else {
        debug!("the \"refreshToken\" is invalid");
        return Ok(response::failure(RefreshStatus::InvalidToken));
    };

    let stored = (events.check_token)(RefreshTokenInput {
        refresh_token: refresh_token.to_owned(),
    })
    .await?;
    if !stored.exists {
        debug!("the \"refreshToken\" does not exist");
        return Ok(response::failure(RefreshStatus::UnknownToken));
    }

    let decision = (registry.intercept_events.refresh)(RefreshContext {
        refresh_token: refresh_token.to_owned(),
        payload: payload.clone(),
    })
    .await?;
    if let GateDecision::Intercept { code } = decision {
        return Ok(response::intercepted(RefreshStatus::Intercepted, code));
    }

    // Commit: issue a fresh access token for the same identity.
    let access_token = token::generate(
        &payload,
        &registry.config.secrets.access_token,
        Some(registry.config.expires_in),
    )?;

    Ok(response::success(
        RefreshStatus::Success,
        AccessGrant { access_token },
    ))
}
