//! `logout` — refresh-token revocation.

use tracing::debug;

use authgate_core::events::{GateDecision, LogoutContext};
use authgate_core::protocol::{LogoutRequest, LogoutResponse, LogoutStatus, Method};
use authgate_core::registry::EventRegistry;
use authgate_core::response;
use authgate_core::user::RefreshTokenInput;

use super::{Flow, field, recover};
use crate::token;

pub(crate) async fn run(registry: &EventRegistry, request: LogoutRequest) -> LogoutResponse {
    if !registry.config.methods.logout.is_active() {
        debug!("the logout method is disabled");
        return response::failure(LogoutStatus::Disabled);
    }
    recover(Method::Logout, run_inner(registry, request).await)
}

async fn run_inner(registry: &EventRegistry, request: LogoutRequest) -> Flow<LogoutResponse> {
    let events = &registry.use_events;

    let Some(refresh_token) = field(&request.refresh_token) else {
        debug!("the \"refreshToken\" is missing");
        return Ok(response::failure(LogoutStatus::MissingToken));
    };

    // Signature check before any storage round-trip.
    let Some(payload) = token::decode(refresh_token, &registry.config.secrets.refresh_token)
    else {
        debug!("the \"refreshToken\" is invalid");
        return Ok(response::failure(LogoutStatus::InvalidToken));
    };

    let stored = (events.check_token)(RefreshTokenInput {
        refresh_token: refresh_token.to_owned(),
    })
    .await?;
    if !stored.exists {
        debug!("the \"refreshToken\" does not exist");
        return Ok(response::failure(LogoutStatus::UnknownToken));
    }

    // Intercept gate — on veto the token stays stored.
    let decision = (registry.intercept_events.logout)(LogoutContext {
        refresh_token: refresh_token.to_owned(),
        payload,
    })
    .await?;
    if let GateDecision::Intercept { code } = decision {
        return Ok(response::intercepted(LogoutStatus::Intercepted, code));
    }

    (events.delete_token)(RefreshTokenInput {
        refresh_token: refresh_token.to_owned(),
    })
    .await?;

    Ok(response::success(LogoutStatus::Success, ()))
}
