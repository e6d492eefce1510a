//! `check` — is this session alive?
//!
//! Verifies both credentials without issuing anything: the refresh token
//! must verify and still be stored, the access token must verify.

use tracing::debug;

use authgate_core::events::{CheckContext, GateDecision};
use authgate_core::protocol::{CheckRequest, CheckResponse, CheckStatus, Method};
use authgate_core::registry::EventRegistry;
use authgate_core::response;
use authgate_core::user::RefreshTokenInput;

use super::{Flow, field, recover};
use crate::token;

pub(crate) async fn run(registry: &EventRegistry, request: CheckRequest) -> CheckResponse {
    if !registry.config.methods.check.is_active() {
        debug!("the check method is disabled");
        return response::failure(CheckStatus::Disabled);
    }
    recover(Method::Check, run_inner(registry, request).await)
}

async fn run_inner(registry: &EventRegistry, request: CheckRequest) -> Flow<CheckResponse> {
    let events = &registry.use_events;

    let (Some(access_token), Some(refresh_token)) =
        (field(&request.access_token), field(&request.refresh_token))
    else {
        debug!("the \"accessToken\" or \"refreshToken\" is missing");
        return Ok(response::failure(CheckStatus::MissingTokens));
    };

    if token::decode(refresh_token, &registry.config.secrets.refresh_token).is_none() {
        debug!("the \"refreshToken\" is invalid");
        return Ok(response::failure(CheckStatus::InvalidRefreshToken));
    }

    let stored = (events.check_token)(RefreshTokenInput {
        refresh_token: refresh_token.to_owned(),
    })
    .await?;
    if !stored.exists {
        debug!("the \"refreshToken\" does not exist");
        return Ok(response::failure(CheckStatus::UnknownRefreshToken));
    }

    let Some(payload) = token::decode(access_token, &registry.config.secrets.access_token) else {
        debug!("the \"accessToken\" is invalid");
        return Ok(response::failure(CheckStatus::InvalidAccessToken));
    };

    let decision = (registry.intercept_events.check)(CheckContext {
        access_token: access_token.to_owned(),
        refresh_token: refresh_token.to_owned(),
        payload,
    })
    .await?;
    if let GateDecision::Intercept { code } = decision {
        return Ok(response::intercepted(CheckStatus::Intercepted, code));
    }

    Ok(response::success(CheckStatus::Success, ()))
}
