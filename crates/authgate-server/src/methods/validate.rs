//! `validate` — stateless access-token verification.

use tracing::debug;

use authgate_core::protocol::{ValidateRequest, ValidateResponse, ValidateStatus};
use authgate_core::registry::EventRegistry;
use authgate_core::response;
use authgate_core::user::Identity;

use super::field;
use crate::token;

/// Decode only: no use events, no intercept gate, no side effects.
pub(crate) async fn run(registry: &EventRegistry, request: ValidateRequest) -> ValidateResponse {
    if !registry.config.methods.validate.is_active() {
        debug!("the validate method is disabled");
        return response::failure(ValidateStatus::Disabled);
    }

    let Some(access_token) = field(&request.access_token) else {
        debug!("the \"accessToken\" is missing");
        return response::failure(ValidateStatus::MissingToken);
    };

    match token::decode(access_token, &registry.config.secrets.access_token) {
        Some(payload) => response::success(ValidateStatus::Success, Identity { id: payload.id }),
        None => {
            debug!("the \"accessToken\" is invalid");
            response::failure(ValidateStatus::InvalidToken)
        }
    }
}
