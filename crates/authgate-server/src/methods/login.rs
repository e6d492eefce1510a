//! `login` — credential check and token issuance.

use tracing::debug;

use authgate_core::events::{GateDecision, LoginContext};
use authgate_core::policy::LoginRejection;
use authgate_core::protocol::{LoginRequest, LoginResponse, LoginStatus, Method, TokenPair};
use authgate_core::registry::EventRegistry;
use authgate_core::response;
use authgate_core::user::{PasswordCheck, RefreshTokenInput, TokenPayload};

use super::{Flow, field, find_by_login, recover};
use crate::token;

pub(crate) async fn run(registry: &EventRegistry, request: LoginRequest) -> LoginResponse {
    if !registry.config.methods.login.is_active() {
        debug!("the login method is disabled");
        return response::failure(LoginStatus::Disabled);
    }
    recover(Method::Login, run_inner(registry, request).await)
}

async fn run_inner(registry: &EventRegistry, request: LoginRequest) -> Flow<LoginResponse> {
    let events = &registry.use_events;
    let policy = registry.policy();

    // 1. Both fields are required.
    let (Some(login), Some(password)) = (field(&request.login), field(&request.password)) else {
        debug!("the \"login\" (\"email\" or \"username\") or \"password\" is missing");
        return Ok(response::failure(LoginStatus::MissingFields));
    };

    // 2. Resolve the user, email first.
    let Some(user) = find_by_login(events, login).await? else {
        debug!(
            "{}",
            policy.log_reason(
                "the user was not found",
                "the user was not found or the \"password\" is incorrect"
            )
        );
        return Ok(response::failure(
            policy.login_rejection(LoginRejection::UnknownUser),
        ));
    };

    // 3. Verify the password against the stored hash.
    let check = (events.check_password)(PasswordCheck {
        password: password.to_owned(),
        hashed_password: user.hashed_password.clone(),
    })
    .await?;
    if !check.matches {
        debug!(
            "{}",
            policy.log_reason(
                "the \"password\" is incorrect",
                "the user was not found or the \"password\" is incorrect"
            )
        );
        return Ok(response::failure(
            policy.login_rejection(LoginRejection::WrongPassword),
        ));
    }

    // 4. Mint both credentials. The refresh token carries no expiry — its
    //    lifetime ends when it is deleted from storage.
    let payload = TokenPayload {
        id: user.id.clone(),
    };
    let refresh_token = token::generate(&payload, &registry.config.secrets.refresh_token, None)?;
    let access_token = token::generate(
        &payload,
        &registry.config.secrets.access_token,
        Some(registry.config.expires_in),
    )?;

    // 5. Intercept gate — on veto the refresh token is never persisted.
    let decision = (registry.intercept_events.login)(LoginContext {
        user,
        access_token: access_token.clone(),
        refresh_token: refresh_token.clone(),
        payload,
    })
    .await?;
    if let GateDecision::Intercept { code } = decision {
        return Ok(response::intercepted(LoginStatus::Intercepted, code));
    }

    // 6. Commit the refresh token.
    (events.store_token)(RefreshTokenInput {
        refresh_token: refresh_token.clone(),
    })
    .await?;

    Ok(response::success(
        LoginStatus::Success,
        TokenPair {
            access_token,
            refresh_token,
        },
    ))
}
