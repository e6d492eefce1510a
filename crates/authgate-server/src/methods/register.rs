//! `register` — account creation.

use tracing::debug;

use authgate_core::events::{GateDecision, RegisterContext};
use authgate_core::policy::RegisterConflict;
use authgate_core::protocol::{Method, RegisterRequest, RegisterResponse, RegisterStatus};
use authgate_core::registry::EventRegistry;
use authgate_core::response;
use authgate_core::user::{
    IdSeed, MailQuery, PasswordInput, RegisteredUser, StoreUserInput, StoredUser,
};

use super::{Flow, field, find_by_login, recover};

pub(crate) async fn run(registry: &EventRegistry, request: RegisterRequest) -> RegisterResponse {
    if !registry.config.methods.register.is_active() {
        debug!("the register method is disabled");
        return response::failure(RegisterStatus::Disabled);
    }
    recover(Method::Register, run_inner(registry, request).await)
}

async fn run_inner(registry: &EventRegistry, request: RegisterRequest) -> Flow<RegisterResponse> {
    let events = &registry.use_events;
    let policy = registry.policy();

    // 1. All three fields are required.
    let (Some(email), Some(username), Some(password)) = (
        field(&request.email),
        field(&request.username),
        field(&request.password),
    ) else {
        debug!("the \"email\", \"username\" or \"password\" is missing");
        return Ok(response::failure(RegisterStatus::MissingFields));
    };

    // 2. Collaborator-defined format and strength checks.
    let mail = (events.validate_mail)(MailQuery {
        email: email.to_owned(),
    })
    .await?;
    if !mail.is_valid {
        debug!("the \"email\" is malformed");
        return Ok(response::failure(RegisterStatus::MalformedEmail));
    }

    let strength = (events.validate_password)(PasswordInput {
        password: password.to_owned(),
    })
    .await?;
    if !strength.is_valid {
        debug!("the \"password\" is too weak");
        return Ok(response::failure(RegisterStatus::WeakPassword));
    }

    // 3. Uniqueness: the submitted email, then the submitted username, each
    //    resolved the same way a login would be.
    if find_by_login(events, email).await?.is_some() {
        debug!(
            "{}",
            policy.log_reason(
                "the \"email\" is already in use",
                "the \"login\" is already in use"
            )
        );
        return Ok(response::failure(
            policy.register_conflict(RegisterConflict::Email),
        ));
    }

    if find_by_login(events, username).await?.is_some() {
        debug!(
            "{}",
            policy.log_reason(
                "the \"username\" is already in use",
                "the \"login\" is already in use"
            )
        );
        return Ok(response::failure(
            policy.register_conflict(RegisterConflict::Username),
        ));
    }

    // 4. Assemble the record to persist.
    let hashed = (events.hash_password)(PasswordInput {
        password: password.to_owned(),
    })
    .await?;
    let generated = (events.gen_id)(IdSeed {
        email: email.to_owned(),
        username: username.to_owned(),
    })
    .await?;

    let user = StoredUser {
        id: generated.id,
        email: email.to_owned(),
        username: username.to_owned(),
        hashed_password: hashed.hashed_password,
    };

    // 5. Intercept gate — on veto the user is never stored.
    let decision = (registry.intercept_events.register)(RegisterContext { user: user.clone() })
        .await?;
    if let GateDecision::Intercept { code } = decision {
        return Ok(response::intercepted(RegisterStatus::Intercepted, code));
    }

    // 6. Commit.
    (events.store_user)(StoreUserInput { user: user.clone() }).await?;

    Ok(response::success(
        RegisterStatus::Success,
        RegisteredUser {
            id: user.id,
            email: user.email,
            username: user.username,
        },
    ))
}
