//! The six method state machines.
//!
//! Every method follows the same macro-shape: disabled gate, missing-field
//! gate, domain validation over use events, intercept gate, commit,
//! success. The fallible part of each method lives in an inner function
//! returning [`Flow`]; the public entry point collapses any fault into the
//! generic server error so nothing raw ever reaches a caller.

pub(crate) mod check;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod refresh;
pub(crate) mod register;
pub(crate) mod validate;

use thiserror::Error;
use tracing::warn;

use authgate_core::error::{HookError, HookResult};
use authgate_core::events::UseEvents;
use authgate_core::protocol::Method;
use authgate_core::response::{self, AuthResponse};
use authgate_core::user::{MailQuery, NameQuery, StoredUser};

use crate::token::TokenError;

/// Internal fault of a pipeline step. Collaborator failures and token
/// encoding faults land here; both collapse to the same outcome.
#[derive(Debug, Error)]
pub(crate) enum Fault {
    #[error(transparent)]
    Hook(#[from] HookError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

pub(crate) type Flow<T> = Result<T, Fault>;

/// Collapse a failed flow into the generic server error.
pub(crate) fn recover<D>(method: Method, outcome: Flow<AuthResponse<D>>) -> AuthResponse<D> {
    match outcome {
        Ok(response) => response,
        Err(fault) => {
            warn!(
                method = method.as_str(),
                %fault,
                "collapsing to the generic server error"
            );
            response::server_error()
        }
    }
}

/// A request field counts as present only when non-empty.
pub(crate) fn field(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Resolve a login value: try it as an email first, then as a username.
/// The first non-null match wins.
pub(crate) async fn find_by_login(
    events: &UseEvents,
    login: &str,
) -> HookResult<Option<StoredUser>> {
    let by_mail = (events.get_user_by_mail)(MailQuery {
        email: login.to_owned(),
    })
    .await?;
    if by_mail.user.is_some() {
        return Ok(by_mail.user);
    }

    let by_name = (events.get_user_by_name)(NameQuery {
        username: login.to_owned(),
    })
    .await?;
    Ok(by_name.user)
}
