//! Hook error types.

use thiserror::Error;

use crate::events::UseEventName;

/// Failure signalled by a collaborator hook.
///
/// The pipeline never inspects the variant — any `Err` collapses to the
/// generic server error, so callers cannot distinguish collaborator
/// failure modes. The detail only reaches the logs.
#[derive(Debug, Error)]
pub enum HookError {
    /// No callback was registered for the named use event.
    #[error("the \"{0}\" use event has no registered callback")]
    Unregistered(UseEventName),

    /// The collaborator itself failed (storage down, crypto error, ...).
    #[error("collaborator failure: {0}")]
    Collaborator(String),
}

impl HookError {
    /// Collaborator-side failure with a reason that is logged, never
    /// surfaced to API callers.
    pub fn collaborator(reason: impl Into<String>) -> Self {
        HookError::Collaborator(reason.into())
    }
}

pub type HookResult<T> = Result<T, HookError>;
