//! Use-event and intercept-event contracts plus their callback tables.
//!
//! Both tables are exhaustive structs over closed event enumerations: a
//! table with a missing entry is unrepresentable, which is how total
//! default coverage is guaranteed at construction instead of checked at
//! call time.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::{HookError, HookResult};
use crate::user::{
    GeneratedId, HashedPassword, IdSeed, MailQuery, NameQuery, PasswordCheck, PasswordInput,
    PasswordMatch, RefreshTokenInput, StoreUserInput, StoredUser, TokenExists, TokenPayload,
    UserLookup, Validity,
};

/// A registered use-event callback: async, owning its projected input,
/// answering the event's declared return shape or a collaborator failure.
pub type UseHook<I, O> = Arc<dyn Fn(I) -> BoxFuture<'static, HookResult<O>> + Send + Sync>;

/// A registered intercept-event callback (veto gate).
pub type InterceptHook<I> =
    Arc<dyn Fn(I) -> BoxFuture<'static, HookResult<GateDecision>> + Send + Sync>;

/// Wrap an async closure into a storable use hook.
pub fn use_hook<I, O, F, Fut>(hook: F) -> UseHook<I, O>
where
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HookResult<O>> + Send + 'static,
{
    Arc::new(move |input| -> BoxFuture<'static, HookResult<O>> { Box::pin(hook(input)) })
}

/// Wrap an async closure into a storable intercept hook.
pub fn intercept_hook<I, F, Fut>(hook: F) -> InterceptHook<I>
where
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HookResult<GateDecision>> + Send + 'static,
{
    Arc::new(move |input| -> BoxFuture<'static, HookResult<GateDecision>> {
        Box::pin(hook(input))
    })
}

/// Verdict of an intercept gate.
///
/// On `Intercept` the pending commit step must not run and the method
/// answers status 9 carrying `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Intercept { code: u32 },
}

/// The closed enumeration of use events. The names are the wire-level
/// event names collaborators register under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseEventName {
    GetUserByMail,
    GetUserByName,
    StoreUser,
    HashPassword,
    CheckPassword,
    CheckToken,
    StoreToken,
    DeleteToken,
    ValidateMail,
    ValidatePassword,
    GenId,
}

impl UseEventName {
    pub fn as_str(self) -> &'static str {
        match self {
            UseEventName::GetUserByMail => "getUserByMail",
            UseEventName::GetUserByName => "getUserByName",
            UseEventName::StoreUser => "storeUser",
            UseEventName::HashPassword => "hashPassword",
            UseEventName::CheckPassword => "checkPassword",
            UseEventName::CheckToken => "checkToken",
            UseEventName::StoreToken => "storeToken",
            UseEventName::DeleteToken => "deleteToken",
            UseEventName::ValidateMail => "validateMail",
            UseEventName::ValidatePassword => "validatePassword",
            UseEventName::GenId => "genId",
        }
    }
}

impl fmt::Display for UseEventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default for an event nobody registered: complain loudly, then fail the
/// call so the pipeline collapses to the generic server error.
fn unregistered<I, O>(name: UseEventName) -> UseHook<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    use_hook(move |_input: I| async move {
        tracing::error!(event = name.as_str(), "use event has no registered callback");
        Err(HookError::Unregistered(name))
    })
}

/// Default gate: never intercepts, never errors.
fn permissive<I>() -> InterceptHook<I>
where
    I: Send + 'static,
{
    intercept_hook(|_input: I| async { Ok(GateDecision::Pass) })
}

/// The use-event callback table. One field per declared event; every field
/// is seeded with the logging default, so coverage is total from the first
/// instant and registration is a plain overwrite.
pub struct UseEvents {
    pub get_user_by_mail: UseHook<MailQuery, UserLookup>,
    pub get_user_by_name: UseHook<NameQuery, UserLookup>,
    pub store_user: UseHook<StoreUserInput, ()>,
    pub hash_password: UseHook<PasswordInput, HashedPassword>,
    pub check_password: UseHook<PasswordCheck, PasswordMatch>,
    pub check_token: UseHook<RefreshTokenInput, TokenExists>,
    pub store_token: UseHook<RefreshTokenInput, ()>,
    pub delete_token: UseHook<RefreshTokenInput, ()>,
    pub validate_mail: UseHook<MailQuery, Validity>,
    pub validate_password: UseHook<PasswordInput, Validity>,
    pub gen_id: UseHook<IdSeed, GeneratedId>,
}

impl UseEvents {
    pub fn unregistered() -> Self {
        Self {
            get_user_by_mail: unregistered(UseEventName::GetUserByMail),
            get_user_by_name: unregistered(UseEventName::GetUserByName),
            store_user: unregistered(UseEventName::StoreUser),
            hash_password: unregistered(UseEventName::HashPassword),
            check_password: unregistered(UseEventName::CheckPassword),
            check_token: unregistered(UseEventName::CheckToken),
            store_token: unregistered(UseEventName::StoreToken),
            delete_token: unregistered(UseEventName::DeleteToken),
            validate_mail: unregistered(UseEventName::ValidateMail),
            validate_password: unregistered(UseEventName::ValidatePassword),
            gen_id: unregistered(UseEventName::GenId),
        }
    }
}

// ---------------------------------------------------------------------------
// Intercept contexts — assembled immediately before the commit step.
// ---------------------------------------------------------------------------

/// Context of the `register` gate: the user about to be persisted.
#[derive(Debug, Clone)]
pub struct RegisterContext {
    pub user: StoredUser,
}

/// Context of the `login` gate: the resolved user plus the freshly minted,
/// not yet persisted credentials.
#[derive(Debug, Clone)]
pub struct LoginContext {
    pub user: StoredUser,
    pub access_token: String,
    pub refresh_token: String,
    pub payload: TokenPayload,
}

/// Context of the `logout` gate.
#[derive(Debug, Clone)]
pub struct LogoutContext {
    pub refresh_token: String,
    pub payload: TokenPayload,
}

/// Context of the `refresh` gate.
#[derive(Debug, Clone)]
pub struct RefreshContext {
    pub refresh_token: String,
    pub payload: TokenPayload,
}

/// Context of the `check` gate.
#[derive(Debug, Clone)]
pub struct CheckContext {
    pub access_token: String,
    pub refresh_token: String,
    pub payload: TokenPayload,
}

/// The intercept-event callback table: one gate per mutating method.
pub struct InterceptEvents {
    pub register: InterceptHook<RegisterContext>,
    pub login: InterceptHook<LoginContext>,
    pub logout: InterceptHook<LogoutContext>,
    pub refresh: InterceptHook<RefreshContext>,
    pub check: InterceptHook<CheckContext>,
}

impl InterceptEvents {
    pub fn permissive() -> Self {
        Self {
            register: permissive(),
            login: permissive(),
            logout: permissive(),
            refresh: permissive(),
            check: permissive(),
        }
    }
}
