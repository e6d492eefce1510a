//! The server surface: construction, event registration and the six
//! protocol methods.

use authgate_core::events::{
    CheckContext, GateDecision, LoginContext, LogoutContext, RefreshContext, RegisterContext,
    intercept_hook, use_hook,
};
use authgate_core::protocol::{
    CheckRequest, CheckResponse, LoginRequest, LoginResponse, LogoutRequest, LogoutResponse,
    Method, RefreshRequest, RefreshResponse, RegisterRequest, RegisterResponse, ValidateRequest,
    ValidateResponse,
};
use authgate_core::registry::EventRegistry;
use authgate_core::user::{
    GeneratedId, HashedPassword, IdSeed, MailQuery, NameQuery, PasswordCheck, PasswordInput,
    PasswordMatch, RefreshTokenInput, StoreUserInput, TokenExists, UserLookup, Validity,
};
use authgate_core::{HookResult, ServerConfig};

use crate::methods;

/// The authentication engine.
///
/// Constructed once from an immutable config with every event seeded by
/// its default; collaborators register their hooks through the `on_*` and
/// `intercept_*` setters before the server is shared with traffic (the
/// setters take `&mut self`, so a shared server can only answer calls).
pub struct AuthServer {
    registry: EventRegistry,
}

impl AuthServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            registry: EventRegistry::new(config),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.registry.config
    }

    /// The methods a transport adapter should bind: everything not
    /// configured as removed.
    pub fn surface(&self) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|method| self.is_exposed(*method))
            .collect()
    }

    pub fn is_exposed(&self, method: Method) -> bool {
        !self.registry.config.methods.state(method).is_removed()
    }

    // -----------------------------------------------------------------------
    // Use-event registration. Each setter overwrites the table entry
    // unconditionally; the last registration wins.
    // -----------------------------------------------------------------------

    pub fn on_get_user_by_mail<F, Fut>(&mut self, hook: F)
    where
        F: Fn(MailQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<UserLookup>> + Send + 'static,
    {
        self.registry.use_events.get_user_by_mail = use_hook(hook);
    }

    pub fn on_get_user_by_name<F, Fut>(&mut self, hook: F)
    where
        F: Fn(NameQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<UserLookup>> + Send + 'static,
    {
        self.registry.use_events.get_user_by_name = use_hook(hook);
    }

    pub fn on_store_user<F, Fut>(&mut self, hook: F)
    where
        F: Fn(StoreUserInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<()>> + Send + 'static,
    {
        self.registry.use_events.store_user = use_hook(hook);
    }

    pub fn on_hash_password<F, Fut>(&mut self, hook: F)
    where
        F: Fn(PasswordInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<HashedPassword>> + Send + 'static,
    {
        self.registry.use_events.hash_password = use_hook(hook);
    }

    pub fn on_check_password<F, Fut>(&mut self, hook: F)
    where
        F: Fn(PasswordCheck) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<PasswordMatch>> + Send + 'static,
    {
        self.registry.use_events.check_password = use_hook(hook);
    }

    pub fn on_check_token<F, Fut>(&mut self, hook: F)
    where
        F: Fn(RefreshTokenInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<TokenExists>> + Send + 'static,
    {
        self.registry.use_events.check_token = use_hook(hook);
    }

    pub fn on_store_token<F, Fut>(&mut self, hook: F)
    where
        F: Fn(RefreshTokenInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<()>> + Send + 'static,
    {
        self.registry.use_events.store_token = use_hook(hook);
    }

    pub fn on_delete_token<F, Fut>(&mut self, hook: F)
    where
        F: Fn(RefreshTokenInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<()>> + Send + 'static,
    {
        self.registry.use_events.delete_token = use_hook(hook);
    }

    pub fn on_validate_mail<F, Fut>(&mut self, hook: F)
    where
        F: Fn(MailQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<Validity>> + Send + 'static,
    {
        self.registry.use_events.validate_mail = use_hook(hook);
    }

    pub fn on_validate_password<F, Fut>(&mut self, hook: F)
    where
        F: Fn(PasswordInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<Validity>> + Send + 'static,
    {
        self.registry.use_events.validate_password = use_hook(hook);
    }

    pub fn on_gen_id<F, Fut>(&mut self, hook: F)
    where
        F: Fn(IdSeed) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<GeneratedId>> + Send + 'static,
    {
        self.registry.use_events.gen_id = use_hook(hook);
    }

    // -----------------------------------------------------------------------
    // Intercept-event registration — one veto gate per mutating method.
    // -----------------------------------------------------------------------

    pub fn intercept_register<F, Fut>(&mut self, hook: F)
    where
        F: Fn(RegisterContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<GateDecision>> + Send + 'static,
    {
        self.registry.intercept_events.register = intercept_hook(hook);
    }

    pub fn intercept_login<F, Fut>(&mut self, hook: F)
    where
        F: Fn(LoginContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<GateDecision>> + Send + 'static,
    {
        self.registry.intercept_events.login = intercept_hook(hook);
    }

    pub fn intercept_logout<F, Fut>(&mut self, hook: F)
    where
        F: Fn(LogoutContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<GateDecision>> + Send + 'static,
    {
        self.registry.intercept_events.logout = intercept_hook(hook);
    }

    pub fn intercept_refresh<F, Fut>(&mut self, hook: F)
    where
        F: Fn(RefreshContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<GateDecision>> + Send + 'static,
    {
        self.registry.intercept_events.refresh = intercept_hook(hook);
    }

    pub fn intercept_check<F, Fut>(&mut self, hook: F)
    where
        F: Fn(CheckContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<GateDecision>> + Send + 'static,
    {
        self.registry.intercept_events.check = intercept_hook(hook);
    }

    // -----------------------------------------------------------------------
    // Methods. A removed method answers its disabled status here; transport
    // adapters are expected to not bind it at all (see `surface`).
    // -----------------------------------------------------------------------

    pub async fn validate(&self, request: ValidateRequest) -> ValidateResponse {
        methods::validate::run(&self.registry, request).await
    }

    pub async fn register(&self, request: RegisterRequest) -> RegisterResponse {
        methods::register::run(&self.registry, request).await
    }

    pub async fn login(&self, request: LoginRequest) -> LoginResponse {
        methods::login::run(&self.registry, request).await
    }

    pub async fn logout(&self, request: LogoutRequest) -> LogoutResponse {
        methods::logout::run(&self.registry, request).await
    }

    pub async fn refresh(&self, request: RefreshRequest) -> RefreshResponse {
        methods::refresh::run(&self.registry, request).await
    }

    pub async fn check(&self, request: CheckRequest) -> CheckResponse {
        methods::check::run(&self.registry, request).await
    }
}
