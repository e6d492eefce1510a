//! Intercept gates, unregistered-event handling, and method lifecycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use authgate_core::protocol::{
    CheckRequest, LoginRequest, LogoutRequest, RegisterRequest, ValidateRequest,
};
use authgate_core::response::ErrorType;
use authgate_core::{GateDecision, HookError, Method, MethodState, ServerConfig};
use authgate_server::AuthServer;
use authgate_server::memory::MemoryStore;

fn config() -> ServerConfig {
    ServerConfig::new("access-secret", "refresh-secret")
}

fn server_with_store(config: ServerConfig) -> (AuthServer, Arc<MemoryStore>) {
    let store = MemoryStore::new();
    let mut server = AuthServer::new(config);
    store.attach(&mut server);
    (server, store)
}

async fn register_alice(server: &AuthServer) {
    let response = server
        .register(RegisterRequest {
            email: Some("a@b.com".into()),
            username: Some("alice".into()),
            password: Some("longpassword".into()),
        })
        .await;
    assert_eq!(response.codes.status, 0);
}

fn login_request() -> LoginRequest {
    LoginRequest {
        login: Some("a@b.com".into()),
        password: Some("longpassword".into()),
    }
}

// ---------------------------------------------------------------------------
// intercept gates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn intercepted_login_commits_nothing() {
    let (mut server, store) = server_with_store(config());
    server.intercept_login(|_ctx| async { Ok(GateDecision::Intercept { code: 42 }) });

    // The gate runs before the commit, so storeToken must never fire.
    let commits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&commits);
    server.on_store_token(move |_input| {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok(()) }
    });

    register_alice(&server).await;
    let response = server.login(login_request()).await;

    assert!(response.error);
    assert!(response.intercepted);
    assert_eq!(response.codes.status, 9);
    assert_eq!(response.codes.intercept, 42);
    assert!(response.data.is_none());
    assert_eq!(commits.load(Ordering::SeqCst), 0);
    assert!(store.stored_tokens().is_empty());
}

#[tokio::test]
async fn intercepted_register_stores_no_user() {
    let (mut server, store) = server_with_store(config());
    server.intercept_register(|_ctx| async { Ok(GateDecision::Intercept { code: 7 }) });

    let response = server
        .register(RegisterRequest {
            email: Some("a@b.com".into()),
            username: Some("alice".into()),
            password: Some("longpassword".into()),
        })
        .await;

    assert_eq!(response.codes.status, 9);
    assert_eq!(response.codes.intercept, 7);
    assert_eq!(store.user_count(), 0);
}

#[tokio::test]
async fn intercepted_logout_keeps_the_token() {
    let (mut server, store) = server_with_store(config());
    server.intercept_logout(|_ctx| async { Ok(GateDecision::Intercept { code: 1 }) });

    register_alice(&server).await;
    let tokens = server.login(login_request()).await.data.unwrap();

    let response = server
        .logout(LogoutRequest {
            refresh_token: Some(tokens.refresh_token.clone()),
        })
        .await;

    assert_eq!(response.codes.status, 9);
    assert_eq!(store.stored_tokens(), vec![tokens.refresh_token]);
}

#[tokio::test]
async fn gate_sees_the_minted_tokens() {
    let (mut server, _store) = server_with_store(config());
    server.intercept_login(|ctx| {
        assert!(!ctx.access_token.is_empty());
        assert!(!ctx.refresh_token.is_empty());
        assert!(!ctx.payload.id.is_empty());
        async { Ok(GateDecision::Pass) }
    });

    register_alice(&server).await;
    let response = server.login(login_request()).await;
    assert_eq!(response.codes.status, 0);
}

#[tokio::test]
async fn failing_gate_is_a_server_error() {
    let (mut server, store) = server_with_store(config());
    server.intercept_login(
        |_ctx| async { Err::<GateDecision, _>(HookError::collaborator("gate backend down")) },
    );

    register_alice(&server).await;
    let response = server.login(login_request()).await;

    assert!(response.error);
    assert!(!response.intercepted);
    assert_eq!(response.error_type, ErrorType::Server);
    assert_eq!(response.codes.status, 5);
    assert!(store.stored_tokens().is_empty());
}

// ---------------------------------------------------------------------------
// unregistered use events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unregistered_events_answer_a_server_error() {
    // No collaborator attached at all.
    let server = AuthServer::new(config());

    let register = server
        .register(RegisterRequest {
            email: Some("a@b.com".into()),
            username: Some("alice".into()),
            password: Some("longpassword".into()),
        })
        .await;
    assert!(register.error);
    assert_eq!(register.error_type, ErrorType::Server);
    assert_eq!(register.codes.status, 5);
    assert!(register.data.is_none());

    let login = server.login(login_request()).await;
    assert_eq!(login.error_type, ErrorType::Server);
}

#[tokio::test]
async fn validate_needs_no_collaborator() {
    // validate only decodes, so a bare server still answers it.
    let server = AuthServer::new(config());
    let response = server
        .validate(ValidateRequest {
            access_token: Some("garbage".into()),
        })
        .await;
    assert_eq!(response.codes.status, 3);
    assert_eq!(response.error_type, ErrorType::Method);
}

// ---------------------------------------------------------------------------
// method lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn disabled_method_answers_its_disabled_status() {
    let (server, _store) = server_with_store(
        config().with_method_state(Method::Login, MethodState::Disabled),
    );
    register_alice(&server).await;

    let response = server.login(login_request()).await;
    assert!(response.error);
    assert_eq!(response.codes.status, 1);

    // Disabled methods stay on the surface; removed ones do not.
    assert!(server.surface().contains(&Method::Login));
}

#[tokio::test]
async fn removed_method_leaves_the_surface() {
    let (server, _store) = server_with_store(
        config().with_method_state(Method::Check, MethodState::Removed),
    );

    assert!(!server.is_exposed(Method::Check));
    assert!(!server.surface().contains(&Method::Check));
    assert_eq!(server.surface().len(), Method::ALL.len() - 1);

    // A direct call still gets the disabled answer rather than a panic.
    let response = server.check(CheckRequest::default()).await;
    assert_eq!(response.codes.status, 1);
}

#[tokio::test]
async fn last_registration_wins() {
    let (mut server, _store) = server_with_store(config());
    server.intercept_login(|_ctx| async { Ok(GateDecision::Intercept { code: 1 }) });
    server.intercept_login(|_ctx| async { Ok(GateDecision::Pass) });

    register_alice(&server).await;
    let response = server.login(login_request()).await;
    assert_eq!(response.codes.status, 0);
}
