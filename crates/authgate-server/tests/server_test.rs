//! Integration tests for the six-method pipeline against the in-memory
//! collaborator.

use std::sync::Arc;

use authgate_core::protocol::{
    CheckRequest, LoginRequest, LoginResponse, LogoutRequest, RefreshRequest, RegisterRequest,
    RegisterResponse, ValidateRequest,
};
use authgate_core::response::ErrorType;
use authgate_core::{Sensitive, ServerConfig};
use authgate_server::AuthServer;
use authgate_server::memory::MemoryStore;

fn config() -> ServerConfig {
    ServerConfig::new("access-secret", "refresh-secret")
}

/// Server wired to a fresh in-memory store.
fn server_with_store(config: ServerConfig) -> (AuthServer, Arc<MemoryStore>) {
    let store = MemoryStore::new();
    let mut server = AuthServer::new(config);
    store.attach(&mut server);
    (server, store)
}

fn alice_registration() -> RegisterRequest {
    RegisterRequest {
        email: Some("a@b.com".into()),
        username: Some("alice".into()),
        password: Some("longpassword".into()),
    }
}

async fn register_alice(server: &AuthServer) -> RegisterResponse {
    server.register(alice_registration()).await
}

async fn login_alice(server: &AuthServer) -> LoginResponse {
    server
        .login(LoginRequest {
            login: Some("a@b.com".into()),
            password: Some("longpassword".into()),
        })
        .await
}

// ---------------------------------------------------------------------------
// register
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_succeeds_on_empty_store() {
    let (server, store) = server_with_store(config());

    let response = register_alice(&server).await;

    assert!(!response.error, "unexpected failure: {response:?}");
    assert_eq!(response.codes.status, 0);
    let data = response.data.unwrap();
    assert!(!data.id.is_empty());
    assert_eq!(data.email, "a@b.com");
    assert_eq!(data.username, "alice");
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn duplicate_email_is_ambiguous_by_default() {
    let (server, store) = server_with_store(config());
    register_alice(&server).await;

    let response = server
        .register(RegisterRequest {
            email: Some("a@b.com".into()),
            username: Some("bob".into()),
            password: Some("longpassword".into()),
        })
        .await;

    // sensitive.api defaults to true: the caller cannot tell which field
    // collided.
    assert_eq!(response.codes.status, 7);
    assert_eq!(response.message, "The \"login\" is already in use.");
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn duplicates_are_precise_without_sensitive_api() {
    let open = config().with_sensitive(Sensitive {
        api: false,
        logs: false,
    });
    let (server, _store) = server_with_store(open);
    register_alice(&server).await;

    let email_clash = server
        .register(RegisterRequest {
            email: Some("a@b.com".into()),
            username: Some("bob".into()),
            password: Some("longpassword".into()),
        })
        .await;
    assert_eq!(email_clash.codes.status, 5);

    let username_clash = server
        .register(RegisterRequest {
            email: Some("bob@b.com".into()),
            username: Some("alice".into()),
            password: Some("longpassword".into()),
        })
        .await;
    assert_eq!(username_clash.codes.status, 6);
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let (server, store) = server_with_store(config());

    let missing = server.register(RegisterRequest::default()).await;
    assert_eq!(missing.codes.status, 2);

    let malformed = server
        .register(RegisterRequest {
            email: Some("not-a-mail".into()),
            username: Some("alice".into()),
            password: Some("longpassword".into()),
        })
        .await;
    assert_eq!(malformed.codes.status, 3);

    let weak = server
        .register(RegisterRequest {
            email: Some("a@b.com".into()),
            username: Some("alice".into()),
            password: Some("short".into()),
        })
        .await;
    assert_eq!(weak.codes.status, 4);

    assert_eq!(store.user_count(), 0);
}

// ---------------------------------------------------------------------------
// login + validate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_issues_verifiable_tokens() {
    let (server, _store) = server_with_store(config());
    let registered = register_alice(&server).await.data.unwrap();

    let response = login_alice(&server).await;
    assert_eq!(response.codes.status, 0);
    let tokens = response.data.unwrap();
    assert!(!tokens.access_token.is_empty());
    assert!(!tokens.refresh_token.is_empty());

    // The access token validates and carries the registered id.
    let validated = server
        .validate(ValidateRequest {
            access_token: Some(tokens.access_token.clone()),
        })
        .await;
    assert_eq!(validated.codes.status, 0);
    assert_eq!(validated.data.unwrap().id, registered.id);
}

#[tokio::test]
async fn login_resolves_username_too() {
    let (server, _store) = server_with_store(config());
    register_alice(&server).await;

    let response = server
        .login(LoginRequest {
            login: Some("alice".into()),
            password: Some("longpassword".into()),
        })
        .await;
    assert_eq!(response.codes.status, 0);
}

#[tokio::test]
async fn login_failures_are_ambiguous_by_default() {
    let (server, _store) = server_with_store(config());
    register_alice(&server).await;

    let wrong_password = server
        .login(LoginRequest {
            login: Some("a@b.com".into()),
            password: Some("wrong-password".into()),
        })
        .await;
    assert_eq!(wrong_password.codes.status, 5);

    let unknown_user = server
        .login(LoginRequest {
            login: Some("nobody".into()),
            password: Some("longpassword".into()),
        })
        .await;
    assert_eq!(unknown_user.codes.status, 5);
    assert_eq!(wrong_password.message, unknown_user.message);
}

#[tokio::test]
async fn login_failures_are_precise_without_sensitive_api() {
    let open = config().with_sensitive(Sensitive {
        api: false,
        logs: false,
    });
    let (server, _store) = server_with_store(open);
    register_alice(&server).await;

    let unknown_user = server
        .login(LoginRequest {
            login: Some("nobody".into()),
            password: Some("longpassword".into()),
        })
        .await;
    assert_eq!(unknown_user.codes.status, 3);

    let wrong_password = server
        .login(LoginRequest {
            login: Some("alice".into()),
            password: Some("wrong-password".into()),
        })
        .await;
    assert_eq!(wrong_password.codes.status, 4);
}

#[tokio::test]
async fn validate_rejects_garbage() {
    let (server, _store) = server_with_store(config());

    let missing = server.validate(ValidateRequest::default()).await;
    assert_eq!(missing.codes.status, 2);

    let invalid = server
        .validate(ValidateRequest {
            access_token: Some("garbage".into()),
        })
        .await;
    assert_eq!(invalid.codes.status, 3);
    assert_eq!(invalid.error_type, ErrorType::Method);
}

// ---------------------------------------------------------------------------
// refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_mints_access_without_rotating() {
    let (server, store) = server_with_store(config());
    register_alice(&server).await;
    let tokens = login_alice(&server).await.data.unwrap();

    let response = server
        .refresh(RefreshRequest {
            refresh_token: Some(tokens.refresh_token.clone()),
        })
        .await;
    assert_eq!(response.codes.status, 0);
    let grant = response.data.unwrap();

    // The fresh access token validates.
    let validated = server
        .validate(ValidateRequest {
            access_token: Some(grant.access_token),
        })
        .await;
    assert_eq!(validated.codes.status, 0);

    // The stored refresh token is untouched.
    assert_eq!(store.stored_tokens(), vec![tokens.refresh_token.clone()]);

    // And stays usable for another refresh.
    let again = server
        .refresh(RefreshRequest {
            refresh_token: Some(tokens.refresh_token),
        })
        .await;
    assert_eq!(again.codes.status, 0);
}

#[tokio::test]
async fn refresh_rejects_revoked_and_invalid_tokens() {
    let (server, _store) = server_with_store(config());
    register_alice(&server).await;
    let tokens = login_alice(&server).await.data.unwrap();

    server
        .logout(LogoutRequest {
            refresh_token: Some(tokens.refresh_token.clone()),
        })
        .await;

    let revoked = server
        .refresh(RefreshRequest {
            refresh_token: Some(tokens.refresh_token),
        })
        .await;
    assert_eq!(revoked.codes.status, 4);

    let invalid = server
        .refresh(RefreshRequest {
            refresh_token: Some("garbage".into()),
        })
        .await;
    assert_eq!(invalid.codes.status, 3);
}

// ---------------------------------------------------------------------------
// logout + check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn check_confirms_a_live_session() {
    let (server, _store) = server_with_store(config());
    register_alice(&server).await;
    let tokens = login_alice(&server).await.data.unwrap();

    let response = server
        .check(CheckRequest {
            access_token: Some(tokens.access_token),
            refresh_token: Some(tokens.refresh_token),
        })
        .await;
    assert_eq!(response.codes.status, 0);
    assert!(!response.error);
    assert_eq!(response.data, Some(()));
}

#[tokio::test]
async fn logout_then_check_never_succeeds() {
    let (server, store) = server_with_store(config());
    register_alice(&server).await;
    let tokens = login_alice(&server).await.data.unwrap();

    let logout = server
        .logout(LogoutRequest {
            refresh_token: Some(tokens.refresh_token.clone()),
        })
        .await;
    assert_eq!(logout.codes.status, 0);
    assert_eq!(logout.data, Some(()));
    assert!(store.stored_tokens().is_empty());

    let check = server
        .check(CheckRequest {
            access_token: Some(tokens.access_token),
            refresh_token: Some(tokens.refresh_token),
        })
        .await;
    assert_eq!(check.codes.status, 4);
    assert_eq!(check.message, "The \"refreshToken\" does not exist.");
}

#[tokio::test]
async fn check_rejects_an_invalid_access_token() {
    let (server, _store) = server_with_store(config());
    register_alice(&server).await;
    let tokens = login_alice(&server).await.data.unwrap();

    let response = server
        .check(CheckRequest {
            access_token: Some("garbage".into()),
            refresh_token: Some(tokens.refresh_token),
        })
        .await;
    assert_eq!(response.codes.status, 5);
    assert_eq!(response.error_type, ErrorType::Method);
}

#[tokio::test]
async fn check_requires_both_tokens() {
    let (server, _store) = server_with_store(config());
    register_alice(&server).await;
    let tokens = login_alice(&server).await.data.unwrap();

    let response = server
        .check(CheckRequest {
            access_token: Some(tokens.access_token),
            refresh_token: None,
        })
        .await;
    assert_eq!(response.codes.status, 2);
}
