//! End-to-end walkthrough against the in-memory collaborator.
//!
//! Run with `cargo run -p authgate-server --example memory_demo`; set
//! `RUST_LOG=debug` to watch the per-step pipeline logs.

use authgate_core::{GateDecision, ServerConfig};
use authgate_core::protocol::{CheckRequest, LoginRequest, LogoutRequest, RegisterRequest};
use authgate_server::AuthServer;
use authgate_server::memory::MemoryStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut server = AuthServer::new(ServerConfig::new("access-secret", "refresh-secret"));
    MemoryStore::new().attach(&mut server);

    // Veto any login for a blocked account with an application code.
    server.intercept_login(|ctx| async move {
        if ctx.user.username == "mallory" {
            return Ok(GateDecision::Intercept { code: 42 });
        }
        Ok(GateDecision::Pass)
    });

    let registered = server
        .register(RegisterRequest {
            email: Some("alice@example.com".into()),
            username: Some("alice".into()),
            password: Some("longpassword".into()),
        })
        .await;
    println!("register:\n{}\n", pretty(&registered));

    let login = server
        .login(LoginRequest {
            login: Some("alice".into()),
            password: Some("longpassword".into()),
        })
        .await;
    println!("login:\n{}\n", pretty(&login));

    let tokens = match login.data {
        Some(tokens) => tokens,
        None => return,
    };

    let check = server
        .check(CheckRequest {
            access_token: Some(tokens.access_token.clone()),
            refresh_token: Some(tokens.refresh_token.clone()),
        })
        .await;
    println!("check:\n{}\n", pretty(&check));

    let logout = server
        .logout(LogoutRequest {
            refresh_token: Some(tokens.refresh_token),
        })
        .await;
    println!("logout:\n{}", pretty(&logout));
}

fn pretty<D: serde::Serialize>(response: &D) -> String {
    serde_json::to_string_pretty(response).unwrap_or_default()
}
