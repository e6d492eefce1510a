//! In-memory reference collaborator.
//!
//! Implements every use event against plain in-process tables: Argon2id
//! for password hashing, UUID v4 ids, and deliberately simple mail and
//! password rules. Good enough for tests and demos; a real deployment
//! registers its own storage and crypto instead.

use std::sync::Arc;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use parking_lot::Mutex;
use uuid::Uuid;

use authgate_core::error::{HookError, HookResult};
use authgate_core::user::{
    GeneratedId, HashedPassword, PasswordMatch, StoredUser, TokenExists, UserLookup, Validity,
};

use crate::server::AuthServer;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// `Vec`-backed user and refresh-token tables.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<StoredUser>>,
    tokens: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn find_by_email(&self, email: &str) -> Option<StoredUser> {
        self.users
            .lock()
            .iter()
            .find(|user| user.email == email)
            .cloned()
    }

    fn find_by_username(&self, username: &str) -> Option<StoredUser> {
        self.users
            .lock()
            .iter()
            .find(|user| user.username == username)
            .cloned()
    }

    fn insert_user(&self, user: StoredUser) {
        self.users.lock().push(user);
    }

    fn token_exists(&self, refresh_token: &str) -> bool {
        self.tokens.lock().iter().any(|token| token == refresh_token)
    }

    fn insert_token(&self, refresh_token: String) {
        self.tokens.lock().push(refresh_token);
    }

    fn remove_token(&self, refresh_token: &str) {
        self.tokens.lock().retain(|token| token != refresh_token);
    }

    /// Number of stored users (test observability).
    pub fn user_count(&self) -> usize {
        self.users.lock().len()
    }

    /// Snapshot of the stored refresh tokens (test observability).
    pub fn stored_tokens(&self) -> Vec<String> {
        self.tokens.lock().clone()
    }

    /// Hash a password with Argon2id and a fresh random salt.
    fn hash_password(password: &str) -> HookResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HookError::collaborator(format!("password hashing failed: {e}")))
    }

    /// Verify a password against a PHC-format Argon2id hash. A mismatch is
    /// `Ok(false)`; a malformed stored hash is a collaborator failure.
    fn verify_password(password: &str, hash: &str) -> HookResult<bool> {
        let parsed = argon2::PasswordHash::new(hash)
            .map_err(|e| HookError::collaborator(format!("invalid hash format: {e}")))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HookError::collaborator(format!("verify error: {e}"))),
        }
    }

    /// Register every use event on `server`, backed by this store.
    pub fn attach(self: &Arc<Self>, server: &mut AuthServer) {
        let store = Arc::clone(self);
        server.on_get_user_by_mail(move |query| {
            let store = Arc::clone(&store);
            async move {
                Ok(UserLookup {
                    user: store.find_by_email(&query.email),
                })
            }
        });

        let store = Arc::clone(self);
        server.on_get_user_by_name(move |query| {
            let store = Arc::clone(&store);
            async move {
                Ok(UserLookup {
                    user: store.find_by_username(&query.username),
                })
            }
        });

        let store = Arc::clone(self);
        server.on_store_user(move |input| {
            let store = Arc::clone(&store);
            async move {
                store.insert_user(input.user);
                Ok(())
            }
        });

        server.on_hash_password(|input| async move {
            Ok(HashedPassword {
                hashed_password: Self::hash_password(&input.password)?,
            })
        });

        server.on_check_password(|input| async move {
            Ok(PasswordMatch {
                matches: Self::verify_password(&input.password, &input.hashed_password)?,
            })
        });

        let store = Arc::clone(self);
        server.on_check_token(move |input| {
            let store = Arc::clone(&store);
            async move {
                Ok(TokenExists {
                    exists: store.token_exists(&input.refresh_token),
                })
            }
        });

        let store = Arc::clone(self);
        server.on_store_token(move |input| {
            let store = Arc::clone(&store);
            async move {
                store.insert_token(input.refresh_token);
                Ok(())
            }
        });

        let store = Arc::clone(self);
        server.on_delete_token(move |input| {
            let store = Arc::clone(&store);
            async move {
                store.remove_token(&input.refresh_token);
                Ok(())
            }
        });

        server.on_validate_mail(|query| async move {
            Ok(Validity {
                is_valid: query.email.contains('@'),
            })
        });

        server.on_validate_password(|input| async move {
            Ok(Validity {
                is_valid: input.password.len() >= MIN_PASSWORD_LENGTH,
            })
        });

        server.on_gen_id(|_seed| async move {
            Ok(GeneratedId {
                id: Uuid::new_v4().to_string(),
            })
        });
    }
}
