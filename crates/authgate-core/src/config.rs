//! Engine configuration.
//!
//! Defaults are applied field by field at construction; the config is
//! immutable afterwards.

use serde::{Deserialize, Serialize};

use crate::protocol::{Method, MethodState};

/// Signing secrets for the two credential kinds. Access and refresh tokens
/// must never share verification material with each other by accident, so
/// both are always spelled out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secrets {
    pub access_token: String,
    pub refresh_token: String,
}

/// Sensitive-mode toggles. See [`crate::policy::DisclosurePolicy`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sensitive {
    /// Merge enumeration-prone API errors into ambiguous ones.
    pub api: bool,
    /// Mask the same detail in log lines as well.
    pub logs: bool,
}

impl Default for Sensitive {
    fn default() -> Self {
        // The API is guarded by default; logs stay precise by default.
        Self {
            api: true,
            logs: false,
        }
    }
}

/// Per-method lifecycle states.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MethodStates {
    pub validate: MethodState,
    pub register: MethodState,
    pub login: MethodState,
    pub logout: MethodState,
    pub refresh: MethodState,
    pub check: MethodState,
}

impl MethodStates {
    pub fn state(&self, method: Method) -> MethodState {
        match method {
            Method::Validate => self.validate,
            Method::Register => self.register,
            Method::Login => self.login,
            Method::Logout => self.logout,
            Method::Refresh => self.refresh,
            Method::Check => self.check,
        }
    }

    pub fn set(&mut self, method: Method, state: MethodState) {
        match method {
            Method::Validate => self.validate = state,
            Method::Register => self.register = state,
            Method::Login => self.login = state,
            Method::Logout => self.logout = state,
            Method::Refresh => self.refresh = state,
            Method::Check => self.check = state,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub secrets: Secrets,
    /// Access-token lifetime in seconds (default: 900 = 15 minutes).
    /// Refresh tokens carry no expiry; they are revoked by deletion.
    pub expires_in: u64,
    pub sensitive: Sensitive,
    pub methods: MethodStates,
}

impl ServerConfig {
    /// Build a config from the two mandatory secrets, defaulting every
    /// other field.
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            secrets: Secrets {
                access_token: access_secret.into(),
                refresh_token: refresh_secret.into(),
            },
            expires_in: 900,
            sensitive: Sensitive::default(),
            methods: MethodStates::default(),
        }
    }

    pub fn with_expires_in(mut self, seconds: u64) -> Self {
        self.expires_in = seconds;
        self
    }

    pub fn with_sensitive(mut self, sensitive: Sensitive) -> Self {
        self.sensitive = sensitive;
        self
    }

    pub fn with_method_state(mut self, method: Method, state: MethodState) -> Self {
        self.methods.set(method, state);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_protocol_contract() {
        let config = ServerConfig::new("access", "refresh");
        assert_eq!(config.expires_in, 900);
        assert!(config.sensitive.api);
        assert!(!config.sensitive.logs);
        for method in Method::ALL {
            assert_eq!(config.methods.state(method), MethodState::Active);
        }
    }

    #[test]
    fn method_states_are_addressable_by_method() {
        let config = ServerConfig::new("a", "r")
            .with_method_state(Method::Register, MethodState::Disabled)
            .with_method_state(Method::Check, MethodState::Removed);
        assert_eq!(config.methods.state(Method::Register), MethodState::Disabled);
        assert_eq!(config.methods.state(Method::Check), MethodState::Removed);
        assert_eq!(config.methods.state(Method::Login), MethodState::Active);
    }
}
