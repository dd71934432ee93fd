//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Which credential-verification backend the login endpoint uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStrategyKind {
    /// Login and password checked against the legacy `tuse1` table.
    #[default]
    OnPrem,
    /// Identity asserted by a Negotiate/NTLM-terminating front proxy.
    Windows,
    /// Tenant-scoped e-mail and password.
    SaaS,
}

impl std::fmt::Display for AuthStrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OnPrem => write!(f, "onprem"),
            Self::Windows => write!(f, "windows"),
            Self::SaaS => write!(f, "saas"),
        }
    }
}

/// Authentication and token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Credential-verification backend.
    #[serde(default)]
    pub strategy: AuthStrategyKind,
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_ttl")]
    pub jwt_ttl_minutes: u64,
    /// Value of the `iss` claim; tokens from other issuers are rejected.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Header carrying the proxy-authenticated user for the Windows strategy.
    #[serde(default = "default_windows_header")]
    pub windows_user_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            strategy: AuthStrategyKind::default(),
            jwt_secret: default_jwt_secret(),
            jwt_ttl_minutes: default_ttl(),
            issuer: default_issuer(),
            windows_user_header: default_windows_header(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_ttl() -> u64 {
    60
}

fn default_issuer() -> String {
    "rhsenso".to_string()
}

fn default_windows_header() -> String {
    "x-remote-user".to_string()
}
