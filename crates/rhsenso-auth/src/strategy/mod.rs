//! Credential verification backends.
//!
//! One strategy is active per deployment, chosen by `auth.strategy`. Each
//! one turns a login attempt into a [`Principal`] or a uniform
//! `Unauthorized` error that does not reveal which part of the attempt
//! failed.

mod windows;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use rhsenso_core::config::{AuthConfig, AuthStrategyKind};
use rhsenso_core::error::AppError;
use rhsenso_core::result::AppResult;
use rhsenso_database::repositories::AccountStore;
use rhsenso_entity::user::Principal;

use crate::password::PasswordHasher;

pub use windows::normalize_windows_user;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Everything a login attempt may carry. Which fields are required
/// depends on the strategy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginCredentials {
    /// `tuse1` login (on-premises).
    pub login: Option<String>,
    /// Plaintext password (on-premises and hosted).
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Tenant (hosted).
    pub tenant_id: Option<Uuid>,
    /// E-mail (hosted).
    pub email: Option<String>,
    /// Identity asserted by the authenticating proxy (Windows).
    pub remote_user: Option<String>,
}

/// The configured credential-verification backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Login and password against `tuse1`.
    OnPrem,
    /// Proxy-asserted identity mapped to `tuse1`.
    Windows {
        /// Request header the proxy sets.
        header: String,
    },
    /// Tenant, e-mail and password against `saas_users`.
    SaaS,
}

impl AuthStrategy {
    /// Select the strategy named in configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        match config.strategy {
            AuthStrategyKind::OnPrem => Self::OnPrem,
            AuthStrategyKind::Windows => Self::Windows {
                header: config.windows_user_header.to_ascii_lowercase(),
            },
            AuthStrategyKind::SaaS => Self::SaaS,
        }
    }

    /// The configuration value of this strategy.
    pub fn kind(&self) -> AuthStrategyKind {
        match self {
            Self::OnPrem => AuthStrategyKind::OnPrem,
            Self::Windows { .. } => AuthStrategyKind::Windows,
            Self::SaaS => AuthStrategyKind::SaaS,
        }
    }

    /// Header carrying the proxy-asserted identity, for the Windows strategy.
    pub fn identity_header(&self) -> Option<&str> {
        match self {
            Self::Windows { header } => Some(header),
            _ => None,
        }
    }

    /// Verify a login attempt.
    pub async fn authenticate(
        &self,
        credentials: &LoginCredentials,
        accounts: &dyn AccountStore,
        hasher: &PasswordHasher,
    ) -> AppResult<Principal> {
        match self {
            Self::OnPrem => {
                let login = required(credentials.login.as_deref(), "login")?;
                let password = required(credentials.password.as_deref(), "password")?;

                let user = accounts.find_local(login).await?.filter(|u| u.active);
                let verified = match user.as_ref().and_then(|u| u.password_hash.as_deref()) {
                    Some(hash) => hasher.verify_password(password, hash)?,
                    None => hasher.verify_missing_account(password),
                };
                match user {
                    Some(user) if verified => Ok(Principal::from(&user)),
                    _ => Err(rejected()),
                }
            }
            Self::Windows { header } => {
                let asserted = credentials
                    .remote_user
                    .as_deref()
                    .filter(|v| !v.trim().is_empty())
                    .ok_or_else(|| {
                        AppError::unauthorized(format!("Missing '{header}' identity header"))
                    })?;
                let login = normalize_windows_user(asserted).ok_or_else(rejected)?;
                debug!(asserted, login, "Mapping Windows identity");

                let user = accounts
                    .find_local(login)
                    .await?
                    .filter(|u| u.active)
                    .ok_or_else(rejected)?;
                Ok(Principal::from(&user))
            }
            Self::SaaS => {
                let tenant_id = credentials
                    .tenant_id
                    .ok_or_else(|| AppError::validation("tenantId is required"))?;
                let email = required(credentials.email.as_deref(), "email")?;
                let password = required(credentials.password.as_deref(), "password")?;

                let user = accounts
                    .find_tenant_user(tenant_id, email)
                    .await?
                    .filter(|u| u.active);
                let verified = match &user {
                    Some(user) => hasher.verify_password(password, &user.password_hash)?,
                    None => hasher.verify_missing_account(password),
                };
                match user {
                    Some(user) if verified => Ok(Principal::from(&user)),
                    _ => Err(rejected()),
                }
            }
        }
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::validation(format!("{field} is required")))
}

fn rejected() -> AppError {
    AppError::unauthorized(INVALID_CREDENTIALS)
}
