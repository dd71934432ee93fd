//! Login: strategy verification, grant loading and token issuance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};

use rhsenso_auth::{AuthStrategy, JwtEncoder, LoginCredentials, PasswordHasher, PermissionSet};
use rhsenso_core::result::AppResult;
use rhsenso_database::repositories::AccountStore;

use crate::context::{Identity, RequestContext};

/// Successful login response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    /// Signed access token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// The authenticated identity.
    pub user: Identity,
}

/// Verifies credentials with the configured strategy and issues tokens.
#[derive(Clone)]
pub struct AuthService {
    strategy: AuthStrategy,
    accounts: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(strategy: AuthStrategy, accounts: Arc<dyn AccountStore>, encoder: JwtEncoder) -> Self {
        Self {
            strategy,
            accounts,
            hasher: PasswordHasher::new(),
            encoder,
        }
    }

    /// The active strategy.
    pub fn strategy(&self) -> &AuthStrategy {
        &self.strategy
    }

    /// Authenticate and issue an access token carrying the subject's grants.
    #[instrument(skip(self, credentials), fields(strategy = %self.strategy.kind()))]
    pub async fn login(&self, credentials: &LoginCredentials) -> AppResult<LoginResult> {
        let principal = match self
            .strategy
            .authenticate(credentials, self.accounts.as_ref(), &self.hasher)
            .await
        {
            Ok(principal) => principal,
            Err(e) => {
                warn!(
                    login = credentials.login.as_deref().or(credentials.email.as_deref()),
                    error = %e,
                    "Login rejected"
                );
                return Err(e);
            }
        };

        let grants = self.accounts.grants(&principal.subject).await?;
        let permissions = PermissionSet::from_grants(principal.admin, &grants);
        let token = self
            .encoder
            .issue(&principal, self.strategy.kind(), &permissions)?;

        info!(
            target: "rhsenso::audit",
            action = "login",
            actor = %principal.subject,
            "User logged in"
        );

        let ctx = RequestContext::from_claims(&token.claims);
        Ok(LoginResult {
            access_token: token.access_token,
            token_type: "Bearer",
            expires_at: token.expires_at,
            user: ctx.identity(),
        })
    }

    /// The caller's identity and grants.
    pub fn me(&self, ctx: &RequestContext) -> Identity {
        ctx.identity()
    }
}
