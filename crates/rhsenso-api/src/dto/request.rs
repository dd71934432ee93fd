//! Request DTOs with validation.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use rhsenso_auth::LoginCredentials;

/// Login request body. Which fields are needed depends on the configured
/// strategy; the Windows strategy reads its identity from a header.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// `tuse1` login.
    #[validate(length(min = 1, max = 30, message = "must be 1 to 30 characters"))]
    pub login: Option<String>,
    /// Password.
    #[validate(length(min = 1, max = 128, message = "must be 1 to 128 characters"))]
    pub password: Option<String>,
    /// Tenant for hosted accounts.
    pub tenant_id: Option<Uuid>,
    /// E-mail for hosted accounts.
    #[validate(email(message = "must be a valid e-mail address"))]
    pub email: Option<String>,
}

impl LoginRequest {
    /// Convert into strategy input, attaching the proxy-asserted identity.
    pub fn into_credentials(self, remote_user: Option<String>) -> LoginCredentials {
        LoginCredentials {
            login: self.login,
            password: self.password,
            tenant_id: self.tenant_id,
            email: self.email,
            remote_user,
        }
    }
}
