//! Account models consulted at login.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A local user in the legacy `tuse1` table.
///
/// Used by the on-premises and Windows strategies. Windows-only accounts
/// have no password hash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LocalUser {
    /// Login name.
    #[sqlx(rename = "cdusuario")]
    pub login: String,
    /// Display name.
    #[sqlx(rename = "dcusuario")]
    pub display_name: String,
    /// E-mail address.
    pub email: Option<String>,
    /// Argon2 password hash.
    #[sqlx(rename = "senhahash")]
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Whether the account may log in.
    #[sqlx(rename = "flativo")]
    pub active: bool,
    /// Administrators bypass resource grants.
    #[sqlx(rename = "fladmin")]
    pub admin: bool,
}

/// A tenant-scoped user of the hosted deployment (`saas_users`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TenantUser {
    /// Unique user identifier.
    pub id: Uuid,
    /// Owning tenant.
    pub tenant_id: Uuid,
    /// Login e-mail, unique per tenant.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the account may log in.
    pub active: bool,
    /// Administrators bypass resource grants.
    pub admin: bool,
}

/// The authenticated principal, whichever strategy produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Subject used for grant lookup: the `tuse1` login or the tenant user id.
    pub subject: String,
    /// Display name.
    pub display_name: String,
    /// Tenant for hosted accounts.
    pub tenant_id: Option<Uuid>,
    /// Administrator flag.
    pub admin: bool,
}

impl From<&LocalUser> for Principal {
    fn from(user: &LocalUser) -> Self {
        Self {
            subject: user.login.clone(),
            display_name: user.display_name.clone(),
            tenant_id: None,
            admin: user.admin,
        }
    }
}

impl From<&TenantUser> for Principal {
    fn from(user: &TenantUser) -> Self {
        Self {
            subject: user.id.to_string(),
            display_name: user.display_name.clone(),
            tenant_id: Some(user.tenant_id),
            admin: user.admin,
        }
    }
}
