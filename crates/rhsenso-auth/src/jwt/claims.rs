//! JWT claims structure used in access tokens.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rhsenso_core::config::AuthStrategyKind;

use crate::permission::PermissionSet;

/// JWT claims payload embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the `tuse1` login or the tenant user id.
    pub sub: String,
    /// Display name for convenience.
    pub name: String,
    /// Tenant of hosted accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
    /// Strategy that authenticated the subject.
    pub strategy: AuthStrategyKind,
    /// Administrator flag.
    #[serde(default)]
    pub admin: bool,
    /// Granted action letters per resource.
    #[serde(default)]
    pub permissions: BTreeMap<String, String>,
    /// Issuer.
    pub iss: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token id.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// The grants carried by this token.
    pub fn permission_set(&self) -> PermissionSet {
        PermissionSet::from_claim_map(self.admin, &self.permissions)
    }
}
