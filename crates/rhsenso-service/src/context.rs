//! Request context carrying the authenticated principal and its grants.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use rhsenso_auth::{Claims, PermissionSet};
use rhsenso_core::config::AuthStrategyKind;
use rhsenso_core::error::AppError;
use rhsenso_entity::permission::Action;

/// Context for the current authenticated request.
///
/// Built from the validated access token and passed into every service
/// method so that each operation knows *who* is acting and what they may do.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The acting subject (`tuse1` login or tenant user id).
    pub subject: String,
    /// Display name from the token.
    pub display_name: String,
    /// Tenant of hosted accounts.
    pub tenant_id: Option<Uuid>,
    /// Strategy the subject logged in with.
    pub strategy: AuthStrategyKind,
    /// Granted actions.
    pub permissions: PermissionSet,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

/// The caller's identity as returned by `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Subject.
    pub subject: String,
    /// Display name.
    pub display_name: String,
    /// Tenant, for hosted accounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
    /// Login strategy.
    pub strategy: AuthStrategyKind,
    /// Administrator flag.
    pub admin: bool,
    /// Granted letters per resource.
    pub permissions: BTreeMap<String, String>,
}

impl RequestContext {
    /// Creates a context from validated token claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            subject: claims.sub.clone(),
            display_name: claims.name.clone(),
            tenant_id: claims.tenant_id,
            strategy: claims.strategy,
            permissions: claims.permission_set(),
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.permissions.is_admin()
    }

    /// Fail with `Forbidden` unless the caller may perform `action` on `resource`.
    pub fn require(&self, resource: &str, action: Action) -> Result<(), AppError> {
        self.permissions.require(resource, action)
    }

    /// The caller's identity.
    pub fn identity(&self) -> Identity {
        Identity {
            subject: self.subject.clone(),
            display_name: self.display_name.clone(),
            tenant_id: self.tenant_id,
            strategy: self.strategy,
            admin: self.is_admin(),
            permissions: self.permissions.to_claim_map(),
        }
    }
}
