//! Account and permission lookups used at login.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use rhsenso_core::result::AppResult;
use rhsenso_entity::permission::PermissionGrant;
use rhsenso_entity::user::{LocalUser, TenantUser};

use crate::error::map_sqlx_error;

/// Read access to the account tables.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Find a `tuse1` user by login (case-insensitive).
    async fn find_local(&self, login: &str) -> AppResult<Option<LocalUser>>;

    /// Find a hosted user by tenant and e-mail (e-mail case-insensitive).
    async fn find_tenant_user(&self, tenant_id: Uuid, email: &str) -> AppResult<Option<TenantUser>>;

    /// All grants for a subject.
    async fn grants(&self, subject: &str) -> AppResult<Vec<PermissionGrant>>;
}

/// PostgreSQL-backed account store.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    /// Create a new account store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_local(&self, login: &str) -> AppResult<Option<LocalUser>> {
        sqlx::query_as::<_, LocalUser>(
            "SELECT cdusuario, dcusuario, email, senhahash, flativo, fladmin \
             FROM tuse1 WHERE LOWER(cdusuario) = LOWER($1)",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to find user by login"))
    }

    async fn find_tenant_user(&self, tenant_id: Uuid, email: &str) -> AppResult<Option<TenantUser>> {
        sqlx::query_as::<_, TenantUser>(
            "SELECT id, tenant_id, email, display_name, password_hash, active, admin \
             FROM saas_users WHERE tenant_id = $1 AND LOWER(email) = LOWER($2)",
        )
        .bind(tenant_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to find tenant user"))
    }

    async fn grants(&self, subject: &str) -> AppResult<Vec<PermissionGrant>> {
        sqlx::query_as::<_, PermissionGrant>(
            "SELECT subject, resource, actions FROM user_permissions \
             WHERE subject = $1 ORDER BY resource",
        )
        .bind(subject)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to load permissions"))
    }
}

#[derive(Debug, Default)]
struct Accounts {
    local: HashMap<String, LocalUser>,
    tenant: Vec<TenantUser>,
    grants: Vec<PermissionGrant>,
}

/// In-memory account store, seeded explicitly.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    inner: Arc<RwLock<Accounts>>,
}

impl MemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a local user.
    pub async fn add_local(&self, user: LocalUser) {
        let mut accounts = self.inner.write().await;
        accounts.local.insert(user.login.to_lowercase(), user);
    }

    /// Add a hosted user.
    pub async fn add_tenant_user(&self, user: TenantUser) {
        self.inner.write().await.tenant.push(user);
    }

    /// Grant `actions` (legacy letters) on `resource` to `subject`,
    /// replacing any previous grant for that pair.
    pub async fn grant(&self, subject: &str, resource: &str, actions: &str) {
        let mut accounts = self.inner.write().await;
        accounts
            .grants
            .retain(|g| !(g.subject == subject && g.resource == resource));
        accounts.grants.push(PermissionGrant {
            subject: subject.to_string(),
            resource: resource.to_string(),
            actions: actions.to_string(),
        });
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_local(&self, login: &str) -> AppResult<Option<LocalUser>> {
        Ok(self.inner.read().await.local.get(&login.to_lowercase()).cloned())
    }

    async fn find_tenant_user(&self, tenant_id: Uuid, email: &str) -> AppResult<Option<TenantUser>> {
        Ok(self
            .inner
            .read()
            .await
            .tenant
            .iter()
            .find(|u| u.tenant_id == tenant_id && u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn grants(&self, subject: &str) -> AppResult<Vec<PermissionGrant>> {
        let mut grants: Vec<PermissionGrant> = self
            .inner
            .read()
            .await
            .grants
            .iter()
            .filter(|g| g.subject == subject)
            .cloned()
            .collect();
        grants.sort_by(|a, b| a.resource.cmp(&b.resource));
        Ok(grants)
    }
}
