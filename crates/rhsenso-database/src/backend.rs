//! Storage backend selection.

use std::sync::Arc;

use tracing::info;

use rhsenso_core::config::{DatabaseConfig, StoreProvider};
use rhsenso_core::result::AppResult;
use rhsenso_core::traits::TableRepository;

use crate::connection::DatabasePool;
use crate::migration::run_migrations;
use crate::repositories::{
    AccountStore, MemoryAccountStore, MemoryTableRepository, PgAccountStore, PgTableRepository,
    SqlEntity,
};

/// The configured store, handing out repositories for any entity.
#[derive(Debug, Clone)]
pub enum Backend {
    /// PostgreSQL pool.
    Postgres(DatabasePool),
    /// Process-local tables and accounts.
    Memory(MemoryAccountStore),
}

impl Backend {
    /// Connect (and migrate) according to configuration.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Postgres => {
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(db.pool()).await?;
                }
                Ok(Self::Postgres(db))
            }
            StoreProvider::Memory => {
                info!("Using in-memory store; data is lost on shutdown");
                Ok(Self::memory())
            }
        }
    }

    /// A fresh in-memory backend.
    pub fn memory() -> Self {
        Self::Memory(MemoryAccountStore::new())
    }

    /// Repository for entity `E`.
    ///
    /// Memory backends return a new empty table on every call, so callers
    /// create each repository once and share it.
    pub fn repository<E: SqlEntity>(&self) -> Arc<dyn TableRepository<E>> {
        match self {
            Self::Postgres(db) => Arc::new(PgTableRepository::<E>::new(db.pool().clone())),
            Self::Memory(_) => Arc::new(MemoryTableRepository::<E>::new()),
        }
    }

    /// Account store for authentication.
    pub fn accounts(&self) -> Arc<dyn AccountStore> {
        match self {
            Self::Postgres(db) => Arc::new(PgAccountStore::new(db.pool().clone())),
            Self::Memory(accounts) => Arc::new(accounts.clone()),
        }
    }

    /// Readiness probe.
    pub async fn ping(&self) -> AppResult<()> {
        match self {
            Self::Postgres(db) => db.health_check().await,
            Self::Memory(_) => Ok(()),
        }
    }

    /// Release pooled connections.
    pub async fn close(&self) {
        if let Self::Postgres(db) = self {
            db.close().await;
        }
    }
}
