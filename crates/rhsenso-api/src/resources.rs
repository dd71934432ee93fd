//! Registration of table entities as `/api/{resource}` routes.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use rhsenso_core::traits::{Entity, TableRepository};
use rhsenso_database::repositories::SqlEntity;
use rhsenso_entity::{Batida, Horario, Jornada, MotivoFrequencia, OcorrenciaFrequencia};
use rhsenso_service::CrudService;

use crate::dto::response::ResourceInfo;
use crate::handlers::catalog::list_resources;
use crate::handlers::crud::{self, ResourceState};
use crate::state::AppState;

/// Collects per-entity routes and the catalog describing them.
pub struct ResourceRegistry {
    state: AppState,
    router: Router<AppState>,
    catalog: Vec<ResourceInfo>,
}

impl ResourceRegistry {
    /// Start an empty registry.
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            router: Router::new(),
            catalog: Vec::new(),
        }
    }

    /// Expose `E` backed by the configured store.
    pub fn register<E: SqlEntity>(self) -> Self {
        let repo = self.state.backend.repository::<E>();
        self.register_with(repo)
    }

    /// Expose `E` backed by `repo`.
    pub fn register_with<E: Entity>(mut self, repo: Arc<dyn TableRepository<E>>) -> Self {
        let schema = E::schema();
        let resource_state = ResourceState {
            service: CrudService::new(repo, self.state.config.pagination),
            jwt_decoder: Arc::clone(&self.state.jwt_decoder),
        };

        let base = format!("/{}", schema.resource);
        let routes = Router::new()
            .route(
                &base,
                get(crud::list::<E>)
                    .post(crud::create::<E>)
                    .put(crud::update::<E>)
                    .delete(crud::delete::<E>),
            )
            .route(&format!("{base}/find"), get(crud::find::<E>))
            .route(&format!("{base}/by-key"), get(crud::by_key::<E>))
            .with_state(resource_state);

        self.router = self.router.merge(routes);
        self.catalog.push(ResourceInfo::from(schema));
        self
    }

    /// Routes for every registered resource plus `/resources`.
    pub fn into_router(self) -> Router<AppState> {
        let catalog = Router::new()
            .route("/resources", get(list_resources))
            .with_state(Arc::new(self.catalog));
        self.router.merge(catalog)
    }
}

/// The legacy tables exposed by this server.
pub fn legacy_resources(state: &AppState) -> Router<AppState> {
    ResourceRegistry::new(state)
        .register::<Jornada>()
        .register::<Horario>()
        .register::<MotivoFrequencia>()
        .register::<OcorrenciaFrequencia>()
        .register::<Batida>()
        .into_router()
}
