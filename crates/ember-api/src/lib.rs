//! # ember-api
//!
//! REST API layer for the Ember admin services: role management and photo
//! moderation endpoints, JWT authentication, and the per-route capability gate.

pub mod auth;
pub mod middleware;
pub mod routes;

use axum::Router;
use ember_db::repository::{PgModerationStore, PgRoleStore};
use ember_db::storage::StorageClient;
use ember_db::Database;
use ember_moderation::{AdminQueryService, ModerationService, RoleService};
use std::sync::Arc;

/// Shared application state available to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    /// Role assignment — diff-and-apply edits of an account's role set.
    pub roles: RoleService<PgRoleStore>,
    /// Read-only account/role listing.
    pub queries: AdminQueryService<PgRoleStore>,
    /// Pending-photo listing and approve/reject transitions.
    pub moderation: ModerationService<PgModerationStore, StorageClient>,
}

impl AppState {
    /// Wire the services onto their PostgreSQL and S3 backends.
    pub fn new(db: Database, storage: StorageClient) -> Self {
        let role_store = PgRoleStore::new(db.pg.clone());
        let moderation_store = PgModerationStore::new(db.pg.clone());

        Self {
            roles: RoleService::new(role_store.clone()),
            queries: AdminQueryService::new(role_store),
            moderation: ModerationService::new(moderation_store, storage),
            db,
        }
    }
}

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(routes::admin::router())
        .merge(routes::health::router());

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
