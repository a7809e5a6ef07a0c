//! HTTP surface for the durian inventory transaction engine.
//!
//! Routing, JSON binding, the uniform response envelope, and request-
//! scoped auth context extraction live here; the business rules they
//! call into live in `inventory_service_core`/`inventory_service_infra`
//! (§1: this crate is the out-of-scope HTTP layer's half of the
//! contract, not the core itself).

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;

use shared_config::Config;
use shared_db::init_pool;

/// Build the complete application with database initialization. Used by
/// integration tests that need a real router without going through
/// `main`.
pub async fn create_app(config: &Config) -> axum::Router {
    let pool = init_pool(&config.database_url, config.max_connections.unwrap_or(10))
        .await
        .expect("failed to initialize database pool");
    create_router(pool, config)
}
