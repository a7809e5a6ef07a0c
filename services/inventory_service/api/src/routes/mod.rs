//! Route definitions and router construction.
//!
//! Wires the PostgreSQL repository/service implementations from
//! `inventory_service_infra` into the trait objects `AppState` carries,
//! then nests each component's route group under its `/v1/...` prefix
//! (§6). CORS, JWT verification, and RBAC route guards are the
//! out-of-scope HTTP layer (§1); this crate only reads the user-auth
//! record the layer in front of it is expected to place on request
//! headers (`auth.rs`).

use std::sync::Arc;

use axum::Router;
use shared_config::Config;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use inventory_service_infra::{
    PgDestinationRepository, PgFruitRepository, PgFruitService, PgLotRepository, PgLotService,
    PgSaleRepository, PgSaleService, PgSequenceAllocator, PgShipmentItemRepository,
    PgShipmentRepository, PgShipmentService, PgTreeRepository, PgVarietyRepository,
};
use inventory_service_infra::DashMapVarietyCache;
use inventory_service_infra::Timeouts;

use crate::handlers::{
    admin::create_admin_routes, fruit::create_fruit_routes, lot::create_lot_routes,
    sale::create_sale_routes, shipment::create_shipment_routes,
};
use crate::state::AppState;

/// Build the complete axum app: every repository and service wired
/// against one shared connection pool, then nested under `/v1`.
pub fn create_router(pool: PgPool, config: &Config) -> Router {
    let sequence = Arc::new(PgSequenceAllocator::new());
    let variety_cache = Arc::new(DashMapVarietyCache::new());
    let timeouts = Timeouts::from_secs(
        config.read_timeout_secs,
        config.item_timeout_secs,
        config.finalize_timeout_secs,
    );

    let destination_repo = Arc::new(PgDestinationRepository::new(pool.clone()));
    let fruit_repo = Arc::new(PgFruitRepository::new(pool.clone()));
    let lot_repo = Arc::new(PgLotRepository::new(pool.clone()));
    let sale_repo = Arc::new(PgSaleRepository::new(pool.clone()));
    let shipment_repo = Arc::new(PgShipmentRepository::new(pool.clone()));
    let shipment_item_repo = Arc::new(PgShipmentItemRepository::new(pool.clone()));
    let tree_repo = Arc::new(PgTreeRepository::new(pool.clone()));
    let variety_repo = Arc::new(PgVarietyRepository::new(pool.clone()));

    let fruit_service = Arc::new(PgFruitService::new(
        pool.clone(),
        fruit_repo.clone(),
        variety_repo.clone(),
        tree_repo.clone(),
        sequence.clone(),
        variety_cache.clone(),
        config.default_tree_id.clone(),
        timeouts,
    ));

    let lot_service = Arc::new(PgLotService::new(
        pool.clone(),
        lot_repo.clone(),
        fruit_repo.clone(),
        variety_repo.clone(),
        tree_repo.clone(),
        sequence.clone(),
        timeouts,
    ));

    let shipment_service = Arc::new(PgShipmentService::new(
        pool.clone(),
        shipment_repo.clone(),
        shipment_item_repo.clone(),
        lot_repo.clone(),
        destination_repo.clone(),
        sequence.clone(),
        timeouts,
    ));

    let sale_service = Arc::new(PgSaleService::new(
        pool.clone(),
        sale_repo.clone(),
        shipment_repo.clone(),
        shipment_item_repo.clone(),
        timeouts,
    ));

    let state = AppState {
        fruit_service,
        lot_service,
        shipment_service,
        sale_service,
        variety_cache,
    };

    Router::new()
        .nest("/v1/buah-raw", create_fruit_routes())
        .nest("/v1/lots", create_lot_routes())
        .nest("/v1/shipments", create_shipment_routes())
        .nest("/v1/sales", create_sale_routes())
        .nest("/v1/internal", create_admin_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
