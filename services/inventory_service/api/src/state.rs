//! Application state for the inventory transaction engine.
//!
//! This module contains the shared application state used across all
//! handlers.

use std::sync::Arc;

use inventory_service_core::services::{FruitService, LotService, SaleService, ShipmentService, VarietyCache};

/// Application state for the inventory transaction engine.
#[derive(Clone)]
pub struct AppState {
    pub fruit_service: Arc<dyn FruitService>,
    pub lot_service: Arc<dyn LotService>,
    pub shipment_service: Arc<dyn ShipmentService>,
    pub sale_service: Arc<dyn SaleService>,
    pub variety_cache: Arc<dyn VarietyCache>,
}
