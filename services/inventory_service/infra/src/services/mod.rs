//! Service implementations
//!
//! PostgreSQL-backed implementations of the service traits defined in
//! `inventory_service_core::services`.

pub mod fruit;
pub mod lot;
pub mod sale;
pub mod shipment;

pub use fruit::PgFruitService;
pub use lot::PgLotService;
pub use sale::PgSaleService;
pub use shipment::PgShipmentService;
