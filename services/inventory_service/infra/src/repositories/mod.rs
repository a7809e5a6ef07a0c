//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! `inventory_service_core::repositories`.

pub mod destination;
pub mod fruit;
pub mod lot;
pub mod master_data;
pub mod sale;
pub mod shipment;

// Re-export for convenience.
pub use destination::PgDestinationRepository;
pub use fruit::PgFruitRepository;
pub use lot::PgLotRepository;
pub use master_data::{PgTreeRepository, PgVarietyRepository};
pub use sale::PgSaleRepository;
pub use shipment::{PgShipmentItemRepository, PgShipmentRepository};
