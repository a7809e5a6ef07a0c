//! PostgreSQL repository and service implementations for the durian
//! inventory transaction engine.

pub mod repositories;
pub mod sequence;
pub mod services;
pub mod timeout;
pub mod variety_cache;

pub use repositories::{
    PgDestinationRepository, PgFruitRepository, PgLotRepository, PgSaleRepository,
    PgShipmentItemRepository, PgShipmentRepository, PgTreeRepository, PgVarietyRepository,
};
pub use sequence::PgSequenceAllocator;
pub use services::{PgFruitService, PgLotService, PgSaleService, PgShipmentService};
pub use timeout::Timeouts;
pub use variety_cache::DashMapVarietyCache;
