mod fruit;
mod lot;
mod sale;
mod shipment;
mod variety_cache;

pub use fruit::FruitService;
pub use lot::LotService;
pub use sale::SaleService;
pub use shipment::ShipmentService;
pub use variety_cache::{NoopVarietyCache, VarietyCache};
