mod destination;
mod fruit;
mod lot;
mod master_data;
mod sale;
mod sequence;
mod shipment;

pub use destination::DestinationRepository;
pub use fruit::FruitRepository;
pub use lot::LotRepository;
pub use master_data::{HierarchyPrefix, TreeRepository, Variety, VarietyRepository};
pub use sale::SaleRepository;
pub use sequence::{LockMode, SequenceAllocator};
pub use shipment::{ShipmentItemRepository, ShipmentRepository};
