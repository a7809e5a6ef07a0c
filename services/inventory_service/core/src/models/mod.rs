mod destination;
mod fruit;
mod lot;
mod sale;
mod shipment;
mod user;

pub use destination::{Destination, DestinationType};
pub use fruit::Fruit;
pub use lot::{Lot, LotEvent, LotStatus};
pub use sale::Sale;
pub use shipment::{Shipment, ShipmentEvent, ShipmentItem, ShipmentStatus};
pub use user::{AuthContext, UserRole};
