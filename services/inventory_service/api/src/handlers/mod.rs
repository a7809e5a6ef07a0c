//! HTTP handlers for the inventory transaction engine, one module per
//! component's route group.

pub mod admin;
pub mod fruit;
pub mod lot;
pub mod sale;
pub mod shipment;
