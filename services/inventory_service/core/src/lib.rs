//! Domain types, DTOs, repository traits, and service traits for the
//! durian inventory transaction engine. No database or HTTP dependency
//! lives in this crate; the business rules here are meant to be
//! unit-testable on their own (§9's validator boundary).

pub mod dto;
pub mod ids;
pub mod models;
pub mod repositories;
pub mod scope;
pub mod services;

pub use shared_error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
