use async_trait::async_trait;
use shared_error::AppError;
use sqlx::PgConnection;

use crate::dto::ShipmentListFilter;
use crate::models::{Shipment, ShipmentItem};
use crate::scope::Scope;

#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    async fn insert(&self, conn: &mut PgConnection, shipment: &Shipment) -> Result<(), AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Shipment>, AppError>;

    /// `SELECT ... FOR UPDATE` on the shipment row, taken at the start of
    /// every mutating operation in C5 (§4.5, §5).
    async fn lock_by_id(
        &self,
        conn: &mut PgConnection,
        id: &str,
    ) -> Result<Option<Shipment>, AppError>;

    async fn update(&self, conn: &mut PgConnection, shipment: &Shipment) -> Result<(), AppError>;

    async fn list(
        &self,
        filter: &ShipmentListFilter,
        scope: &Scope,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Shipment>, i64), AppError>;
}

#[async_trait]
pub trait ShipmentItemRepository: Send + Sync {
    async fn insert(
        &self,
        conn: &mut PgConnection,
        item: &ShipmentItem,
    ) -> Result<(), AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<ShipmentItem>, AppError>;

    async fn delete(&self, conn: &mut PgConnection, id: &str) -> Result<(), AppError>;

    async fn list_by_shipment(&self, shipment_id: &str) -> Result<Vec<ShipmentItem>, AppError>;

    /// Whether `(shipment_id, lot_id)` already has an item — the
    /// duplicate-booking guard of cross-entity invariant 2 (§3).
    async fn exists_for_lot(
        &self,
        shipment_id: &str,
        lot_id: &str,
    ) -> Result<bool, AppError>;
}
