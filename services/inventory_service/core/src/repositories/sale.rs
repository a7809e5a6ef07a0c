use async_trait::async_trait;
use shared_error::AppError;
use sqlx::PgConnection;

use crate::dto::SaleListFilter;
use crate::models::Sale;
use crate::scope::Scope;

#[async_trait]
pub trait SaleRepository: Send + Sync {
    async fn insert(&self, conn: &mut PgConnection, sale: &Sale) -> Result<(), AppError>;

    async fn find_by_id(&self, id: &str, include_deleted: bool) -> Result<Option<Sale>, AppError>;

    /// The one-sale-per-shipment guard (§4.6, cross-entity invariant 3,
    /// §8 property 3).
    async fn find_active_by_shipment(
        &self,
        shipment_id: &str,
    ) -> Result<Option<Sale>, AppError>;

    async fn soft_delete(&self, conn: &mut PgConnection, id: &str) -> Result<(), AppError>;

    async fn update(&self, sale: &Sale) -> Result<(), AppError>;

    async fn list(
        &self,
        filter: &SaleListFilter,
        scope: &Scope,
        include_deleted: bool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Sale>, i64), AppError>;
}
