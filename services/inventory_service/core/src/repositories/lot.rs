use async_trait::async_trait;
use shared_error::AppError;
use sqlx::PgConnection;

use crate::dto::LotListFilter;
use crate::models::Lot;
use crate::scope::Scope;

#[async_trait]
pub trait LotRepository: Send + Sync {
    async fn insert(&self, conn: &mut PgConnection, lot: &Lot) -> Result<(), AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Lot>, AppError>;

    /// `SELECT ... FOR UPDATE` on the lot row. Every transition in
    /// §4.4/§4.5 locks the lot this way before evaluating the state
    /// machine, so concurrent callers serialize (§5).
    async fn lock_by_id(&self, conn: &mut PgConnection, id: &str) -> Result<Option<Lot>, AppError>;

    async fn update(&self, conn: &mut PgConnection, lot: &Lot) -> Result<(), AppError>;

    async fn list(
        &self,
        filter: &LotListFilter,
        scope: &Scope,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Lot>, i64), AppError>;
}
