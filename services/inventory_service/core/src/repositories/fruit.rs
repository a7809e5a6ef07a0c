use async_trait::async_trait;
use shared_error::AppError;
use sqlx::PgConnection;

use crate::dto::FruitListFilter;
use crate::models::Fruit;

#[async_trait]
pub trait FruitRepository: Send + Sync {
    async fn insert(&self, conn: &mut PgConnection, fruit: &Fruit) -> Result<(), AppError>;

    /// Batched insert for `BulkCreate`, chunked at 1000 rows per
    /// statement (§4.3).
    async fn insert_many(&self, conn: &mut PgConnection, fruits: &[Fruit]) -> Result<(), AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Fruit>, AppError>;

    /// Locks the fruit row `(id, lot_id)` for update, as `RemoveItem`
    /// requires before the hard delete (§4.4).
    async fn lock_by_id_and_lot(
        &self,
        conn: &mut PgConnection,
        id: &str,
        lot_id: &str,
    ) -> Result<Option<Fruit>, AppError>;

    async fn hard_delete(&self, conn: &mut PgConnection, id: &str) -> Result<(), AppError>;

    async fn soft_delete(&self, id: &str) -> Result<(), AppError>;

    async fn update(&self, fruit: &Fruit) -> Result<(), AppError>;

    async fn list(
        &self,
        filter: &FruitListFilter,
        unsorted_only: bool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Fruit>, i64), AppError>;

    /// All current (non-deleted) member fruits of a lot, in insertion
    /// order — used by `Finalize` to aggregate opening totals and by
    /// `GetDetail` for traceability display.
    async fn list_by_lot(&self, lot_id: &str) -> Result<Vec<Fruit>, AppError>;
}
