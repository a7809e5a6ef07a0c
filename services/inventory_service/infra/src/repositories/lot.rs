//! PostgreSQL implementation of the lot engine's storage (C4).

use async_trait::async_trait;
use sqlx::PgConnection;
use sqlx::PgPool;

use inventory_service_core::dto::LotListFilter;
use inventory_service_core::models::Lot;
use inventory_service_core::repositories::LotRepository;
use inventory_service_core::scope::Scope;
use shared_error::AppError;

pub struct PgLotRepository {
    pool: PgPool,
}

impl PgLotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LotRepository for PgLotRepository {
    async fn insert(&self, conn: &mut PgConnection, lot: &Lot) -> Result<(), AppError> {
        sqlx::query!(
            r#"
            INSERT INTO lots (
                id, kode, variety_id, kondisi, qty_awal, berat_awal,
                qty_sisa, berat_sisa, status, current_location_id,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
            lot.id,
            lot.kode,
            lot.variety_id,
            lot.kondisi,
            lot.qty_awal,
            lot.berat_awal,
            lot.qty_sisa,
            lot.berat_sisa,
            lot.status,
            lot.current_location_id,
            lot.created_at,
            lot.updated_at,
        )
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Lot>, AppError> {
        let row = sqlx::query_as!(
            Lot,
            r#"
            SELECT id, kode, variety_id, kondisi, qty_awal, berat_awal,
                   qty_sisa, berat_sisa, status AS "status: _",
                   current_location_id, created_at, updated_at, deleted_at
            FROM lots
            WHERE id = $1
            "#,
            id,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Locked at the top of every transition in §4.4/§4.5 so concurrent
    /// callers serialize on the same lot (§5).
    async fn lock_by_id(&self, conn: &mut PgConnection, id: &str) -> Result<Option<Lot>, AppError> {
        let row = sqlx::query_as!(
            Lot,
            r#"
            SELECT id, kode, variety_id, kondisi, qty_awal, berat_awal,
                   qty_sisa, berat_sisa, status AS "status: _",
                   current_location_id, created_at, updated_at, deleted_at
            FROM lots
            WHERE id = $1
            FOR UPDATE
            "#,
            id,
        )
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn update(&self, conn: &mut PgConnection, lot: &Lot) -> Result<(), AppError> {
        sqlx::query!(
            r#"
            UPDATE lots
            SET qty_awal = $2, berat_awal = $3, qty_sisa = $4, berat_sisa = $5,
                status = $6, current_location_id = $7, updated_at = now()
            WHERE id = $1
            "#,
            lot.id,
            lot.qty_awal,
            lot.berat_awal,
            lot.qty_sisa,
            lot.berat_sisa,
            lot.status,
            lot.current_location_id,
        )
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn list(
        &self,
        filter: &LotListFilter,
        scope: &Scope,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Lot>, i64), AppError> {
        let scope_location = match scope {
            Scope::Central => None,
            Scope::Branch(loc) => Some(loc.clone()),
        };
        let is_central = scope.is_central();

        let count = sqlx::query_scalar!(
            r#"
            SELECT COUNT(*) AS "count!"
            FROM lots
            WHERE deleted_at IS NULL
              AND ($1 OR current_location_id = $2)
              AND ($3::TEXT IS NULL OR status = $3)
              AND ($4::TEXT IS NULL OR variety_id = $4)
              AND ($5::TEXT IS NULL OR kondisi = $5)
              AND ($6::DATE IS NULL OR created_at::DATE >= $6)
              AND ($7::DATE IS NULL OR created_at::DATE <= $7)
            "#,
            is_central,
            scope_location,
            filter.status.map(|s| s.to_string()),
            filter.variety_id,
            filter.kondisi,
            filter.created_at_from,
            filter.created_at_to,
        )
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as!(
            Lot,
            r#"
            SELECT id, kode, variety_id, kondisi, qty_awal, berat_awal,
                   qty_sisa, berat_sisa, status AS "status: _",
                   current_location_id, created_at, updated_at, deleted_at
            FROM lots
            WHERE deleted_at IS NULL
              AND ($1 OR current_location_id = $2)
              AND ($3::TEXT IS NULL OR status = $3)
              AND ($4::TEXT IS NULL OR variety_id = $4)
              AND ($5::TEXT IS NULL OR kondisi = $5)
              AND ($6::DATE IS NULL OR created_at::DATE >= $6)
              AND ($7::DATE IS NULL OR created_at::DATE <= $7)
            ORDER BY created_at DESC
            LIMIT $8 OFFSET $9
            "#,
            is_central,
            scope_location,
            filter.status.map(|s| s.to_string()),
            filter.variety_id,
            filter.kondisi,
            filter.created_at_from,
            filter.created_at_to,
            limit,
            offset,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, count))
    }
}
