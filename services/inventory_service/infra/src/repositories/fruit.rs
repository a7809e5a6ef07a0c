//! PostgreSQL implementation of the fruit registry (C3).

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use sqlx::PgPool;

use inventory_service_core::dto::FruitListFilter;
use inventory_service_core::models::Fruit;
use inventory_service_core::repositories::FruitRepository;
use shared_error::AppError;

pub struct PgFruitRepository {
    pool: PgPool,
}

impl PgFruitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FruitRepository for PgFruitRepository {
    async fn insert(&self, conn: &mut PgConnection, fruit: &Fruit) -> Result<(), AppError> {
        sqlx::query!(
            r#"
            INSERT INTO fruits (
                id, kode, variety_id, tree_id, block_id, lot_id, berat,
                tgl_panen, is_sorted, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
            fruit.id,
            fruit.kode,
            fruit.variety_id,
            fruit.tree_id,
            fruit.block_id,
            fruit.lot_id,
            fruit.berat,
            fruit.tgl_panen,
            fruit.is_sorted,
            fruit.created_at,
            fruit.updated_at,
        )
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// One batched statement per chunk of at most 1000 rows, built with
    /// `UNNEST` over per-column arrays (§4.3).
    async fn insert_many(&self, conn: &mut PgConnection, fruits: &[Fruit]) -> Result<(), AppError> {
        const CHUNK_SIZE: usize = 1000;

        for chunk in fruits.chunks(CHUNK_SIZE) {
            let ids: Vec<&str> = chunk.iter().map(|f| f.id.as_str()).collect();
            let kodes: Vec<&str> = chunk.iter().map(|f| f.kode.as_str()).collect();
            let variety_ids: Vec<&str> = chunk.iter().map(|f| f.variety_id.as_str()).collect();
            let tree_ids: Vec<&str> = chunk.iter().map(|f| f.tree_id.as_str()).collect();
            let block_ids: Vec<Option<&str>> =
                chunk.iter().map(|f| f.block_id.as_deref()).collect();
            let berats: Vec<Decimal> = chunk.iter().map(|f| f.berat).collect();
            let tgl_panens: Vec<chrono::NaiveDate> = chunk.iter().map(|f| f.tgl_panen).collect();
            let created_ats: Vec<chrono::DateTime<chrono::Utc>> =
                chunk.iter().map(|f| f.created_at).collect();

            sqlx::query!(
                r#"
                INSERT INTO fruits (
                    id, kode, variety_id, tree_id, block_id, lot_id, berat,
                    tgl_panen, is_sorted, created_at, updated_at
                )
                SELECT
                    id, kode, variety_id, tree_id, block_id, NULL, berat,
                    tgl_panen, false, created_at, created_at
                FROM UNNEST(
                    $1::TEXT[], $2::TEXT[], $3::TEXT[], $4::TEXT[], $5::TEXT[],
                    $6::NUMERIC[], $7::DATE[], $8::TIMESTAMPTZ[]
                ) AS t(id, kode, variety_id, tree_id, block_id, berat, tgl_panen, created_at)
                "#,
                &ids as &[&str],
                &kodes as &[&str],
                &variety_ids as &[&str],
                &tree_ids as &[&str],
                &block_ids as &[Option<&str>],
                &berats,
                &tgl_panens,
                &created_ats,
            )
            .execute(&mut *conn)
            .await?;
        }

        tracing::debug!(count = fruits.len(), "bulk fruit insert completed");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Fruit>, AppError> {
        let row = sqlx::query_as!(
            Fruit,
            r#"
            SELECT id, kode, variety_id, tree_id, block_id, lot_id, berat,
                   tgl_panen, is_sorted, created_at, updated_at, deleted_at
            FROM fruits
            WHERE id = $1
            "#,
            id,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn lock_by_id_and_lot(
        &self,
        conn: &mut PgConnection,
        id: &str,
        lot_id: &str,
    ) -> Result<Option<Fruit>, AppError> {
        let row = sqlx::query_as!(
            Fruit,
            r#"
            SELECT id, kode, variety_id, tree_id, block_id, lot_id, berat,
                   tgl_panen, is_sorted, created_at, updated_at, deleted_at
            FROM fruits
            WHERE id = $1 AND lot_id = $2
            FOR UPDATE
            "#,
            id,
            lot_id,
        )
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn hard_delete(&self, conn: &mut PgConnection, id: &str) -> Result<(), AppError> {
        sqlx::query!("DELETE FROM fruits WHERE id = $1", id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn soft_delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query!(
            "UPDATE fruits SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
            id,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, fruit: &Fruit) -> Result<(), AppError> {
        sqlx::query!(
            r#"
            UPDATE fruits
            SET variety_id = $2, tree_id = $3, tgl_panen = $4, updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
            fruit.id,
            fruit.variety_id,
            fruit.tree_id,
            fruit.tgl_panen,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &FruitListFilter,
        unsorted_only: bool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Fruit>, i64), AppError> {
        let count = sqlx::query_scalar!(
            r#"
            SELECT COUNT(*) AS "count!"
            FROM fruits
            WHERE deleted_at IS NULL
              AND ($1::TEXT IS NULL OR variety_id = $1)
              AND ($2::BOOL IS NULL OR is_sorted = $2)
              AND ($3::BOOL IS NULL OR ($3 AND lot_id IS NULL))
              AND ($4::DATE IS NULL OR tgl_panen >= $4)
              AND ($5::DATE IS NULL OR tgl_panen <= $5)
            "#,
            filter.variety_id,
            filter.is_sorted,
            unsorted_only,
            filter.created_at_from,
            filter.created_at_to,
        )
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as!(
            Fruit,
            r#"
            SELECT id, kode, variety_id, tree_id, block_id, lot_id, berat,
                   tgl_panen, is_sorted, created_at, updated_at, deleted_at
            FROM fruits
            WHERE deleted_at IS NULL
              AND ($1::TEXT IS NULL OR variety_id = $1)
              AND ($2::BOOL IS NULL OR is_sorted = $2)
              AND ($3::BOOL IS NULL OR ($3 AND lot_id IS NULL))
              AND ($4::DATE IS NULL OR tgl_panen >= $4)
              AND ($5::DATE IS NULL OR tgl_panen <= $5)
            ORDER BY created_at DESC
            LIMIT $6 OFFSET $7
            "#,
            filter.variety_id,
            filter.is_sorted,
            unsorted_only,
            filter.created_at_from,
            filter.created_at_to,
            limit,
            offset,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, count))
    }

    async fn list_by_lot(&self, lot_id: &str) -> Result<Vec<Fruit>, AppError> {
        let rows = sqlx::query_as!(
            Fruit,
            r#"
            SELECT id, kode, variety_id, tree_id, block_id, lot_id, berat,
                   tgl_panen, is_sorted, created_at, updated_at, deleted_at
            FROM fruits
            WHERE lot_id = $1 AND deleted_at IS NULL
            ORDER BY created_at ASC
            "#,
            lot_id,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
