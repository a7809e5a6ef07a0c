//! PostgreSQL implementation of the sale engine's storage (C6).
//!
//! `Sale.harga_total` is a [`shared_types::Money`] wrapper around
//! `rust_decimal::Decimal`; since `Money` carries no `sqlx::Type` impl of
//! its own, rows are mapped by hand instead of via `query_as!` so the
//! unwrap happens in exactly one place per query.

use async_trait::async_trait;
use sqlx::PgConnection;
use sqlx::PgPool;

use inventory_service_core::dto::SaleListFilter;
use inventory_service_core::models::Sale;
use inventory_service_core::repositories::SaleRepository;
use inventory_service_core::scope::Scope;
use shared_error::AppError;
use shared_types::Money;

pub struct PgSaleRepository {
    pool: PgPool,
}

impl PgSaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

struct SaleRow {
    id: String,
    shipment_id: String,
    berat_terjual: rust_decimal::Decimal,
    harga_total: rust_decimal::Decimal,
    tipe_jual: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<SaleRow> for Sale {
    fn from(r: SaleRow) -> Self {
        Sale {
            id: r.id,
            shipment_id: r.shipment_id,
            berat_terjual: r.berat_terjual,
            harga_total: Money(r.harga_total),
            tipe_jual: r.tipe_jual,
            created_at: r.created_at,
            updated_at: r.updated_at,
            deleted_at: r.deleted_at,
        }
    }
}

#[async_trait]
impl SaleRepository for PgSaleRepository {
    async fn insert(&self, conn: &mut PgConnection, sale: &Sale) -> Result<(), AppError> {
        sqlx::query!(
            r#"
            INSERT INTO sales (
                id, shipment_id, berat_terjual, harga_total, tipe_jual,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
            sale.id,
            sale.shipment_id,
            sale.berat_terjual,
            sale.harga_total.0,
            sale.tipe_jual,
            sale.created_at,
            sale.updated_at,
        )
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str, include_deleted: bool) -> Result<Option<Sale>, AppError> {
        let row = sqlx::query_as!(
            SaleRow,
            r#"
            SELECT id, shipment_id, berat_terjual, harga_total, tipe_jual,
                   created_at, updated_at, deleted_at
            FROM sales
            WHERE id = $1 AND ($2 OR deleted_at IS NULL)
            "#,
            id,
            include_deleted,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Sale::from))
    }

    async fn find_active_by_shipment(&self, shipment_id: &str) -> Result<Option<Sale>, AppError> {
        let row = sqlx::query_as!(
            SaleRow,
            r#"
            SELECT id, shipment_id, berat_terjual, harga_total, tipe_jual,
                   created_at, updated_at, deleted_at
            FROM sales
            WHERE shipment_id = $1 AND deleted_at IS NULL
            "#,
            shipment_id,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Sale::from))
    }

    async fn soft_delete(&self, conn: &mut PgConnection, id: &str) -> Result<(), AppError> {
        sqlx::query!(
            "UPDATE sales SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
            id,
        )
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update(&self, sale: &Sale) -> Result<(), AppError> {
        sqlx::query!(
            r#"
            UPDATE sales
            SET harga_total = $2, tipe_jual = $3, updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
            sale.id,
            sale.harga_total.0,
            sale.tipe_jual,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &SaleListFilter,
        scope: &Scope,
        include_deleted: bool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Sale>, i64), AppError> {
        // §4.2/SPEC_FULL supplemented feature 3: soft-deleted sales are
        // only visible to Central and only when explicitly asked for.
        let show_deleted = include_deleted && scope.is_central();
        let is_central = scope.is_central();
        let branch_loc = match scope {
            Scope::Central => None,
            Scope::Branch(loc) => Some(loc.clone()),
        };

        let count = sqlx::query_scalar!(
            r#"
            SELECT COUNT(*) AS "count!"
            FROM sales sa
            JOIN shipments sh ON sh.id = sa.shipment_id
            WHERE ($5 OR sa.deleted_at IS NULL)
              AND ($1 OR sh.destination_id IN (SELECT id FROM destinations WHERE location_id = $2))
              AND ($3::TIMESTAMPTZ IS NULL OR sa.created_at >= $3)
              AND ($4::TIMESTAMPTZ IS NULL OR sa.created_at <= $4)
              AND ($6::TEXT IS NULL OR sa.tipe_jual = $6)
            "#,
            is_central,
            branch_loc,
            filter.start_date,
            filter.end_date,
            show_deleted,
            filter.tipe_jual,
        )
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as!(
            SaleRow,
            r#"
            SELECT sa.id, sa.shipment_id, sa.berat_terjual, sa.harga_total, sa.tipe_jual,
                   sa.created_at, sa.updated_at, sa.deleted_at
            FROM sales sa
            JOIN shipments sh ON sh.id = sa.shipment_id
            WHERE ($5 OR sa.deleted_at IS NULL)
              AND ($1 OR sh.destination_id IN (SELECT id FROM destinations WHERE location_id = $2))
              AND ($3::TIMESTAMPTZ IS NULL OR sa.created_at >= $3)
              AND ($4::TIMESTAMPTZ IS NULL OR sa.created_at <= $4)
              AND ($6::TEXT IS NULL OR sa.tipe_jual = $6)
            ORDER BY sa.created_at DESC
            LIMIT $7 OFFSET $8
            "#,
            is_central,
            branch_loc,
            filter.start_date,
            filter.end_date,
            show_deleted,
            filter.tipe_jual,
            limit,
            offset,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.into_iter().map(Sale::from).collect(), count))
    }
}
