//! PostgreSQL implementation of the shipment engine's storage (C5).

use async_trait::async_trait;
use sqlx::PgConnection;
use sqlx::PgPool;

use inventory_service_core::dto::{ShipmentDirectionFilter, ShipmentListFilter};
use inventory_service_core::models::{Shipment, ShipmentItem};
use inventory_service_core::repositories::{ShipmentItemRepository, ShipmentRepository};
use inventory_service_core::scope::Scope;
use shared_error::AppError;

pub struct PgShipmentRepository {
    pool: PgPool,
}

impl PgShipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShipmentRepository for PgShipmentRepository {
    async fn insert(&self, conn: &mut PgConnection, shipment: &Shipment) -> Result<(), AppError> {
        sqlx::query!(
            r#"
            INSERT INTO shipments (
                id, kode, destination_id, destination_name, destination_tipe,
                tgl_kirim, received_at, status, created_by,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
            shipment.id,
            shipment.kode,
            shipment.destination_id,
            shipment.destination_name,
            shipment.destination_tipe,
            shipment.tgl_kirim,
            shipment.received_at,
            shipment.status,
            shipment.created_by,
            shipment.created_at,
            shipment.updated_at,
        )
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Shipment>, AppError> {
        let row = sqlx::query_as!(
            Shipment,
            r#"
            SELECT id, kode, destination_id, destination_name,
                   destination_tipe AS "destination_tipe: _",
                   tgl_kirim, received_at, status AS "status: _", created_by,
                   created_at, updated_at, deleted_at
            FROM shipments
            WHERE id = $1
            "#,
            id,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Locked at the start of every C5 mutating operation (§4.5, §5).
    async fn lock_by_id(
        &self,
        conn: &mut PgConnection,
        id: &str,
    ) -> Result<Option<Shipment>, AppError> {
        let row = sqlx::query_as!(
            Shipment,
            r#"
            SELECT id, kode, destination_id, destination_name,
                   destination_tipe AS "destination_tipe: _",
                   tgl_kirim, received_at, status AS "status: _", created_by,
                   created_at, updated_at, deleted_at
            FROM shipments
            WHERE id = $1
            FOR UPDATE
            "#,
            id,
        )
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn update(&self, conn: &mut PgConnection, shipment: &Shipment) -> Result<(), AppError> {
        sqlx::query!(
            r#"
            UPDATE shipments
            SET status = $2, received_at = $3, updated_at = now()
            WHERE id = $1
            "#,
            shipment.id,
            shipment.status,
            shipment.received_at,
        )
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn list(
        &self,
        filter: &ShipmentListFilter,
        scope: &Scope,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Shipment>, i64), AppError> {
        // §4.2: Central sees everything; Branch(loc) sees shipments where
        // either the destination or the creator's location matches `loc`.
        // `type=incoming|outgoing` narrows to one side without replacing
        // the scope filter (SPEC_FULL supplemented feature 2).
        let is_central = scope.is_central();
        let branch_loc = match scope {
            Scope::Central => None,
            Scope::Branch(loc) => Some(loc.clone()),
        };
        let match_incoming = !matches!(filter.direction, Some(ShipmentDirectionFilter::Outgoing));
        let match_outgoing = !matches!(filter.direction, Some(ShipmentDirectionFilter::Incoming));

        let status = filter.status.map(|s| s.to_string());

        let count = sqlx::query_scalar!(
            r#"
            SELECT COUNT(*) AS "count!"
            FROM shipments s
            WHERE deleted_at IS NULL
              AND (
                  $1
                  OR ($2 AND s.destination_id IN (SELECT id FROM destinations WHERE location_id = $5))
                  OR ($3 AND s.created_by IN (SELECT id FROM users WHERE location_id = $5))
              )
              AND ($4::TEXT IS NULL OR s.status = $4)
            "#,
            is_central,
            match_incoming,
            match_outgoing,
            status,
            branch_loc,
        )
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as!(
            Shipment,
            r#"
            SELECT s.id, s.kode, s.destination_id, s.destination_name,
                   s.destination_tipe AS "destination_tipe: _",
                   s.tgl_kirim, s.received_at, s.status AS "status: _", s.created_by,
                   s.created_at, s.updated_at, s.deleted_at
            FROM shipments s
            WHERE deleted_at IS NULL
              AND (
                  $1
                  OR ($2 AND s.destination_id IN (SELECT id FROM destinations WHERE location_id = $5))
                  OR ($3 AND s.created_by IN (SELECT id FROM users WHERE location_id = $5))
              )
              AND ($4::TEXT IS NULL OR s.status = $4)
            ORDER BY s.created_at DESC
            LIMIT $6 OFFSET $7
            "#,
            is_central,
            match_incoming,
            match_outgoing,
            status,
            branch_loc,
            limit,
            offset,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, count))
    }
}

pub struct PgShipmentItemRepository {
    pool: PgPool,
}

impl PgShipmentItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShipmentItemRepository for PgShipmentItemRepository {
    async fn insert(&self, conn: &mut PgConnection, item: &ShipmentItem) -> Result<(), AppError> {
        sqlx::query!(
            r#"
            INSERT INTO shipment_items (id, shipment_id, lot_id, qty, berat, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
            item.id,
            item.shipment_id,
            item.lot_id,
            item.qty,
            item.berat,
            item.created_at,
        )
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ShipmentItem>, AppError> {
        let row = sqlx::query_as!(
            ShipmentItem,
            r#"
            SELECT id, shipment_id, lot_id, qty, berat, created_at
            FROM shipment_items
            WHERE id = $1
            "#,
            id,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, conn: &mut PgConnection, id: &str) -> Result<(), AppError> {
        sqlx::query!("DELETE FROM shipment_items WHERE id = $1", id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn list_by_shipment(&self, shipment_id: &str) -> Result<Vec<ShipmentItem>, AppError> {
        let rows = sqlx::query_as!(
            ShipmentItem,
            r#"
            SELECT id, shipment_id, lot_id, qty, berat, created_at
            FROM shipment_items
            WHERE shipment_id = $1
            ORDER BY created_at ASC
            "#,
            shipment_id,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn exists_for_lot(&self, shipment_id: &str, lot_id: &str) -> Result<bool, AppError> {
        let count = sqlx::query_scalar!(
            r#"
            SELECT COUNT(*) AS "count!"
            FROM shipment_items
            WHERE shipment_id = $1 AND lot_id = $2
            "#,
            shipment_id,
            lot_id,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }
}
