//! Read-only PostgreSQL access to the geographic hierarchy and durian
//! variety master data (§1: out of scope to mutate from this core; C3/C4
//! only ever resolve references from it).

use async_trait::async_trait;
use sqlx::PgPool;

use inventory_service_core::repositories::{HierarchyPrefix, TreeRepository, Variety, VarietyRepository};
use shared_error::AppError;

pub struct PgVarietyRepository {
    pool: PgPool,
}

impl PgVarietyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VarietyRepository for PgVarietyRepository {
    async fn find_by_id(&self, variety_id: &str) -> Result<Option<Variety>, AppError> {
        let row = sqlx::query!(
            "SELECT id, kode, name FROM varieties WHERE id = $1",
            variety_id,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Variety {
            id: r.id,
            kode: r.kode,
            name: r.name,
        }))
    }

    async fn find_by_ids(&self, variety_ids: &[String]) -> Result<Vec<Variety>, AppError> {
        if variety_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query!(
            "SELECT id, kode, name FROM varieties WHERE id = ANY($1)",
            variety_ids,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Variety {
                id: r.id,
                kode: r.kode,
                name: r.name,
            })
            .collect())
    }
}

/// Resolves the `tree -> block -> division -> estate -> company` chain
/// into the kode prefix C1 folds into a fruit code (§4.1).
pub struct PgTreeRepository {
    pool: PgPool,
}

impl PgTreeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TreeRepository for PgTreeRepository {
    async fn resolve_by_tree_id(&self, tree_id: &str) -> Result<Option<HierarchyPrefix>, AppError> {
        let row = sqlx::query!(
            r#"
            SELECT
                t.id AS "tree_id!",
                t.blok_id AS "block_id!",
                co.kode || es.kode || di.kode || bl.kode || t.kode AS "prefix!"
            FROM trees t
            JOIN blocks bl ON bl.id = t.blok_id
            JOIN divisions di ON di.id = bl.division_id
            JOIN estates es ON es.id = di.estate_id
            JOIN companies co ON co.id = es.company_id
            WHERE t.id = $1
            "#,
            tree_id,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| HierarchyPrefix {
            tree_id: r.tree_id,
            block_id: r.block_id,
            prefix: r.prefix,
        }))
    }

    async fn resolve_by_kode_and_block(
        &self,
        pohon_kode: &str,
        blok_id: &str,
    ) -> Result<Option<HierarchyPrefix>, AppError> {
        let row = sqlx::query!(
            r#"
            SELECT
                t.id AS "tree_id!",
                t.blok_id AS "block_id!",
                co.kode || es.kode || di.kode || bl.kode || t.kode AS "prefix!"
            FROM trees t
            JOIN blocks bl ON bl.id = t.blok_id
            JOIN divisions di ON di.id = bl.division_id
            JOIN estates es ON es.id = di.estate_id
            JOIN companies co ON co.id = es.company_id
            WHERE t.kode = $1 AND t.blok_id = $2
            "#,
            pohon_kode,
            blok_id,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| HierarchyPrefix {
            tree_id: r.tree_id,
            block_id: r.block_id,
            prefix: r.prefix,
        }))
    }
}
