//! The centralized sequence allocator (C1), backed by one row per
//! prefix in `sequence_counters`. Mirrors the teacher's
//! `generate_receipt_number()` lock-the-max-row pattern
//! (`infra/src/repositories/receipt.rs`), generalized to every code
//! family and to the two lock disciplines §4.1 requires.

use async_trait::async_trait;
use inventory_service_core::repositories::{LockMode, SequenceAllocator};
use shared_error::AppError;
use sqlx::PgConnection;

/// How many `SKIP LOCKED` attempts to make before falling back to a
/// blocking acquire. Bounded so a contended shipment-code prefix still
/// always produces a code (liveness), even though adjacent waiters may
/// not queue in strict FIFO order (§4.1).
const SKIP_LOCKED_RETRY_LIMIT: u32 = 5;

pub struct PgSequenceAllocator;

impl PgSequenceAllocator {
    pub fn new() -> Self {
        Self
    }

    async fn next_blocking(
        &self,
        conn: &mut PgConnection,
        prefix: &str,
    ) -> Result<i64, AppError> {
        let row = sqlx::query!(
            r#"
            INSERT INTO sequence_counters (prefix, last_value)
            VALUES ($1, 1)
            ON CONFLICT (prefix) DO UPDATE SET last_value = sequence_counters.last_value + 1
            RETURNING last_value
            "#,
            prefix,
        )
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, prefix, "sequence allocation failed");
            AppError::from(e)
        })?;

        tracing::debug!(prefix, value = row.last_value, "sequence allocated (blocking)");
        Ok(row.last_value)
    }

    async fn next_skip_locked(
        &self,
        conn: &mut PgConnection,
        prefix: &str,
    ) -> Result<i64, AppError> {
        sqlx::query!(
            "INSERT INTO sequence_counters (prefix, last_value) VALUES ($1, 0) ON CONFLICT (prefix) DO NOTHING",
            prefix,
        )
        .execute(&mut *conn)
        .await
        .map_err(AppError::from)?;

        for _ in 0..SKIP_LOCKED_RETRY_LIMIT {
            let row = sqlx::query!(
                "SELECT last_value FROM sequence_counters WHERE prefix = $1 FOR UPDATE SKIP LOCKED",
                prefix,
            )
            .fetch_optional(&mut *conn)
            .await
            .map_err(AppError::from)?;

            if let Some(row) = row {
                let next_value = row.last_value + 1;
                sqlx::query!(
                    "UPDATE sequence_counters SET last_value = $2 WHERE prefix = $1",
                    prefix,
                    next_value,
                )
                .execute(&mut *conn)
                .await
                .map_err(AppError::from)?;

                tracing::debug!(prefix, value = next_value, "sequence allocated (skip-locked)");
                return Ok(next_value);
            }
        }

        tracing::debug!(prefix, "skip-locked retries exhausted, falling back to blocking acquire");
        self.next_blocking(conn, prefix).await
    }
}

impl Default for PgSequenceAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SequenceAllocator for PgSequenceAllocator {
    async fn next(
        &self,
        conn: &mut PgConnection,
        prefix: &str,
        lock_mode: LockMode,
    ) -> Result<i64, AppError> {
        match lock_mode {
            LockMode::Blocking => self.next_blocking(conn, prefix).await,
            LockMode::SkipLocked => self.next_skip_locked(conn, prefix).await,
        }
    }
}
