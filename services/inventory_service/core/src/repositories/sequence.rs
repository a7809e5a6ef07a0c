use async_trait::async_trait;
use shared_error::AppError;
use sqlx::PgConnection;

/// Locking discipline for a sequence family (§4.1). Blocking is required
/// for fruit and lot codes; shipment codes may use the skip-locked path
/// since duplicate-free liveness matters more than strict FIFO ordering
/// there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Blocking,
    SkipLocked,
}

/// The single centralized allocator for every human-readable code family
/// (§9: "do not scatter format strings and lock modes through the
/// codebase"). `next` MUST be called inside the caller's open
/// transaction so the row lock it takes is released only at
/// commit/rollback.
#[async_trait]
pub trait SequenceAllocator: Send + Sync {
    /// Reserve the next integer in the monotonic sequence for `prefix`,
    /// under the given lock discipline. Returns the freshly-incremented
    /// value (1-based).
    async fn next(
        &self,
        conn: &mut PgConnection,
        prefix: &str,
        lock_mode: LockMode,
    ) -> Result<i64, AppError>;
}
