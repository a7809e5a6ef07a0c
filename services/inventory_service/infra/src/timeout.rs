//! The per-operation timeout budgets of §5: every transactional body in
//! `services/*.rs` is wrapped in one of these so a stuck connection or a
//! long lock wait aborts instead of holding a worker indefinitely. The
//! three tiers (`read`, `item`, `finalize`) mirror the three budgets
//! spec §5 names — 10s for reads/simple mutations, 15s for shipment
//! add/remove-item, 30s for finalize/receive.

use std::future::Future;
use std::time::Duration;

use shared_error::AppError;

/// Timeout budgets for the three operation tiers of §5, threaded from
/// `Config` into each `Pg*Service` at construction.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub read: Duration,
    pub item: Duration,
    pub finalize: Duration,
}

impl Timeouts {
    pub fn from_secs(read_secs: u64, item_secs: u64, finalize_secs: u64) -> Self {
        Self {
            read: Duration::from_secs(read_secs),
            item: Duration::from_secs(item_secs),
            finalize: Duration::from_secs(finalize_secs),
        }
    }
}

/// Runs `fut` to completion or returns `AppError::Internal` once
/// `duration` elapses. A context-cancellation-style abort: whatever
/// transaction `fut` was holding is dropped, which rolls it back (§5).
pub async fn bounded<T>(
    duration: Duration,
    fut: impl Future<Output = Result<T, AppError>>,
) -> Result<T, AppError> {
    match tokio::time::timeout(duration, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::internal(format!(
            "operation exceeded its {:.0}s timeout budget",
            duration.as_secs_f64()
        ))),
    }
}
