use async_trait::async_trait;
use shared_error::AppError;

use crate::models::Destination;

/// Destinations are external master data (§3); `Scope::Central` is the
/// only scope allowed to mutate them (§4.2), but mutation itself is a
/// thin passthrough the core exposes only so C5 can resolve a
/// destination at shipment-create time.
#[async_trait]
pub trait DestinationRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Destination>, AppError>;
}
