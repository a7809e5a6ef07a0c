use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::Money;

/// A sale closing a shipment's lifecycle (C6, §3). At most one
/// non-soft-deleted sale may reference a given shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Sale {
    pub id: String,
    pub shipment_id: String,
    pub berat_terjual: Decimal,
    pub harga_total: Money,
    pub tipe_jual: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Sale {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
