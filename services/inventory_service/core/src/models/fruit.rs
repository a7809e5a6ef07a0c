use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single physical fruit record, from harvest to either lot-assignment
/// or soft-deletion (C3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Fruit {
    pub id: String,
    /// `<CompanyKode><EstateKode><DivisionKode><BlockKode><TreeKode>-F<NNNNN>`
    pub kode: String,
    pub variety_id: String,
    pub tree_id: String,
    pub block_id: Option<String>,
    pub lot_id: Option<String>,
    pub berat: Decimal,
    pub tgl_panen: NaiveDate,
    pub is_sorted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Fruit {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// A fruit with no lot reference must never appear in any lot's
    /// member list (§8 boundary property).
    pub fn is_unsorted(&self) -> bool {
        self.lot_id.is_none()
    }
}
