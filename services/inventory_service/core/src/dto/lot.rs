use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Lot, LotStatus};

/// `Create(varietyId, kondisiBuah)` — §4.4.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateLotRequest {
    #[validate(length(min = 1, message = "variety_id is required"))]
    pub variety_id: String,
    #[validate(length(min = 1, message = "kondisi is required"))]
    pub kondisi: String,
}

/// `AddItems(lotId, {pohonKode, blokId, berat})` — §4.4.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AddLotItemRequest {
    #[validate(length(min = 1, message = "pohon_kode is required"))]
    pub pohon_kode: String,
    #[validate(length(min = 1, message = "blok_id is required"))]
    pub blok_id: String,
    /// Weight in kilograms; checked for non-negativity in the service
    /// layer (the `validator` range check does not cover `Decimal`).
    pub berat: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RemoveLotItemRequest {
    #[validate(length(min = 1, message = "buah_raw_id is required"))]
    pub buah_raw_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LotListFilter {
    pub status: Option<LotStatus>,
    pub variety_id: Option<String>,
    pub kondisi: Option<String>,
    pub created_at_from: Option<NaiveDate>,
    pub created_at_to: Option<NaiveDate>,
}

/// A member fruit as eagerly loaded by `GetDetail`'s traceability view
/// (§4.4), carrying its resolved hierarchy prefix rather than the
/// individual division/estate/company names separately.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LotMemberFruit {
    pub id: String,
    pub kode: String,
    pub berat: Decimal,
    pub hierarchy_prefix: String,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LotResponse {
    pub id: String,
    pub kode: String,
    pub variety_id: String,
    pub kondisi: String,
    pub qty_awal: i32,
    pub berat_awal: Decimal,
    pub qty_sisa: i32,
    pub berat_sisa: Decimal,
    pub status: LotStatus,
    pub current_location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<LotMemberFruit>>,
}

impl From<Lot> for LotResponse {
    fn from(l: Lot) -> Self {
        LotResponse {
            id: l.id,
            kode: l.kode,
            variety_id: l.variety_id,
            kondisi: l.kondisi,
            qty_awal: l.qty_awal,
            berat_awal: l.berat_awal,
            qty_sisa: l.qty_sisa,
            berat_sisa: l.berat_sisa,
            status: l.status,
            current_location_id: l.current_location_id,
            members: None,
        }
    }
}

impl LotResponse {
    pub fn with_members(mut self, members: Vec<LotMemberFruit>) -> Self {
        self.members = Some(members);
        self
    }
}

/// Response of `Finalize(lotId)`: `(id, qty_total, berat_total, status)`.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FinalizeLotResponse {
    pub id: String,
    pub qty_total: i32,
    pub berat_total: Decimal,
    pub status: LotStatus,
}

/// Response of `AddItems`: the new current member count.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AddLotItemResponse {
    pub lot_id: String,
    pub current_qty: i64,
}
