use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::Money;
use validator::Validate;

use crate::models::Sale;

/// `Create({pengirimanId, hargaTotal, tipeJual})` — §4.6.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateSaleRequest {
    #[validate(length(min = 1, message = "pengiriman_id is required"))]
    pub pengiriman_id: String,
    pub harga_total: Decimal,
    #[validate(length(min = 1, message = "tipe_jual is required"))]
    pub tipe_jual: String,
}

/// `Update(id, patch)` — only `harga_total` and `tipe_jual` are patchable.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateSaleRequest {
    pub harga_total: Option<Decimal>,
    pub tipe_jual: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SaleListFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub tipe_jual: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SaleResponse {
    pub id: String,
    pub shipment_id: String,
    pub berat_terjual: Decimal,
    pub harga_total: Decimal,
    pub tipe_jual: String,
}

impl From<Sale> for SaleResponse {
    fn from(s: Sale) -> Self {
        SaleResponse {
            id: s.id,
            shipment_id: s.shipment_id,
            berat_terjual: s.berat_terjual,
            harga_total: s.harga_total.0,
            tipe_jual: s.tipe_jual,
        }
    }
}

pub fn money(d: Decimal) -> Money {
    Money(d)
}
