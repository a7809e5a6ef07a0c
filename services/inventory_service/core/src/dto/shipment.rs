use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{DestinationType, Shipment, ShipmentItem, ShipmentStatus};

/// `Create(tujuanId, tglKirim?, creator)` — §4.5.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateShipmentRequest {
    #[validate(length(min = 1, message = "tujuan_id is required"))]
    pub tujuan_id: String,
    pub tgl_kirim: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AddShipmentItemRequest {
    #[validate(length(min = 1, message = "lot_id is required"))]
    pub lot_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RemoveShipmentItemRequest {
    #[validate(length(min = 1, message = "detail_id is required"))]
    pub detail_id: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentDirectionFilter {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShipmentListFilter {
    pub status: Option<ShipmentStatus>,
    #[serde(rename = "type")]
    pub direction: Option<ShipmentDirectionFilter>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateShipmentStatusRequest {
    pub to_status: ShipmentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReceiveShipmentItemDetail {
    #[validate(length(min = 1, message = "lot_id is required"))]
    pub lot_id: String,
    pub berat_diterima: Decimal,
    pub qty_diterima: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReceiveShipmentRequest {
    pub received_date: DateTime<Utc>,
    #[validate(length(min = 1, message = "details must not be empty"))]
    #[validate(nested)]
    pub details: Vec<ReceiveShipmentItemDetail>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShipmentItemResponse {
    pub id: String,
    pub lot_id: String,
    pub qty: i32,
    pub berat: Decimal,
}

impl From<ShipmentItem> for ShipmentItemResponse {
    fn from(i: ShipmentItem) -> Self {
        ShipmentItemResponse {
            id: i.id,
            lot_id: i.lot_id,
            qty: i.qty,
            berat: i.berat,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShipmentResponse {
    pub id: String,
    pub kode: String,
    pub destination_id: String,
    pub destination_name: String,
    pub destination_tipe: DestinationType,
    pub tgl_kirim: DateTime<Utc>,
    pub received_at: Option<DateTime<Utc>>,
    pub status: ShipmentStatus,
    pub items: Vec<ShipmentItemResponse>,
}

impl ShipmentResponse {
    pub fn from_parts(s: Shipment, items: Vec<ShipmentItem>) -> Self {
        ShipmentResponse {
            id: s.id,
            kode: s.kode,
            destination_id: s.destination_id,
            destination_name: s.destination_name,
            destination_tipe: s.destination_tipe,
            tgl_kirim: s.tgl_kirim,
            received_at: s.received_at,
            status: s.status,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}
