use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_error::AppError;
use std::fmt;
use std::str::FromStr;

/// Shipment lifecycle (§4.5). Historical aliases `Sent`/`Otw` parse from
/// storage but are never written (§6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum ShipmentStatus {
    Draft,
    Sending,
    Received,
    Completed,
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShipmentStatus::Draft => "draft",
            ShipmentStatus::Sending => "sending",
            ShipmentStatus::Received => "received",
            ShipmentStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

impl FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ShipmentStatus::Draft),
            "sending" | "sent" | "otw" => Ok(ShipmentStatus::Sending),
            "received" => Ok(ShipmentStatus::Received),
            "completed" => Ok(ShipmentStatus::Completed),
            _ => Err(format!("unknown shipment status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipmentEvent {
    Finalize,
    Receive,
    SaleCreated,
    SaleVoided,
}

impl ShipmentStatus {
    /// Backwards transitions are not permitted except the explicit void
    /// at the sale layer, which is why `SaleVoided` is the only event
    /// that moves status "backwards" here.
    pub fn apply(self, event: ShipmentEvent) -> Result<ShipmentStatus, AppError> {
        use ShipmentEvent::*;
        use ShipmentStatus::*;
        match (self, event) {
            (Draft, Finalize) => Ok(Sending),
            (Sending, Receive) => Ok(Received),
            (Sending, SaleCreated) => Ok(Completed),
            (Completed, SaleVoided) => Ok(Sending),
            (from, _) => Err(AppError::validation(format!(
                "shipment not in required status for this transition (currently {from})"
            ))),
        }
    }
}

/// A line captured at the moment a lot is added to a shipment; frozen
/// from then on (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShipmentItem {
    pub id: String,
    pub shipment_id: String,
    pub lot_id: String,
    pub qty: i32,
    pub berat: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A shipment of one or more lots to a single destination (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Shipment {
    pub id: String,
    /// `SHP-<YYMMDD>-<NNN>`
    pub kode: String,
    pub destination_id: String,
    pub destination_name: String,
    pub destination_tipe: crate::models::DestinationType,
    pub tgl_kirim: DateTime<Utc>,
    pub received_at: Option<DateTime<Utc>>,
    pub status: ShipmentStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Shipment {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_happy_path_cycle() {
        let mut status = ShipmentStatus::Draft;
        status = status.apply(ShipmentEvent::Finalize).unwrap();
        assert_eq!(status, ShipmentStatus::Sending);
        status = status.apply(ShipmentEvent::SaleCreated).unwrap();
        assert_eq!(status, ShipmentStatus::Completed);
    }

    #[test]
    fn internal_happy_path_cycle() {
        let mut status = ShipmentStatus::Draft;
        status = status.apply(ShipmentEvent::Finalize).unwrap();
        status = status.apply(ShipmentEvent::Receive).unwrap();
        assert_eq!(status, ShipmentStatus::Received);
    }

    #[test]
    fn voiding_a_sale_restores_sending_from_completed() {
        assert_eq!(
            ShipmentStatus::Completed.apply(ShipmentEvent::SaleVoided).unwrap(),
            ShipmentStatus::Sending
        );
    }

    #[test]
    fn finalize_is_not_idempotent() {
        // §8: a second Finalize on an already-SENDING shipment fails.
        assert!(ShipmentStatus::Sending.apply(ShipmentEvent::Finalize).is_err());
    }

    #[test]
    fn receive_is_not_idempotent() {
        assert!(ShipmentStatus::Received.apply(ShipmentEvent::Receive).is_err());
    }

    #[test]
    fn sale_cannot_be_created_twice() {
        assert!(ShipmentStatus::Completed.apply(ShipmentEvent::SaleCreated).is_err());
    }

    #[test]
    fn draft_cannot_be_received_directly() {
        assert!(ShipmentStatus::Draft.apply(ShipmentEvent::Receive).is_err());
    }

    #[test]
    fn status_accepts_historical_aliases_on_read_but_never_writes_them() {
        assert_eq!("sent".parse::<ShipmentStatus>().unwrap(), ShipmentStatus::Sending);
        assert_eq!("otw".parse::<ShipmentStatus>().unwrap(), ShipmentStatus::Sending);
        assert_eq!(ShipmentStatus::Sending.to_string(), "sending");
    }
}
