use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_error::AppError;
use std::fmt;
use std::str::FromStr;

/// Lot lifecycle (§4.4). `Sold` is a reserved terminal the source never
/// writes (§9 open question); it is modeled here so round-trips of
/// historical data don't fail to parse, but no operation in this crate
/// ever produces it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum LotStatus {
    Draft,
    Ready,
    Booked,
    Shipped,
    Sold,
    Empty,
}

impl fmt::Display for LotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LotStatus::Draft => "draft",
            LotStatus::Ready => "ready",
            LotStatus::Booked => "booked",
            LotStatus::Shipped => "shipped",
            LotStatus::Sold => "sold",
            LotStatus::Empty => "empty",
        };
        f.write_str(s)
    }
}

impl FromStr for LotStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(LotStatus::Draft),
            "ready" => Ok(LotStatus::Ready),
            "booked" => Ok(LotStatus::Booked),
            "shipped" => Ok(LotStatus::Shipped),
            "sold" => Ok(LotStatus::Sold),
            "empty" => Ok(LotStatus::Empty),
            _ => Err(format!("unknown lot status: {s}")),
        }
    }
}

/// The events that can move a lot between states. Owned partly by C4
/// (`Finalize`) and partly driven by C5 (booking/shipping/receiving).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LotEvent {
    Finalize,
    AddToShipment,
    RemoveFromShipment,
    ShipmentFinalized,
    Received,
}

impl LotStatus {
    /// Total function `(current_state, proposed_event) -> Result<new_state,
    /// AppError>`, evaluated before any write is issued (§9's "validator
    /// boundary").
    pub fn apply(self, event: LotEvent) -> Result<LotStatus, AppError> {
        use LotEvent::*;
        use LotStatus::*;
        match (self, event) {
            (Draft, Finalize) => Ok(Ready),
            (Ready, AddToShipment) => Ok(Booked),
            (Booked, RemoveFromShipment) => Ok(Ready),
            (Booked, ShipmentFinalized) => Ok(Shipped),
            (Shipped, Received) => Ok(Ready),
            (from, _) => Err(AppError::validation(format!(
                "lot not in required status for this transition (currently {from})"
            ))),
        }
    }
}

/// A graded batch of fruits, the unit of stock and shipment (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Lot {
    pub id: String,
    /// `LOT-<VAR>-<COND>-<DDMMYY>-<NN>`
    pub kode: String,
    pub variety_id: String,
    pub kondisi: String,
    pub qty_awal: i32,
    pub berat_awal: Decimal,
    pub qty_sisa: i32,
    pub berat_sisa: Decimal,
    pub status: LotStatus,
    /// `None` means central; `Some(loc)` means the lot physically sits
    /// at branch `loc`.
    pub current_location_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Lot {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// §8 property 1: remaining never exceeds opening once past DRAFT.
    pub fn remaining_within_opening(&self) -> bool {
        self.qty_sisa <= self.qty_awal && self.berat_sisa <= self.berat_awal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_moves_draft_to_ready() {
        assert_eq!(LotStatus::Draft.apply(LotEvent::Finalize).unwrap(), LotStatus::Ready);
    }

    #[test]
    fn full_happy_path_cycle() {
        let mut status = LotStatus::Draft;
        status = status.apply(LotEvent::Finalize).unwrap();
        assert_eq!(status, LotStatus::Ready);
        status = status.apply(LotEvent::AddToShipment).unwrap();
        assert_eq!(status, LotStatus::Booked);
        status = status.apply(LotEvent::ShipmentFinalized).unwrap();
        assert_eq!(status, LotStatus::Shipped);
        status = status.apply(LotEvent::Received).unwrap();
        assert_eq!(status, LotStatus::Ready);
    }

    #[test]
    fn remove_from_shipment_returns_booked_to_ready() {
        assert_eq!(
            LotStatus::Booked.apply(LotEvent::RemoveFromShipment).unwrap(),
            LotStatus::Ready
        );
    }

    #[test]
    fn second_add_to_shipment_on_already_booked_lot_fails() {
        // §8 S3: the loser of an AddItem race observes BOOKED and fails.
        let result = LotStatus::Booked.apply(LotEvent::AddToShipment);
        assert!(result.is_err());
    }

    #[test]
    fn finalize_is_not_reachable_from_any_state_but_draft() {
        for status in [
            LotStatus::Ready,
            LotStatus::Booked,
            LotStatus::Shipped,
            LotStatus::Empty,
        ] {
            assert!(status.apply(LotEvent::Finalize).is_err());
        }
    }

    #[test]
    fn empty_is_a_terminal_state() {
        for event in [
            LotEvent::Finalize,
            LotEvent::AddToShipment,
            LotEvent::RemoveFromShipment,
            LotEvent::ShipmentFinalized,
            LotEvent::Received,
        ] {
            assert!(LotStatus::Empty.apply(event).is_err());
        }
    }

    #[test]
    fn status_round_trips_through_display_and_from_str() {
        for status in [
            LotStatus::Draft,
            LotStatus::Ready,
            LotStatus::Booked,
            LotStatus::Shipped,
            LotStatus::Sold,
            LotStatus::Empty,
        ] {
            assert_eq!(status.to_string().parse::<LotStatus>().unwrap(), status);
        }
    }

    #[test]
    fn remaining_within_opening_holds_after_finalize() {
        let lot = Lot {
            id: "id".into(),
            kode: "LOT-A-B-010126-01".into(),
            variety_id: "v".into(),
            kondisi: "super".into(),
            qty_awal: 3,
            berat_awal: Decimal::new(120, 1),
            qty_sisa: 3,
            berat_sisa: Decimal::new(120, 1),
            status: LotStatus::Ready,
            current_location_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };
        assert!(lot.remaining_within_opening());
    }

    #[test]
    fn remaining_exceeding_opening_violates_the_invariant() {
        let mut lot = Lot {
            id: "id".into(),
            kode: "LOT-A-B-010126-01".into(),
            variety_id: "v".into(),
            kondisi: "super".into(),
            qty_awal: 3,
            berat_awal: Decimal::new(120, 1),
            qty_sisa: 3,
            berat_sisa: Decimal::new(120, 1),
            status: LotStatus::Ready,
            current_location_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };
        lot.qty_sisa = 4;
        assert!(!lot.remaining_within_opening());
    }
}
