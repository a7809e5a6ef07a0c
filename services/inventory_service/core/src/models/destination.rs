use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a destination is another branch of the same company (reached
/// via the Receive path) or a downstream buyer (closed via the Sale
/// path).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum DestinationType {
    Internal,
    External,
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DestinationType::Internal => "internal",
            DestinationType::External => "external",
        };
        f.write_str(s)
    }
}

impl FromStr for DestinationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(DestinationType::Internal),
            "external" => Ok(DestinationType::External),
            _ => Err(format!("unknown destination type: {s}")),
        }
    }
}

/// Master data describing where a shipment can be sent. Mutable only by
/// `Scope::Central` (§4.2); read widely by C5.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub tipe: DestinationType,
    pub address: Option<String>,
    pub contact: Option<String>,
    /// For internal destinations, the branch `location_id` that owns
    /// stock received here; used by `Scope::can_receive_at`.
    pub location_id: Option<String>,
}
