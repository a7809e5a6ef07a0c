use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Fruit;

/// `Create(tglPanen?, varietyId, treeId?)` — §4.3.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateFruitRequest {
    pub tgl_panen: Option<NaiveDate>,
    #[validate(length(min = 1, message = "variety_id is required"))]
    pub variety_id: String,
    /// Empty or absent means "substitute the system default tree".
    pub tree_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BulkCreateFruitItem {
    #[validate(length(min = 1, message = "variety_id is required"))]
    pub variety_id: String,
    pub tree_id: Option<String>,
    #[validate(range(min = 1, message = "jumlah must be at least 1"))]
    pub jumlah: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BulkCreateFruitRequest {
    pub tgl_panen: Option<NaiveDate>,
    #[validate(length(min = 1, message = "items must not be empty"))]
    #[validate(nested)]
    pub items: Vec<BulkCreateFruitItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FruitListFilter {
    pub variety_id: Option<String>,
    pub is_sorted: Option<bool>,
    pub created_at_from: Option<NaiveDate>,
    pub created_at_to: Option<NaiveDate>,
    #[serde(default)]
    pub include: IncludeSet,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IncludeSet {
    pub variety: bool,
    pub block_chain: bool,
    pub tree: bool,
}

impl IncludeSet {
    /// `include=all` turns every eager-load flag on.
    pub fn all() -> Self {
        IncludeSet {
            variety: true,
            block_chain: true,
            tree: true,
        }
    }
}

/// `Update(id, patch)` — a `tree_id` of `Some("")` resets to the system
/// default tree, never clears the reference (§4.3).
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateFruitRequest {
    pub tgl_panen: Option<NaiveDate>,
    pub variety_id: Option<String>,
    pub tree_id: Option<String>,
}

/// Eagerly-loaded variety summary, attached when `include.variety` is set
/// (§4.3).
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VarietySummary {
    pub id: String,
    pub kode: String,
    pub name: String,
}

/// Eagerly-loaded tree/block-chain summary, attached when `include.tree`
/// or `include.block_chain` is set. `hierarchy_prefix` is the same
/// `company-estate-division-block-tree` kode concatenation C1 folds into
/// a fruit code, reused here as the human-readable chain display (§4.3).
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TreeSummary {
    pub tree_id: String,
    pub block_id: String,
    pub hierarchy_prefix: String,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FruitResponse {
    pub id: String,
    pub kode: String,
    pub variety_id: String,
    pub tree_id: String,
    pub block_id: Option<String>,
    pub lot_id: Option<String>,
    pub berat: Decimal,
    pub tgl_panen: NaiveDate,
    pub is_sorted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variety: Option<VarietySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeSummary>,
}

impl From<Fruit> for FruitResponse {
    fn from(f: Fruit) -> Self {
        FruitResponse {
            id: f.id,
            kode: f.kode,
            variety_id: f.variety_id,
            tree_id: f.tree_id,
            block_id: f.block_id,
            lot_id: f.lot_id,
            berat: f.berat,
            tgl_panen: f.tgl_panen,
            is_sorted: f.is_sorted,
            variety: None,
            tree: None,
        }
    }
}
