mod fruit;
mod lot;
mod sale;
mod shipment;

pub use fruit::*;
pub use lot::*;
pub use sale::*;
pub use shipment::*;

/// Pagination parameters shared by every list endpoint.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        ((self.page.max(1) - 1) * self.limit) as i64
    }

    pub fn limit(&self) -> i64 {
        self.limit.max(1) as i64
    }
}

/// A page of results with the total row count, so callers can compute
/// page counts without a second query.
#[derive(Debug, Clone, serde::Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}
