use async_trait::async_trait;
use shared_error::AppError;

use crate::dto::{CreateSaleRequest, Page, PageRequest, SaleListFilter, SaleResponse, UpdateSaleRequest};
use crate::scope::Scope;

/// Sale engine (C6): the closing transition for shipments bound for
/// `external` destinations, plus voiding.
#[async_trait]
pub trait SaleService: Send + Sync {
    async fn create(&self, req: CreateSaleRequest) -> Result<SaleResponse, AppError>;

    async fn update(&self, id: &str, patch: UpdateSaleRequest) -> Result<SaleResponse, AppError>;

    async fn delete(&self, id: &str, scope: &Scope) -> Result<(), AppError>;

    async fn get_list(
        &self,
        filter: SaleListFilter,
        scope: &Scope,
        page: PageRequest,
    ) -> Result<Page<SaleResponse>, AppError>;

    async fn get_by_id(&self, id: &str) -> Result<SaleResponse, AppError>;
}
