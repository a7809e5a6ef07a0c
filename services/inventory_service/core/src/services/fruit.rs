use async_trait::async_trait;
use shared_error::AppError;

use crate::dto::{
    BulkCreateFruitRequest, CreateFruitRequest, FruitListFilter, FruitResponse,
    Page, PageRequest, UpdateFruitRequest,
};
use crate::scope::Scope;

/// Fruit registry (C3): raw-fruit records from harvest to either
/// lot-assignment or soft-deletion.
#[async_trait]
pub trait FruitService: Send + Sync {
    async fn create(&self, req: CreateFruitRequest) -> Result<FruitResponse, AppError>;

    async fn bulk_create(
        &self,
        req: BulkCreateFruitRequest,
    ) -> Result<Vec<FruitResponse>, AppError>;

    async fn get_list(
        &self,
        filter: FruitListFilter,
        page: PageRequest,
    ) -> Result<Page<FruitResponse>, AppError>;

    async fn get_unsorted(
        &self,
        filter: FruitListFilter,
        page: PageRequest,
    ) -> Result<Page<FruitResponse>, AppError>;

    async fn get_by_id(&self, id: &str) -> Result<FruitResponse, AppError>;

    async fn update(&self, id: &str, patch: UpdateFruitRequest) -> Result<FruitResponse, AppError>;

    async fn delete(&self, id: &str, scope: &Scope) -> Result<(), AppError>;
}
