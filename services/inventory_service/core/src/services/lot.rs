use async_trait::async_trait;
use shared_error::AppError;

use crate::dto::{
    AddLotItemRequest, AddLotItemResponse, CreateLotRequest, FinalizeLotResponse, LotListFilter,
    LotResponse, Page, PageRequest,
};
use crate::scope::Scope;

/// Lot engine (C4): `Create` and `Finalize`, plus the reads. All other
/// transitions are driven by the shipment engine (C5) via
/// `LotTransitions` internal operations on the lot repository, not
/// exposed here.
#[async_trait]
pub trait LotService: Send + Sync {
    async fn create(&self, scope: &Scope, req: CreateLotRequest) -> Result<LotResponse, AppError>;

    async fn add_item(
        &self,
        scope: &Scope,
        lot_id: &str,
        req: AddLotItemRequest,
    ) -> Result<AddLotItemResponse, AppError>;

    async fn remove_item(
        &self,
        scope: &Scope,
        lot_id: &str,
        buah_raw_id: &str,
    ) -> Result<(), AppError>;

    async fn finalize(
        &self,
        scope: &Scope,
        lot_id: &str,
    ) -> Result<FinalizeLotResponse, AppError>;

    async fn get_list(
        &self,
        filter: LotListFilter,
        scope: &Scope,
        page: PageRequest,
    ) -> Result<Page<LotResponse>, AppError>;

    async fn get_detail(&self, id: &str, scope: &Scope) -> Result<LotResponse, AppError>;
}
