use async_trait::async_trait;
use shared_error::AppError;

use crate::dto::{
    AddShipmentItemRequest, CreateShipmentRequest, Page, PageRequest, ReceiveShipmentRequest,
    ShipmentListFilter, ShipmentResponse, UpdateShipmentStatusRequest,
};
use crate::scope::Scope;

/// Shipment engine (C5): the lifecycle DRAFT -> SENDING -> RECEIVED ->
/// COMPLETED, and the only component that moves a lot between
/// locations.
#[async_trait]
pub trait ShipmentService: Send + Sync {
    async fn create(
        &self,
        creator_user_id: &str,
        req: CreateShipmentRequest,
    ) -> Result<ShipmentResponse, AppError>;

    async fn add_item(
        &self,
        scope: &Scope,
        shipment_id: &str,
        req: AddShipmentItemRequest,
    ) -> Result<ShipmentResponse, AppError>;

    async fn remove_item(
        &self,
        scope: &Scope,
        shipment_id: &str,
        detail_id: &str,
    ) -> Result<ShipmentResponse, AppError>;

    async fn finalize(&self, scope: &Scope, shipment_id: &str) -> Result<ShipmentResponse, AppError>;

    /// The generic transition endpoint (§4.5). Only `RECEIVED ->
    /// COMPLETED` is reachable through it; `Finalize`/`Receive` own the
    /// other two.
    async fn update_status(
        &self,
        shipment_id: &str,
        req: UpdateShipmentStatusRequest,
        user_id: &str,
    ) -> Result<ShipmentResponse, AppError>;

    async fn receive(
        &self,
        scope: &Scope,
        shipment_id: &str,
        req: ReceiveShipmentRequest,
    ) -> Result<ShipmentResponse, AppError>;

    async fn get_list(
        &self,
        filter: ShipmentListFilter,
        scope: &Scope,
        page: PageRequest,
    ) -> Result<Page<ShipmentResponse>, AppError>;

    async fn get_by_id(&self, id: &str, scope: &Scope) -> Result<ShipmentResponse, AppError>;
}
