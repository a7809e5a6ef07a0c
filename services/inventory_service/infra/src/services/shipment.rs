//! Shipment engine service (C5) — the only component that moves a lot
//! between locations, and the gate that closes into either `Receive`
//! (internal) or the sale engine (external).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use inventory_service_core::dto::{
    AddShipmentItemRequest, CreateShipmentRequest, Page, PageRequest, ReceiveShipmentRequest,
    ShipmentListFilter, ShipmentResponse, UpdateShipmentStatusRequest,
};
use inventory_service_core::ids::new_surrogate_id;
use inventory_service_core::models::{
    DestinationType, LotEvent, LotStatus, Shipment, ShipmentEvent, ShipmentItem, ShipmentStatus,
};
use inventory_service_core::repositories::{
    DestinationRepository, LockMode, LotRepository, SequenceAllocator, ShipmentItemRepository,
    ShipmentRepository,
};
use inventory_service_core::scope::Scope;
use inventory_service_core::services::ShipmentService;
use shared_error::AppError;

use crate::timeout::{bounded, Timeouts};

/// Tolerance multiplier applied to a captured weight when validating
/// `berat_diterima` on receive (§4.5, §8 boundary property): up to 10%
/// over the captured weight is accepted.
fn receive_tolerance_ceiling(captured: Decimal) -> Decimal {
    captured * Decimal::new(110, 2)
}

pub struct PgShipmentService {
    pool: PgPool,
    shipment_repo: Arc<dyn ShipmentRepository>,
    shipment_item_repo: Arc<dyn ShipmentItemRepository>,
    lot_repo: Arc<dyn LotRepository>,
    destination_repo: Arc<dyn DestinationRepository>,
    sequence: Arc<dyn SequenceAllocator>,
    timeouts: Timeouts,
}

impl PgShipmentService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        shipment_repo: Arc<dyn ShipmentRepository>,
        shipment_item_repo: Arc<dyn ShipmentItemRepository>,
        lot_repo: Arc<dyn LotRepository>,
        destination_repo: Arc<dyn DestinationRepository>,
        sequence: Arc<dyn SequenceAllocator>,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            pool,
            shipment_repo,
            shipment_item_repo,
            lot_repo,
            destination_repo,
            sequence,
            timeouts,
        }
    }

    async fn require_shipment(&self, id: &str) -> Result<Shipment, AppError> {
        self.shipment_repo
            .find_by_id(id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("shipment {id} not found")))
    }

    async fn response_for(&self, shipment: Shipment) -> Result<ShipmentResponse, AppError> {
        let items = self.shipment_item_repo.list_by_shipment(&shipment.id).await?;
        Ok(ShipmentResponse::from_parts(shipment, items))
    }
}

#[async_trait]
impl ShipmentService for PgShipmentService {
    async fn create(
        &self,
        creator_user_id: &str,
        req: CreateShipmentRequest,
    ) -> Result<ShipmentResponse, AppError> {
        bounded(self.timeouts.read, self.create_inner(creator_user_id, req)).await
    }

    async fn add_item(
        &self,
        scope: &Scope,
        shipment_id: &str,
        req: AddShipmentItemRequest,
    ) -> Result<ShipmentResponse, AppError> {
        bounded(self.timeouts.item, self.add_item_inner(scope, shipment_id, req)).await
    }

    async fn remove_item(
        &self,
        scope: &Scope,
        shipment_id: &str,
        detail_id: &str,
    ) -> Result<ShipmentResponse, AppError> {
        bounded(
            self.timeouts.item,
            self.remove_item_inner(scope, shipment_id, detail_id),
        )
        .await
    }

    async fn finalize(&self, scope: &Scope, shipment_id: &str) -> Result<ShipmentResponse, AppError> {
        bounded(self.timeouts.finalize, self.finalize_inner(scope, shipment_id)).await
    }

    async fn update_status(
        &self,
        shipment_id: &str,
        req: UpdateShipmentStatusRequest,
        user_id: &str,
    ) -> Result<ShipmentResponse, AppError> {
        bounded(
            self.timeouts.read,
            self.update_status_inner(shipment_id, req, user_id),
        )
        .await
    }

    async fn receive(
        &self,
        scope: &Scope,
        shipment_id: &str,
        req: ReceiveShipmentRequest,
    ) -> Result<ShipmentResponse, AppError> {
        bounded(self.timeouts.finalize, self.receive_inner(scope, shipment_id, req)).await
    }

    async fn get_list(
        &self,
        filter: ShipmentListFilter,
        scope: &Scope,
        page: PageRequest,
    ) -> Result<Page<ShipmentResponse>, AppError> {
        bounded(self.timeouts.read, self.get_list_inner(filter, scope, page)).await
    }

    async fn get_by_id(&self, id: &str, scope: &Scope) -> Result<ShipmentResponse, AppError> {
        bounded(self.timeouts.read, self.get_by_id_inner(id, scope)).await
    }
}

impl PgShipmentService {
    async fn create_inner(
        &self,
        creator_user_id: &str,
        req: CreateShipmentRequest,
    ) -> Result<ShipmentResponse, AppError> {
        let destination = self
            .destination_repo
            .find_by_id(&req.tujuan_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("destination {} does not exist", req.tujuan_id)))?;

        let now = Utc::now();
        let tgl_kirim = req.tgl_kirim.unwrap_or(now);
        let date_prefix = format!("SHP-{}", tgl_kirim.format("%y%m%d"));

        let mut tx = self.pool.begin().await.map_err(AppError::from)?;
        let seq = self
            .sequence
            .next(&mut tx, &date_prefix, LockMode::SkipLocked)
            .await?;
        let kode = format!("{date_prefix}-{seq:03}");

        let shipment = Shipment {
            id: new_surrogate_id(),
            kode,
            destination_id: destination.id.clone(),
            destination_name: destination.name.clone(),
            destination_tipe: destination.tipe,
            tgl_kirim,
            received_at: None,
            status: ShipmentStatus::Draft,
            created_by: creator_user_id.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.shipment_repo.insert(&mut tx, &shipment).await?;
        tx.commit().await.map_err(AppError::from)?;

        tracing::info!(shipment_id = %shipment.id, kode = %shipment.kode, "shipment created");
        Ok(ShipmentResponse::from_parts(shipment, Vec::new()))
    }

    async fn add_item_inner(
        &self,
        scope: &Scope,
        shipment_id: &str,
        req: AddShipmentItemRequest,
    ) -> Result<ShipmentResponse, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        let shipment = self
            .shipment_repo
            .lock_by_id(&mut tx, shipment_id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("shipment {shipment_id} not found")))?;

        if shipment.status != ShipmentStatus::Draft {
            return Err(AppError::validation(format!(
                "shipment must be DRAFT to add items (currently {})",
                shipment.status
            )));
        }

        let mut lot = self
            .lot_repo
            .lock_by_id(&mut tx, &req.lot_id)
            .await?
            .filter(|l| !l.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("lot {} not found", req.lot_id)))?;

        if !scope.can_add_lot_at(lot.current_location_id.as_deref()) {
            return Err(AppError::forbidden("lot is not at the caller's scope"));
        }

        if lot.status != LotStatus::Ready {
            return Err(AppError::validation(format!(
                "lot not in READY status (currently {})",
                lot.status
            )));
        }
        if lot.qty_sisa <= 0 {
            return Err(AppError::validation("lot has no remaining quantity"));
        }

        if self
            .shipment_item_repo
            .exists_for_lot(shipment_id, &lot.id)
            .await?
        {
            return Err(AppError::validation("lot is already booked on this shipment"));
        }

        let now = Utc::now();
        let item = ShipmentItem {
            id: new_surrogate_id(),
            shipment_id: shipment_id.to_string(),
            lot_id: lot.id.clone(),
            qty: lot.qty_sisa,
            berat: lot.berat_sisa,
            created_at: now,
        };
        self.shipment_item_repo.insert(&mut tx, &item).await?;

        lot.status = lot.status.apply(LotEvent::AddToShipment)?;
        lot.qty_sisa = 0;
        lot.berat_sisa = Decimal::ZERO;
        self.lot_repo.update(&mut tx, &lot).await?;

        tx.commit().await.map_err(AppError::from)?;

        tracing::info!(shipment_id, lot_id = %item.lot_id, "shipment item added");
        self.response_for(shipment).await
    }

    async fn remove_item_inner(
        &self,
        _scope: &Scope,
        shipment_id: &str,
        detail_id: &str,
    ) -> Result<ShipmentResponse, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        let shipment = self
            .shipment_repo
            .lock_by_id(&mut tx, shipment_id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("shipment {shipment_id} not found")))?;

        if shipment.status != ShipmentStatus::Draft {
            return Err(AppError::validation(format!(
                "shipment must be DRAFT to remove items (currently {})",
                shipment.status
            )));
        }

        let item = self
            .shipment_item_repo
            .find_by_id(detail_id)
            .await?
            .filter(|i| i.shipment_id == shipment_id)
            .ok_or_else(|| AppError::not_found(format!("shipment item {detail_id} not found")))?;

        let mut lot = self
            .lot_repo
            .lock_by_id(&mut tx, &item.lot_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("lot {} not found", item.lot_id)))?;

        if lot.status != LotStatus::Booked {
            return Err(AppError::validation(format!(
                "lot not in BOOKED status (currently {})",
                lot.status
            )));
        }

        lot.status = lot.status.apply(LotEvent::RemoveFromShipment)?;
        lot.qty_sisa = item.qty;
        lot.berat_sisa = item.berat;
        self.lot_repo.update(&mut tx, &lot).await?;

        self.shipment_item_repo.delete(&mut tx, &item.id).await?;
        tx.commit().await.map_err(AppError::from)?;

        tracing::info!(shipment_id, lot_id = %item.lot_id, "shipment item removed");
        self.response_for(shipment).await
    }

    async fn finalize_inner(
        &self,
        _scope: &Scope,
        shipment_id: &str,
    ) -> Result<ShipmentResponse, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        let mut shipment = self
            .shipment_repo
            .lock_by_id(&mut tx, shipment_id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("shipment {shipment_id} not found")))?;

        if shipment.status != ShipmentStatus::Draft {
            return Err(AppError::validation(format!(
                "shipment must be DRAFT to finalize (currently {})",
                shipment.status
            )));
        }

        let items = self.shipment_item_repo.list_by_shipment(shipment_id).await?;
        if items.is_empty() {
            return Err(AppError::validation(
                "shipment must have at least one item to finalize",
            ));
        }

        for item in &items {
            let mut lot = self
                .lot_repo
                .lock_by_id(&mut tx, &item.lot_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("lot {} not found", item.lot_id)))?;

            if lot.status != LotStatus::Booked {
                return Err(AppError::validation(format!(
                    "lot {} not in BOOKED status (currently {})",
                    lot.id, lot.status
                )));
            }

            lot.status = lot.status.apply(LotEvent::ShipmentFinalized)?;
            self.lot_repo.update(&mut tx, &lot).await?;
        }

        shipment.status = shipment.status.apply(ShipmentEvent::Finalize)?;
        self.shipment_repo.update(&mut tx, &shipment).await?;
        tx.commit().await.map_err(AppError::from)?;

        tracing::info!(shipment_id, "shipment finalized");
        self.response_for(shipment).await
    }

    /// Only the `RECEIVED -> COMPLETED` transition is reachable through
    /// this generic endpoint (§4.5); `Finalize`/`Receive` own the other
    /// two and are not reachable here.
    async fn update_status_inner(
        &self,
        shipment_id: &str,
        req: UpdateShipmentStatusRequest,
        _user_id: &str,
    ) -> Result<ShipmentResponse, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        let mut shipment = self
            .shipment_repo
            .lock_by_id(&mut tx, shipment_id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("shipment {shipment_id} not found")))?;

        if shipment.status != ShipmentStatus::Received || req.to_status != ShipmentStatus::Completed
        {
            return Err(AppError::validation(
                "only the RECEIVED -> COMPLETED transition is allowed via this endpoint",
            ));
        }

        shipment.status = ShipmentStatus::Completed;
        self.shipment_repo.update(&mut tx, &shipment).await?;
        tx.commit().await.map_err(AppError::from)?;

        tracing::info!(shipment_id, notes = ?req.notes, "shipment status updated");
        self.response_for(shipment).await
    }

    async fn receive_inner(
        &self,
        scope: &Scope,
        shipment_id: &str,
        req: ReceiveShipmentRequest,
    ) -> Result<ShipmentResponse, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        let mut shipment = self
            .shipment_repo
            .lock_by_id(&mut tx, shipment_id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("shipment {shipment_id} not found")))?;

        if shipment.status != ShipmentStatus::Sending {
            return Err(AppError::validation(format!(
                "shipment must be SENDING to receive (currently {})",
                shipment.status
            )));
        }

        let destination = self
            .destination_repo
            .find_by_id(&shipment.destination_id)
            .await?
            .ok_or_else(|| AppError::internal("shipment destination vanished"))?;

        if destination.tipe != DestinationType::Internal {
            return Err(AppError::validation(
                "receive of a shipment to an external destination is rejected",
            ));
        }

        if !scope.can_receive_at(destination.location_id.as_deref().unwrap_or_default()) {
            return Err(AppError::forbidden("receive is only allowed at the destination branch"));
        }

        if req.received_date > Utc::now() {
            return Err(AppError::validation("received_date must not be in the future"));
        }

        let items = self.shipment_item_repo.list_by_shipment(shipment_id).await?;
        if items.len() != req.details.len() {
            return Err(AppError::validation(
                "every shipment item must appear exactly once in receive details",
            ));
        }

        for item in &items {
            let detail = req
                .details
                .iter()
                .find(|d| d.lot_id == item.lot_id)
                .ok_or_else(|| {
                    AppError::validation(format!("item for lot {} missing from receive details", item.lot_id))
                })?;

            if detail.berat_diterima < Decimal::ZERO
                || detail.berat_diterima > receive_tolerance_ceiling(item.berat)
            {
                return Err(AppError::validation(format!(
                    "berat_diterima for lot {} exceeds the 10% tolerance over captured weight",
                    item.lot_id
                )));
            }

            let qty_diterima = detail.qty_diterima.unwrap_or(item.qty);
            if !(0..=item.qty).contains(&qty_diterima) {
                return Err(AppError::validation(format!(
                    "qty_diterima for lot {} must lie in [0, {}]",
                    item.lot_id, item.qty
                )));
            }

            let mut lot = self
                .lot_repo
                .lock_by_id(&mut tx, &item.lot_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("lot {} not found", item.lot_id)))?;

            lot.current_location_id = destination.location_id.clone();
            lot.berat_sisa = detail.berat_diterima;
            lot.qty_sisa = qty_diterima;
            lot.status = lot.status.apply(LotEvent::Received)?;
            // Table row SHIPPED -> EMPTY is an automatic transition when
            // nothing remains, layered on top of the plain Received event.
            if lot.qty_sisa == 0 && lot.berat_sisa.is_zero() {
                lot.status = LotStatus::Empty;
            }
            self.lot_repo.update(&mut tx, &lot).await?;
        }

        shipment.status = ShipmentStatus::Received;
        shipment.received_at = Some(req.received_date);
        self.shipment_repo.update(&mut tx, &shipment).await?;
        tx.commit().await.map_err(AppError::from)?;

        tracing::info!(shipment_id, "shipment received");
        self.response_for(shipment).await
    }

    async fn get_list_inner(
        &self,
        filter: ShipmentListFilter,
        scope: &Scope,
        page: PageRequest,
    ) -> Result<Page<ShipmentResponse>, AppError> {
        let (shipments, total) = self
            .shipment_repo
            .list(&filter, scope, page.offset(), page.limit())
            .await?;

        let mut items = Vec::with_capacity(shipments.len());
        for shipment in shipments {
            items.push(self.response_for(shipment).await?);
        }

        Ok(Page {
            items,
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    async fn get_by_id_inner(&self, id: &str, _scope: &Scope) -> Result<ShipmentResponse, AppError> {
        let shipment = self.require_shipment(id).await?;
        self.response_for(shipment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_ceiling_is_ten_percent_over_captured() {
        let captured = Decimal::new(100, 1); // 10.0
        assert_eq!(receive_tolerance_ceiling(captured), Decimal::new(1100, 2)); // 11.00
    }

    #[test]
    fn exact_ceiling_is_within_bounds() {
        // §8 boundary: received weight exactly 1.10 x captured is accepted.
        let captured = Decimal::new(100, 1);
        let ceiling = receive_tolerance_ceiling(captured);
        let received = Decimal::new(1100, 2);
        assert!(received <= ceiling);
    }

    #[test]
    fn just_over_ceiling_is_rejected() {
        let captured = Decimal::new(100, 1);
        let ceiling = receive_tolerance_ceiling(captured);
        let received = Decimal::new(1101, 2); // 11.01
        assert!(received > ceiling);
    }
}
