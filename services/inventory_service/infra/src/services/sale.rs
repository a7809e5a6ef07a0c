//! Sale engine service (C6) — the closing transition for shipments to
//! `external` destinations, plus voiding.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use inventory_service_core::dto::{
    CreateSaleRequest, Page, PageRequest, SaleListFilter, SaleResponse, UpdateSaleRequest,
};
use inventory_service_core::ids::new_surrogate_id;
use inventory_service_core::models::{Sale, ShipmentEvent, ShipmentStatus};
use inventory_service_core::repositories::{SaleRepository, ShipmentItemRepository, ShipmentRepository};
use inventory_service_core::scope::Scope;
use inventory_service_core::services::SaleService;
use shared_error::AppError;
use shared_types::Money;

use crate::timeout::{bounded, Timeouts};

pub struct PgSaleService {
    pool: PgPool,
    sale_repo: Arc<dyn SaleRepository>,
    shipment_repo: Arc<dyn ShipmentRepository>,
    shipment_item_repo: Arc<dyn ShipmentItemRepository>,
    timeouts: Timeouts,
}

impl PgSaleService {
    pub fn new(
        pool: PgPool,
        sale_repo: Arc<dyn SaleRepository>,
        shipment_repo: Arc<dyn ShipmentRepository>,
        shipment_item_repo: Arc<dyn ShipmentItemRepository>,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            pool,
            sale_repo,
            shipment_repo,
            shipment_item_repo,
            timeouts,
        }
    }
}

#[async_trait]
impl SaleService for PgSaleService {
    async fn create(&self, req: CreateSaleRequest) -> Result<SaleResponse, AppError> {
        bounded(self.timeouts.read, self.create_inner(req)).await
    }

    async fn update(&self, id: &str, patch: UpdateSaleRequest) -> Result<SaleResponse, AppError> {
        bounded(self.timeouts.read, self.update_inner(id, patch)).await
    }

    async fn delete(&self, id: &str, scope: &Scope) -> Result<(), AppError> {
        bounded(self.timeouts.read, self.delete_inner(id, scope)).await
    }

    async fn get_list(
        &self,
        filter: SaleListFilter,
        scope: &Scope,
        page: PageRequest,
    ) -> Result<Page<SaleResponse>, AppError> {
        bounded(self.timeouts.read, self.get_list_inner(filter, scope, page)).await
    }

    async fn get_by_id(&self, id: &str) -> Result<SaleResponse, AppError> {
        bounded(self.timeouts.read, self.get_by_id_inner(id)).await
    }
}

impl PgSaleService {
    async fn create_inner(&self, req: CreateSaleRequest) -> Result<SaleResponse, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        let mut shipment = self
            .shipment_repo
            .lock_by_id(&mut tx, &req.pengiriman_id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("shipment {} not found", req.pengiriman_id)))?;

        if shipment.status != ShipmentStatus::Sending {
            return Err(AppError::validation(format!(
                "shipment must be SENDING to create a sale (currently {})",
                shipment.status
            )));
        }

        if self
            .sale_repo
            .find_active_by_shipment(&shipment.id)
            .await?
            .is_some()
        {
            return Err(AppError::validation("a sale already exists for this shipment"));
        }

        let items = self.shipment_item_repo.list_by_shipment(&shipment.id).await?;
        let berat_terjual = items.iter().map(|i| i.berat).sum();

        let now = Utc::now();
        let sale = Sale {
            id: new_surrogate_id(),
            shipment_id: shipment.id.clone(),
            berat_terjual,
            harga_total: Money(req.harga_total),
            tipe_jual: req.tipe_jual,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.sale_repo.insert(&mut tx, &sale).await?;

        shipment.status = shipment.status.apply(ShipmentEvent::SaleCreated)?;
        self.shipment_repo.update(&mut tx, &shipment).await?;

        tx.commit().await.map_err(AppError::from)?;

        tracing::info!(sale_id = %sale.id, shipment_id = %shipment.id, "sale created");
        Ok(SaleResponse::from(sale))
    }

    async fn update_inner(&self, id: &str, patch: UpdateSaleRequest) -> Result<SaleResponse, AppError> {
        let mut sale = self
            .sale_repo
            .find_by_id(id, false)
            .await?
            .ok_or_else(|| AppError::not_found(format!("sale {id} not found")))?;

        if let Some(harga_total) = patch.harga_total {
            sale.harga_total = Money(harga_total);
        }
        if let Some(tipe_jual) = patch.tipe_jual {
            sale.tipe_jual = tipe_jual;
        }

        self.sale_repo.update(&sale).await?;
        Ok(SaleResponse::from(sale))
    }

    async fn delete_inner(&self, id: &str, scope: &Scope) -> Result<(), AppError> {
        if !scope.is_central() {
            return Err(AppError::forbidden("only central may void a sale"));
        }

        let sale = self
            .sale_repo
            .find_by_id(id, false)
            .await?
            .ok_or_else(|| AppError::not_found(format!("sale {id} not found")))?;

        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        self.sale_repo.soft_delete(&mut tx, &sale.id).await?;

        let mut shipment = self
            .shipment_repo
            .lock_by_id(&mut tx, &sale.shipment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("shipment {} not found", sale.shipment_id)))?;

        shipment.status = shipment.status.apply(ShipmentEvent::SaleVoided)?;
        self.shipment_repo.update(&mut tx, &shipment).await?;

        tx.commit().await.map_err(AppError::from)?;

        tracing::info!(sale_id = %sale.id, shipment_id = %shipment.id, "sale voided");
        Ok(())
    }

    async fn get_list_inner(
        &self,
        filter: SaleListFilter,
        scope: &Scope,
        page: PageRequest,
    ) -> Result<Page<SaleResponse>, AppError> {
        let (sales, total) = self
            .sale_repo
            .list(&filter, scope, false, page.offset(), page.limit())
            .await?;

        Ok(Page {
            items: sales.into_iter().map(SaleResponse::from).collect(),
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    async fn get_by_id_inner(&self, id: &str) -> Result<SaleResponse, AppError> {
        let sale = self
            .sale_repo
            .find_by_id(id, false)
            .await?
            .ok_or_else(|| AppError::not_found(format!("sale {id} not found")))?;

        Ok(SaleResponse::from(sale))
    }
}
