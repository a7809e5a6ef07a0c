//! Lot engine service (C4) — `Create`, `AddItems`, `RemoveItem`,
//! `Finalize`, and the scoped reads. Every other transition in the lot
//! state machine is driven by the shipment engine (C5).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use inventory_service_core::dto::{
    AddLotItemRequest, AddLotItemResponse, CreateLotRequest, FinalizeLotResponse, LotListFilter,
    LotMemberFruit, LotResponse, Page, PageRequest,
};
use inventory_service_core::ids::new_surrogate_id;
use inventory_service_core::models::{Fruit, Lot, LotEvent, LotStatus};
use inventory_service_core::repositories::{
    FruitRepository, LockMode, LotRepository, SequenceAllocator, TreeRepository, VarietyRepository,
};
use inventory_service_core::scope::Scope;
use inventory_service_core::services::LotService;
use shared_error::AppError;

use crate::timeout::{bounded, Timeouts};

pub struct PgLotService {
    pool: PgPool,
    lot_repo: Arc<dyn LotRepository>,
    fruit_repo: Arc<dyn FruitRepository>,
    variety_repo: Arc<dyn VarietyRepository>,
    tree_repo: Arc<dyn TreeRepository>,
    sequence: Arc<dyn SequenceAllocator>,
    timeouts: Timeouts,
}

impl PgLotService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        lot_repo: Arc<dyn LotRepository>,
        fruit_repo: Arc<dyn FruitRepository>,
        variety_repo: Arc<dyn VarietyRepository>,
        tree_repo: Arc<dyn TreeRepository>,
        sequence: Arc<dyn SequenceAllocator>,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            pool,
            lot_repo,
            fruit_repo,
            variety_repo,
            tree_repo,
            sequence,
            timeouts,
        }
    }

    async fn require_lot(&self, id: &str) -> Result<Lot, AppError> {
        self.lot_repo
            .find_by_id(id)
            .await?
            .filter(|l| !l.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("lot {id} not found")))
    }
}

#[async_trait]
impl LotService for PgLotService {
    async fn create(&self, scope: &Scope, req: CreateLotRequest) -> Result<LotResponse, AppError> {
        bounded(self.timeouts.read, self.create_inner(scope, req)).await
    }

    async fn add_item(
        &self,
        scope: &Scope,
        lot_id: &str,
        req: AddLotItemRequest,
    ) -> Result<AddLotItemResponse, AppError> {
        bounded(self.timeouts.item, self.add_item_inner(scope, lot_id, req)).await
    }

    async fn remove_item(
        &self,
        scope: &Scope,
        lot_id: &str,
        buah_raw_id: &str,
    ) -> Result<(), AppError> {
        bounded(
            self.timeouts.item,
            self.remove_item_inner(scope, lot_id, buah_raw_id),
        )
        .await
    }

    async fn finalize(&self, scope: &Scope, lot_id: &str) -> Result<FinalizeLotResponse, AppError> {
        bounded(self.timeouts.finalize, self.finalize_inner(scope, lot_id)).await
    }

    async fn get_list(
        &self,
        filter: LotListFilter,
        scope: &Scope,
        page: PageRequest,
    ) -> Result<Page<LotResponse>, AppError> {
        bounded(self.timeouts.read, self.get_list_inner(filter, scope, page)).await
    }

    async fn get_detail(&self, id: &str, scope: &Scope) -> Result<LotResponse, AppError> {
        bounded(self.timeouts.read, self.get_detail_inner(id, scope)).await
    }
}

impl PgLotService {
    async fn create_inner(&self, scope: &Scope, req: CreateLotRequest) -> Result<LotResponse, AppError> {
        if !scope.can_manage_lots() {
            return Err(AppError::forbidden("only central may create lots"));
        }

        let variety = self
            .variety_repo
            .find_by_id(&req.variety_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("variety {} does not exist", req.variety_id)))?;

        let date_str = Utc::now().format("%d%m%y").to_string();
        let prefix = format!("LOT-{}-{}-{}", variety.kode, req.kondisi, date_str);

        let mut tx = self.pool.begin().await.map_err(AppError::from)?;
        let seq = self.sequence.next(&mut tx, &prefix, LockMode::Blocking).await?;
        let kode = format!("{prefix}-{seq:02}");

        let now = Utc::now();
        let lot = Lot {
            id: new_surrogate_id(),
            kode,
            variety_id: variety.id,
            kondisi: req.kondisi,
            qty_awal: 0,
            berat_awal: Decimal::ZERO,
            qty_sisa: 0,
            berat_sisa: Decimal::ZERO,
            status: LotStatus::Draft,
            current_location_id: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.lot_repo.insert(&mut tx, &lot).await?;
        tx.commit().await.map_err(AppError::from)?;

        tracing::info!(lot_id = %lot.id, kode = %lot.kode, "lot created");
        Ok(LotResponse::from(lot))
    }

    async fn add_item_inner(
        &self,
        scope: &Scope,
        lot_id: &str,
        req: AddLotItemRequest,
    ) -> Result<AddLotItemResponse, AppError> {
        if !scope.can_manage_lots() {
            return Err(AppError::forbidden("only central may add lot items"));
        }

        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        let lot = self
            .lot_repo
            .lock_by_id(&mut tx, lot_id)
            .await?
            .filter(|l| !l.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("lot {lot_id} not found")))?;

        if lot.status != LotStatus::Draft {
            return Err(AppError::validation(format!(
                "lot must be DRAFT to add items (currently {})",
                lot.status
            )));
        }

        let hierarchy = self
            .tree_repo
            .resolve_by_kode_and_block(&req.pohon_kode, &req.blok_id)
            .await?
            .ok_or_else(|| {
                AppError::validation(format!(
                    "no tree {} in block {}",
                    req.pohon_kode, req.blok_id
                ))
            })?;

        let today = Utc::now().date_naive();
        let seq_key = format!("fruit|{}|{}", hierarchy.prefix, today);
        let seq = self.sequence.next(&mut tx, &seq_key, LockMode::Blocking).await?;
        let kode = format!("{}-F{seq:05}", hierarchy.prefix);

        let now = Utc::now();
        let fruit = Fruit {
            id: new_surrogate_id(),
            kode,
            variety_id: lot.variety_id.clone(),
            tree_id: hierarchy.tree_id,
            block_id: Some(hierarchy.block_id),
            lot_id: Some(lot.id.clone()),
            berat: req.berat,
            tgl_panen: today,
            is_sorted: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.fruit_repo.insert(&mut tx, &fruit).await?;
        tx.commit().await.map_err(AppError::from)?;

        let current_qty = self.fruit_repo.list_by_lot(&lot.id).await?.len() as i64;

        tracing::info!(lot_id = %lot.id, fruit_id = %fruit.id, current_qty, "lot item added");

        Ok(AddLotItemResponse {
            lot_id: lot.id,
            current_qty,
        })
    }

    async fn remove_item_inner(
        &self,
        scope: &Scope,
        lot_id: &str,
        buah_raw_id: &str,
    ) -> Result<(), AppError> {
        if !scope.can_manage_lots() {
            return Err(AppError::forbidden("only central may remove lot items"));
        }

        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        let lot = self
            .lot_repo
            .lock_by_id(&mut tx, lot_id)
            .await?
            .filter(|l| !l.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("lot {lot_id} not found")))?;

        if lot.status != LotStatus::Draft {
            return Err(AppError::validation(format!(
                "lot must be DRAFT to remove items (currently {})",
                lot.status
            )));
        }

        self.fruit_repo
            .lock_by_id_and_lot(&mut tx, buah_raw_id, lot_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("fruit {buah_raw_id} not in lot {lot_id}")))?;

        self.fruit_repo.hard_delete(&mut tx, buah_raw_id).await?;
        tx.commit().await.map_err(AppError::from)?;

        tracing::info!(lot_id, fruit_id = buah_raw_id, "lot item removed");
        Ok(())
    }

    async fn finalize_inner(
        &self,
        scope: &Scope,
        lot_id: &str,
    ) -> Result<FinalizeLotResponse, AppError> {
        if !scope.can_manage_lots() {
            return Err(AppError::forbidden("only central may finalize lots"));
        }

        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        let mut lot = self
            .lot_repo
            .lock_by_id(&mut tx, lot_id)
            .await?
            .filter(|l| !l.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("lot {lot_id} not found")))?;

        let members = self.fruit_repo.list_by_lot(lot_id).await?;
        if members.is_empty() {
            return Err(AppError::validation(
                "lot must have at least one member fruit to finalize",
            ));
        }

        let qty_total = members.len() as i32;
        let berat_total: Decimal = members.iter().map(|f| f.berat).sum();

        let from = lot.status;
        lot.status = lot.status.apply(LotEvent::Finalize)?;
        lot.qty_awal = qty_total;
        lot.berat_awal = berat_total;
        lot.qty_sisa = qty_total;
        lot.berat_sisa = berat_total;

        self.lot_repo.update(&mut tx, &lot).await?;
        tx.commit().await.map_err(AppError::from)?;

        tracing::info!(lot_id, from = %from, to = %lot.status, "lot finalized");

        Ok(FinalizeLotResponse {
            id: lot.id,
            qty_total,
            berat_total,
            status: lot.status,
        })
    }

    async fn get_list_inner(
        &self,
        filter: LotListFilter,
        scope: &Scope,
        page: PageRequest,
    ) -> Result<Page<LotResponse>, AppError> {
        let (lots, total) = self
            .lot_repo
            .list(&filter, scope, page.offset(), page.limit())
            .await?;

        Ok(Page {
            items: lots.into_iter().map(LotResponse::from).collect(),
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    async fn get_detail_inner(&self, id: &str, scope: &Scope) -> Result<LotResponse, AppError> {
        let lot = self.require_lot(id).await?;

        if !scope.is_central() && !scope.can_add_lot_at(lot.current_location_id.as_deref()) {
            return Err(AppError::forbidden("lot not visible at this location"));
        }

        let fruits = self.fruit_repo.list_by_lot(id).await?;
        let mut members = Vec::with_capacity(fruits.len());
        for fruit in fruits {
            let hierarchy_prefix = self
                .tree_repo
                .resolve_by_tree_id(&fruit.tree_id)
                .await?
                .map(|h| h.prefix)
                .unwrap_or_default();

            members.push(LotMemberFruit {
                id: fruit.id,
                kode: fruit.kode,
                berat: fruit.berat,
                hierarchy_prefix,
            });
        }

        Ok(LotResponse::from(lot).with_members(members))
    }
}
