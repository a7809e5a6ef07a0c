//! Fruit registry service (C3) — harvest intake, bulk intake, and the
//! reads that feed the lot engine's `AddItems`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use inventory_service_core::dto::{
    BulkCreateFruitRequest, CreateFruitRequest, FruitListFilter, FruitResponse, Page, PageRequest,
    TreeSummary, UpdateFruitRequest, VarietySummary,
};
use inventory_service_core::ids::new_surrogate_id;
use inventory_service_core::models::Fruit;
use inventory_service_core::repositories::{
    FruitRepository, HierarchyPrefix, LockMode, SequenceAllocator, TreeRepository,
    VarietyRepository,
};
use inventory_service_core::scope::Scope;
use inventory_service_core::services::{FruitService, VarietyCache};
use shared_error::AppError;

use crate::timeout::{bounded, Timeouts};

pub struct PgFruitService {
    pool: PgPool,
    fruit_repo: Arc<dyn FruitRepository>,
    variety_repo: Arc<dyn VarietyRepository>,
    tree_repo: Arc<dyn TreeRepository>,
    sequence: Arc<dyn SequenceAllocator>,
    variety_cache: Arc<dyn VarietyCache>,
    default_tree_id: String,
    timeouts: Timeouts,
}

impl PgFruitService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        fruit_repo: Arc<dyn FruitRepository>,
        variety_repo: Arc<dyn VarietyRepository>,
        tree_repo: Arc<dyn TreeRepository>,
        sequence: Arc<dyn SequenceAllocator>,
        variety_cache: Arc<dyn VarietyCache>,
        default_tree_id: String,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            pool,
            fruit_repo,
            variety_repo,
            tree_repo,
            sequence,
            variety_cache,
            default_tree_id,
            timeouts,
        }
    }

    /// Resolves a variety id through the cache before falling back to
    /// storage, populating the cache on a miss (§4.3, §5).
    async fn resolve_variety(
        &self,
        variety_id: &str,
    ) -> Result<inventory_service_core::repositories::Variety, AppError> {
        if let Some(v) = self.variety_cache.get(variety_id) {
            return Ok(v);
        }

        let variety = self
            .variety_repo
            .find_by_id(variety_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("variety {variety_id} does not exist")))?;

        self.variety_cache.put(variety.clone());
        Ok(variety)
    }

    async fn resolve_tree(&self, tree_id: &str) -> Result<HierarchyPrefix, AppError> {
        self.tree_repo
            .resolve_by_tree_id(tree_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("tree {tree_id} does not exist")))
    }

    fn effective_tree_id(&self, requested: Option<&str>) -> String {
        match requested {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.default_tree_id.clone(),
        }
    }
}

#[async_trait]
impl FruitService for PgFruitService {
    async fn create(&self, req: CreateFruitRequest) -> Result<FruitResponse, AppError> {
        bounded(self.timeouts.read, self.create_inner(req)).await
    }

    async fn bulk_create(
        &self,
        req: BulkCreateFruitRequest,
    ) -> Result<Vec<FruitResponse>, AppError> {
        bounded(self.timeouts.read, self.bulk_create_inner(req)).await
    }

    async fn get_list(
        &self,
        filter: FruitListFilter,
        page: PageRequest,
    ) -> Result<Page<FruitResponse>, AppError> {
        bounded(self.timeouts.read, self.get_list_inner(filter, page)).await
    }

    async fn get_unsorted(
        &self,
        filter: FruitListFilter,
        page: PageRequest,
    ) -> Result<Page<FruitResponse>, AppError> {
        bounded(self.timeouts.read, self.get_unsorted_inner(filter, page)).await
    }

    async fn get_by_id(&self, id: &str) -> Result<FruitResponse, AppError> {
        bounded(self.timeouts.read, self.get_by_id_inner(id)).await
    }

    async fn update(&self, id: &str, patch: UpdateFruitRequest) -> Result<FruitResponse, AppError> {
        bounded(self.timeouts.read, self.update_inner(id, patch)).await
    }

    async fn delete(&self, id: &str, scope: &Scope) -> Result<(), AppError> {
        bounded(self.timeouts.read, self.delete_inner(id, scope)).await
    }
}

impl PgFruitService {
    async fn create_inner(&self, req: CreateFruitRequest) -> Result<FruitResponse, AppError> {
        let variety = self.resolve_variety(&req.variety_id).await?;
        let tree_id = self.effective_tree_id(req.tree_id.as_deref());
        let hierarchy = self.resolve_tree(&tree_id).await?;
        let tgl_panen = req.tgl_panen.unwrap_or_else(|| Utc::now().date_naive());

        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        let seq_key = format!("fruit|{}|{}", hierarchy.prefix, tgl_panen);
        let seq = self.sequence.next(&mut tx, &seq_key, LockMode::Blocking).await?;
        let kode = format!("{}-F{seq:05}", hierarchy.prefix);

        let now = Utc::now();
        let fruit = Fruit {
            id: new_surrogate_id(),
            kode,
            variety_id: variety.id.clone(),
            tree_id: hierarchy.tree_id.clone(),
            block_id: Some(hierarchy.block_id.clone()),
            lot_id: None,
            berat: Decimal::ZERO,
            tgl_panen,
            is_sorted: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.fruit_repo.insert(&mut tx, &fruit).await?;
        tx.commit().await.map_err(AppError::from)?;

        tracing::info!(fruit_id = %fruit.id, kode = %fruit.kode, "fruit created");

        let mut response = FruitResponse::from(fruit);
        response.variety = Some(VarietySummary {
            id: variety.id,
            kode: variety.kode,
            name: variety.name,
        });
        response.tree = Some(TreeSummary {
            tree_id: hierarchy.tree_id,
            block_id: hierarchy.block_id,
            hierarchy_prefix: hierarchy.prefix,
        });
        Ok(response)
    }

    /// Resolves every distinct tree hierarchy and variety up front, then
    /// reserves exactly one starting sequence value per distinct prefix
    /// and increments locally for each unit within that prefix's items
    /// (§4.3).
    async fn bulk_create_inner(
        &self,
        req: BulkCreateFruitRequest,
    ) -> Result<Vec<FruitResponse>, AppError> {
        let tgl_panen = req.tgl_panen.unwrap_or_else(|| Utc::now().date_naive());

        let mut varieties = HashMap::new();
        let mut hierarchies: HashMap<String, HierarchyPrefix> = HashMap::new();

        for item in &req.items {
            if !varieties.contains_key(&item.variety_id) {
                let variety = self.resolve_variety(&item.variety_id).await?;
                varieties.insert(item.variety_id.clone(), variety);
            }
            let tree_id = self.effective_tree_id(item.tree_id.as_deref());
            if !hierarchies.contains_key(&tree_id) {
                let hierarchy = self.resolve_tree(&tree_id).await?;
                hierarchies.insert(tree_id, hierarchy);
            }
        }

        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        // Reserve one starting sequence per distinct prefix, in the order
        // items first reference it, then assign consecutive values to
        // every fruit that prefix's items request.
        let mut next_seq: HashMap<String, i64> = HashMap::new();
        let mut fruits = Vec::new();
        let now = Utc::now();

        for item in &req.items {
            let tree_id = self.effective_tree_id(item.tree_id.as_deref());
            let hierarchy = hierarchies.get(&tree_id).expect("resolved above");
            let variety = varieties.get(&item.variety_id).expect("resolved above");

            let counter = if let Some(v) = next_seq.get_mut(&hierarchy.prefix) {
                v
            } else {
                let seq_key = format!("fruit|{}|{}", hierarchy.prefix, tgl_panen);
                let start = self
                    .sequence
                    .next(&mut tx, &seq_key, LockMode::Blocking)
                    .await?;
                next_seq.insert(hierarchy.prefix.clone(), start);
                next_seq.get_mut(&hierarchy.prefix).unwrap()
            };

            for _ in 0..item.jumlah {
                let seq = *counter;
                *counter += 1;
                let kode = format!("{}-F{seq:05}", hierarchy.prefix);

                fruits.push(Fruit {
                    id: new_surrogate_id(),
                    kode,
                    variety_id: variety.id.clone(),
                    tree_id: hierarchy.tree_id.clone(),
                    block_id: Some(hierarchy.block_id.clone()),
                    lot_id: None,
                    berat: Decimal::ZERO,
                    tgl_panen,
                    is_sorted: false,
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                });
            }
        }

        self.fruit_repo.insert_many(&mut tx, &fruits).await?;
        tx.commit().await.map_err(AppError::from)?;

        tracing::info!(count = fruits.len(), "bulk fruit create completed");

        Ok(fruits.into_iter().map(FruitResponse::from).collect())
    }

    async fn get_list_inner(
        &self,
        filter: FruitListFilter,
        page: PageRequest,
    ) -> Result<Page<FruitResponse>, AppError> {
        let (fruits, total) = self
            .fruit_repo
            .list(&filter, false, page.offset(), page.limit())
            .await?;

        let items = self.decorate_many(fruits, &filter.include).await?;

        Ok(Page {
            items,
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    async fn get_unsorted_inner(
        &self,
        filter: FruitListFilter,
        page: PageRequest,
    ) -> Result<Page<FruitResponse>, AppError> {
        let (fruits, total) = self
            .fruit_repo
            .list(&filter, true, page.offset(), page.limit())
            .await?;

        let items = self.decorate_many(fruits, &filter.include).await?;

        Ok(Page {
            items,
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    async fn get_by_id_inner(&self, id: &str) -> Result<FruitResponse, AppError> {
        let fruit = self
            .fruit_repo
            .find_by_id(id)
            .await?
            .filter(|f| !f.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("fruit {id} not found")))?;

        Ok(FruitResponse::from(fruit))
    }

    async fn update_inner(
        &self,
        id: &str,
        patch: UpdateFruitRequest,
    ) -> Result<FruitResponse, AppError> {
        let mut fruit = self
            .fruit_repo
            .find_by_id(id)
            .await?
            .filter(|f| !f.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("fruit {id} not found")))?;

        if let Some(tgl_panen) = patch.tgl_panen {
            fruit.tgl_panen = tgl_panen;
        }
        if let Some(variety_id) = patch.variety_id {
            self.resolve_variety(&variety_id).await?;
            fruit.variety_id = variety_id;
        }
        if let Some(tree_id) = patch.tree_id {
            let tree_id = self.effective_tree_id(Some(tree_id.as_str()));
            let hierarchy = self.resolve_tree(&tree_id).await?;
            fruit.tree_id = hierarchy.tree_id;
            fruit.block_id = Some(hierarchy.block_id);
        }

        self.fruit_repo.update(&fruit).await?;
        Ok(FruitResponse::from(fruit))
    }

    async fn delete_inner(&self, id: &str, _scope: &Scope) -> Result<(), AppError> {
        let fruit = self
            .fruit_repo
            .find_by_id(id)
            .await?
            .filter(|f| !f.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("fruit {id} not found")))?;

        self.fruit_repo.soft_delete(&fruit.id).await
    }
}

impl PgFruitService {
    async fn decorate_many(
        &self,
        fruits: Vec<Fruit>,
        include: &inventory_service_core::dto::IncludeSet,
    ) -> Result<Vec<FruitResponse>, AppError> {
        let mut out = Vec::with_capacity(fruits.len());
        for fruit in fruits {
            let tree_id = fruit.tree_id.clone();
            let variety_id = fruit.variety_id.clone();
            let mut response = FruitResponse::from(fruit);

            if include.variety {
                let variety = self.resolve_variety(&variety_id).await?;
                response.variety = Some(VarietySummary {
                    id: variety.id,
                    kode: variety.kode,
                    name: variety.name,
                });
            }
            if include.tree || include.block_chain {
                if let Some(hierarchy) = self.tree_repo.resolve_by_tree_id(&tree_id).await? {
                    response.tree = Some(TreeSummary {
                        tree_id: hierarchy.tree_id,
                        block_id: hierarchy.block_id,
                        hierarchy_prefix: hierarchy.prefix,
                    });
                }
            }

            out.push(response);
        }
        Ok(out)
    }
}
