use async_trait::async_trait;
use shared_error::AppError;

/// A durian variety as read from the out-of-scope master-data store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variety {
    pub id: String,
    pub kode: String,
    pub name: String,
}

/// The resolved `company -> estate -> division -> block -> tree` chain
/// for a tree, reduced to the kode prefix C1/C3 fold into a fruit code,
/// plus the individual ids needed to stamp the fruit row.
#[derive(Debug, Clone)]
pub struct HierarchyPrefix {
    pub tree_id: String,
    pub block_id: String,
    pub prefix: String,
}

/// Read-only access to the variety master-data table. Mutation of
/// varieties is out of scope (§1); the core only ever looks them up.
#[async_trait]
pub trait VarietyRepository: Send + Sync {
    async fn find_by_id(&self, variety_id: &str) -> Result<Option<Variety>, AppError>;

    /// Batched lookup used by `BulkCreate` so distinct varieties are
    /// fetched in one query rather than once per item (§4.3).
    async fn find_by_ids(&self, variety_ids: &[String]) -> Result<Vec<Variety>, AppError>;
}

/// Read-only access to the geographic hierarchy (company -> estate ->
/// division -> block -> tree). Out of scope to mutate (§1); C3/C4 read
/// it to resolve a tree reference into the kode prefix used for human
/// codes.
#[async_trait]
pub trait TreeRepository: Send + Sync {
    /// Resolve a tree by id to its full hierarchy prefix.
    async fn resolve_by_tree_id(&self, tree_id: &str) -> Result<Option<HierarchyPrefix>, AppError>;

    /// Resolve `(pohonKode, blokId)` to a hierarchy prefix, as `AddItems`
    /// requires (§4.4); `None` if no such tree exists in that block.
    async fn resolve_by_kode_and_block(
        &self,
        pohon_kode: &str,
        blok_id: &str,
    ) -> Result<Option<HierarchyPrefix>, AppError>;
}
