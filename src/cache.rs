//! Per-client cache of merged entity collections
//!
//! One entry per entity type, populated on first use by a fan-out across
//! all supported leagues and never refreshed for the lifetime of the owning
//! [`crate::Client`]. Concurrent first requests for the same type coalesce
//! into a single fetch.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::models::{EntityRecord, EntityType};

type CachedRecords = Arc<Vec<EntityRecord>>;

/// Entity-type keyed record store. Owned by the client instance; nothing is
/// shared across instances.
#[derive(Debug, Default)]
pub(crate) struct EntityCache {
    entries: [OnceCell<CachedRecords>; 5],
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached collection for `entity`, fetching it with `fetch`
    /// on first use. At most one fetch is in flight per entity type: callers
    /// arriving while a fetch runs await that same flight and share its
    /// result. A failed fetch leaves the entry unpopulated, so a later call
    /// may try again.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        entity: EntityType,
        fetch: F,
    ) -> Result<CachedRecords, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<EntityRecord>, ApiError>>,
    {
        let cell = &self.entries[entity.index()];

        if let Some(records) = cell.get() {
            debug!("Cache hit for {}: {} records", entity, records.len());
            return Ok(Arc::clone(records));
        }

        let records = cell
            .get_or_try_init(|| async {
                info!("Cache miss for {}, fetching all leagues", entity);
                let fetched = fetch().await?;
                info!("Populated {} cache with {} records", entity, fetched.len());
                Ok::<_, ApiError>(Arc::new(fetched))
            })
            .await?;

        Ok(Arc::clone(records))
    }

    /// The cached collection for `entity`, if already populated
    pub fn get(&self, entity: EntityType) -> Option<CachedRecords> {
        self.entries[entity.index()].get().cloned()
    }

    /// Whether the entry for `entity` has been populated
    #[cfg(test)]
    pub fn is_populated(&self, entity: EntityType) -> bool {
        self.entries[entity.index()].initialized()
    }
}
