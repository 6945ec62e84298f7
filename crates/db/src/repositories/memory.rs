//! In-process store used when no database is configured, and by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use nzwalks_core::difficulty::{seed_difficulties, Difficulty};
use nzwalks_core::query::ListQuery;
use nzwalks_core::region::{seed_regions, NewRegion, Region};
use nzwalks_core::types::DbId;
use nzwalks_core::walk::{NewWalk, Walk};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::DbError;
use crate::repositories::Repository;

#[derive(Debug, Default)]
struct State {
    difficulties: HashMap<DbId, Difficulty>,
    regions: HashMap<DbId, Region>,
    walks: HashMap<DbId, Walk>,
}

impl State {
    /// Fill in a walk's difficulty and region from the current rows.
    fn hydrate(&self, mut walk: Walk) -> Walk {
        walk.difficulty = self.difficulties.get(&walk.difficulty_id).cloned();
        walk.region = self.regions.get(&walk.region_id).cloned();
        walk
    }

    fn check_references(&self, input: &NewWalk) -> Result<(), DbError> {
        if !self.difficulties.contains_key(&input.difficulty_id) {
            return Err(DbError::MissingReference {
                field: "difficultyId",
                entity: "Difficulty",
                id: input.difficulty_id,
            });
        }
        if !self.regions.contains_key(&input.region_id) {
            return Err(DbError::MissingReference {
                field: "regionId",
                entity: "Region",
                id: input.region_id,
            });
        }
        Ok(())
    }
}

/// Regions, walks, and difficulties held behind one lock.
///
/// Mirrors the PostgreSQL schema: walk references are checked on write and
/// deleting a region deletes its walks.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<State>,
}

impl MemoryStore {
    /// A store holding only the difficulty reference data.
    pub fn new() -> Self {
        Self::with_regions(Vec::new())
    }

    /// A store holding the difficulties and the seed regions.
    pub fn seeded() -> Self {
        Self::with_regions(seed_regions())
    }

    fn with_regions(regions: Vec<Region>) -> Self {
        let state = State {
            difficulties: seed_difficulties().into_iter().map(|d| (d.id, d)).collect(),
            regions: regions.into_iter().map(|r| (r.id, r)).collect(),
            walks: HashMap::new(),
        };
        Self {
            inner: RwLock::new(state),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<Region> for MemoryStore {
    async fn get_all(&self, query: &ListQuery) -> Result<Vec<Region>, DbError> {
        let state = self.inner.read().await;
        let regions: Vec<Region> = state.regions.values().cloned().collect();
        Ok(query.apply(regions))
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Region>, DbError> {
        Ok(self.inner.read().await.regions.get(&id).cloned())
    }

    async fn create(&self, input: &NewRegion) -> Result<Region, DbError> {
        let region = Region::from_new(Uuid::new_v4(), input.clone());
        self.inner
            .write()
            .await
            .regions
            .insert(region.id, region.clone());
        Ok(region)
    }

    async fn update(&self, id: DbId, input: &NewRegion) -> Result<Option<Region>, DbError> {
        let mut state = self.inner.write().await;
        Ok(state.regions.get_mut(&id).map(|region| {
            region.apply(input.clone());
            region.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<Option<Region>, DbError> {
        let mut state = self.inner.write().await;
        let removed = state.regions.remove(&id);
        if removed.is_some() {
            state.walks.retain(|_, walk| walk.region_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl Repository<Walk> for MemoryStore {
    async fn get_all(&self, query: &ListQuery) -> Result<Vec<Walk>, DbError> {
        let state = self.inner.read().await;
        let walks: Vec<Walk> = state
            .walks
            .values()
            .cloned()
            .map(|w| state.hydrate(w))
            .collect();
        Ok(query.apply(walks))
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Walk>, DbError> {
        let state = self.inner.read().await;
        Ok(state.walks.get(&id).cloned().map(|w| state.hydrate(w)))
    }

    async fn create(&self, input: &NewWalk) -> Result<Walk, DbError> {
        let mut state = self.inner.write().await;
        state.check_references(input)?;
        let walk = Walk::from_new(Uuid::new_v4(), input.clone());
        state.walks.insert(walk.id, walk.clone());
        Ok(state.hydrate(walk))
    }

    async fn update(&self, id: DbId, input: &NewWalk) -> Result<Option<Walk>, DbError> {
        let mut state = self.inner.write().await;
        if !state.walks.contains_key(&id) {
            return Ok(None);
        }
        state.check_references(input)?;
        let updated = state.walks.get_mut(&id).map(|walk| {
            walk.apply(input.clone());
            walk.clone()
        });
        Ok(updated.map(|w| state.hydrate(w)))
    }

    async fn delete(&self, id: DbId) -> Result<Option<Walk>, DbError> {
        let mut state = self.inner.write().await;
        let removed = state.walks.remove(&id);
        Ok(removed.map(|w| state.hydrate(w)))
    }
}
