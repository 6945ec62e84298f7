use std::sync::Arc;

use nzwalks_core::error::CoreError;
use nzwalks_core::image::ObjectStore;
use nzwalks_core::mapping::Mappers;
use nzwalks_core::region::Region;
use nzwalks_core::walk::Walk;
use nzwalks_db::repositories::Repository;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (every field is behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub regions: Arc<dyn Repository<Region>>,
    pub walks: Arc<dyn Repository<Walk>>,
    pub images: Arc<dyn ObjectStore>,
    /// DTO mapping rules, built and checked once at startup.
    pub mappers: Arc<Mappers>,
}

impl AppState {
    /// Assemble the state, failing if any mapping rule is missing.
    pub fn new(
        config: ServerConfig,
        regions: Arc<dyn Repository<Region>>,
        walks: Arc<dyn Repository<Walk>>,
        images: Arc<dyn ObjectStore>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            config: Arc::new(config),
            regions,
            walks,
            images,
            mappers: Arc::new(Mappers::build()?),
        })
    }
}
