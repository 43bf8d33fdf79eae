use std::sync::Arc;

use crate::catalog::TileCatalog;
use crate::layout::{AssetManifest, LayoutConfig};
use crate::quests::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres or in-memory, picked at startup from `DATABASE_URL`.
    pub store: Arc<dyn DocumentStore>,
    pub catalog: Arc<TileCatalog>,
    /// Image names the composer may reference.
    pub assets: Arc<AssetManifest>,
    pub layout_config: LayoutConfig,
}
