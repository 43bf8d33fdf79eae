//! Document store port: persistence contract for quest documents.
//!
//! `AppState` holds an `Arc<dyn DocumentStore>`: `PgDocumentStore` when a
//! database is configured, `MemoryDocumentStore` otherwise and in tests.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{QuestDocument, QuestTile};

/// Full replacement of a document's editable quest fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestUpdate {
    pub title: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub special_rules: Vec<String>,
    #[serde(default)]
    pub selected_games: Vec<String>,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates an empty document (no tiles, no quest) with fresh file metadata.
    async fn create(&self, title: &str) -> Result<QuestDocument, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<QuestDocument>, AppError>;

    /// All documents, oldest first.
    async fn list(&self) -> Result<Vec<QuestDocument>, AppError>;

    /// Sets the title and quest content, creating the quest on first save.
    async fn update_quest(&self, id: Uuid, update: &QuestUpdate)
        -> Result<QuestDocument, AppError>;

    /// Replaces the tile map. Tiles are stored sorted by `order_index`.
    async fn replace_tiles(
        &self,
        id: Uuid,
        tiles: Vec<QuestTile>,
    ) -> Result<QuestDocument, AppError>;

    /// Turns the tile at `order_index` a quarter clockwise in one step.
    async fn rotate_tile(&self, id: Uuid, order_index: i32) -> Result<QuestDocument, AppError>;

    async fn set_page_count(&self, id: Uuid, page_count: i32) -> Result<(), AppError>;

    /// Returns `false` when no document had this id.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

/// Loads a document or fails with `NotFound`.
pub async fn require_document(
    store: &dyn DocumentStore,
    id: Uuid,
) -> Result<QuestDocument, AppError> {
    store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quest {id} not found")))
}

pub fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Quest {id} not found"))
}

pub fn tile_not_found(id: Uuid, order_index: i32) -> AppError {
    AppError::NotFound(format!("Quest {id} has no tile at position {order_index}"))
}

pub fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    Ok(())
}

/// Ids and order indices must be unique, rotations non-negative quarter turns.
pub fn validate_tiles(tiles: &[QuestTile]) -> Result<(), AppError> {
    let mut seen_orders = HashSet::new();
    let mut seen_ids = HashSet::new();
    for tile in tiles {
        if !seen_orders.insert(tile.order_index) {
            return Err(AppError::Validation(format!(
                "order_index {} is used by more than one tile",
                tile.order_index
            )));
        }
        if !seen_ids.insert(tile.id) {
            return Err(AppError::Validation(format!(
                "tile id {} appears more than once",
                tile.id
            )));
        }
        if tile.rotation < 0 || tile.rotation % 90 != 0 {
            return Err(AppError::Validation(format!(
                "tile {} has rotation {}, expected a non-negative multiple of 90",
                tile.label(),
                tile.rotation
            )));
        }
        if tile.name.trim().is_empty() {
            return Err(AppError::Validation("tile name cannot be empty".to_string()));
        }
    }
    Ok(())
}

pub fn sorted_by_order(mut tiles: Vec<QuestTile>) -> Vec<QuestTile> {
    tiles.sort_by_key(|t| t.order_index);
    tiles
}
