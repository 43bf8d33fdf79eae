use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::file_name_for;
use crate::models::{Quest, QuestDocument, QuestTile};
use crate::quests::store::{
    not_found, sorted_by_order, tile_not_found, DocumentStore, QuestUpdate,
};

/// Process-local store, used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<Uuid, QuestDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, title: &str) -> Result<QuestDocument, AppError> {
        let document = QuestDocument::new(title);
        self.documents
            .write()
            .await
            .insert(document.id, document.clone());
        info!("Created quest {} ({title})", document.id);
        Ok(document)
    }

    async fn get(&self, id: Uuid) -> Result<Option<QuestDocument>, AppError> {
        Ok(self.documents.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<QuestDocument>, AppError> {
        let mut documents: Vec<QuestDocument> =
            self.documents.read().await.values().cloned().collect();
        documents.sort_by_key(|d| (d.file.created_at, d.id));
        Ok(documents)
    }

    async fn update_quest(
        &self,
        id: Uuid,
        update: &QuestUpdate,
    ) -> Result<QuestDocument, AppError> {
        let mut documents = self.documents.write().await;
        let document = documents.get_mut(&id).ok_or_else(|| not_found(id))?;

        let quest = document.quest.get_or_insert_with(Quest::default);
        quest.objectives = update.objectives.clone();
        quest.story = update.story.clone();
        quest.special_rules = update.special_rules.clone();
        quest.selected_games = update.selected_games.clone();

        document.title = update.title.clone();
        document.file.file_name = file_name_for(&update.title);
        document.file.touch();

        info!("Updated quest {id}");
        Ok(document.clone())
    }

    async fn replace_tiles(
        &self,
        id: Uuid,
        tiles: Vec<QuestTile>,
    ) -> Result<QuestDocument, AppError> {
        let mut documents = self.documents.write().await;
        let document = documents.get_mut(&id).ok_or_else(|| not_found(id))?;

        document.tiles = sorted_by_order(tiles);
        document.file.touch();

        info!("Saved {} tile(s) for quest {id}", document.tiles.len());
        Ok(document.clone())
    }

    async fn rotate_tile(&self, id: Uuid, order_index: i32) -> Result<QuestDocument, AppError> {
        let mut documents = self.documents.write().await;
        let document = documents.get_mut(&id).ok_or_else(|| not_found(id))?;

        let tile = document
            .tiles
            .iter_mut()
            .find(|t| t.order_index == order_index)
            .ok_or_else(|| tile_not_found(id, order_index))?;
        tile.rotate_clockwise();
        info!("Rotated tile {} of quest {id} to {}", tile.label(), tile.rotation);

        document.file.touch();
        Ok(document.clone())
    }

    async fn set_page_count(&self, id: Uuid, page_count: i32) -> Result<(), AppError> {
        let mut documents = self.documents.write().await;
        let document = documents.get_mut(&id).ok_or_else(|| not_found(id))?;
        document.file.page_count = page_count;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let removed = self.documents.write().await.remove(&id).is_some();
        if removed {
            info!("Deleted quest {id}");
        }
        Ok(removed)
    }
}
