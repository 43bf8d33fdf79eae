use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{file_name_for, QuestDocumentRow, QuestRow};
use crate::models::tile::QuestTileRow;
use crate::models::{Quest, QuestDocument, QuestTile};
use crate::quests::store::{
    not_found, sorted_by_order, tile_not_found, DocumentStore, QuestUpdate,
};

/// PostgreSQL-backed store. Schema: `migrations/0001_quest_sheets.sql`.
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_tiles(&self, id: Uuid) -> Result<Vec<QuestTile>, AppError> {
        let rows = sqlx::query_as::<_, QuestTileRow>(
            "SELECT * FROM quest_tiles WHERE document_id = $1 ORDER BY order_index",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let tiles = rows
            .into_iter()
            .map(QuestTile::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(tiles)
    }

    async fn load_quest(&self, id: Uuid) -> Result<Option<Quest>, AppError> {
        let row = sqlx::query_as::<_, QuestRow>("SELECT * FROM quests WHERE document_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Quest::from))
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(&self, title: &str) -> Result<QuestDocument, AppError> {
        let document = QuestDocument::new(title);

        sqlx::query(
            r#"
            INSERT INTO quest_documents
                (id, title, file_name, page_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(document.id)
        .bind(&document.title)
        .bind(&document.file.file_name)
        .bind(document.file.page_count)
        .bind(document.file.created_at)
        .bind(document.file.updated_at)
        .execute(&self.pool)
        .await?;

        info!("Created quest {} ({title})", document.id);
        Ok(document)
    }

    async fn get(&self, id: Uuid) -> Result<Option<QuestDocument>, AppError> {
        let row = sqlx::query_as::<_, QuestDocumentRow>(
            "SELECT * FROM quest_documents WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let tiles = self.load_tiles(id).await?;
        let quest = self.load_quest(id).await?;
        Ok(Some(row.into_document(tiles, quest)))
    }

    async fn list(&self) -> Result<Vec<QuestDocument>, AppError> {
        let rows = sqlx::query_as::<_, QuestDocumentRow>(
            "SELECT * FROM quest_documents ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        let tile_rows = sqlx::query_as::<_, QuestTileRow>(
            "SELECT * FROM quest_tiles ORDER BY document_id, order_index",
        )
        .fetch_all(&self.pool)
        .await?;

        let quest_rows = sqlx::query_as::<_, QuestRow>("SELECT * FROM quests")
            .fetch_all(&self.pool)
            .await?;

        let mut tiles_by_document: HashMap<Uuid, Vec<QuestTile>> = HashMap::new();
        for row in tile_rows {
            let document_id = row.document_id;
            tiles_by_document
                .entry(document_id)
                .or_default()
                .push(QuestTile::try_from(row)?);
        }

        let mut quests_by_document: HashMap<Uuid, Quest> = quest_rows
            .into_iter()
            .map(|row| (row.document_id, Quest::from(row)))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let tiles = tiles_by_document.remove(&row.id).unwrap_or_default();
                let quest = quests_by_document.remove(&row.id);
                row.into_document(tiles, quest)
            })
            .collect())
    }

    async fn update_quest(
        &self,
        id: Uuid,
        update: &QuestUpdate,
    ) -> Result<QuestDocument, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE quest_documents SET title = $2, file_name = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(&update.title)
        .bind(file_name_for(&update.title))
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(not_found(id));
        }

        // Upsert: the quest row is created on the first save of a document.
        sqlx::query(
            r#"
            INSERT INTO quests (document_id, story, objectives, special_rules, selected_games)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (document_id) DO UPDATE SET
                story = EXCLUDED.story,
                objectives = EXCLUDED.objectives,
                special_rules = EXCLUDED.special_rules,
                selected_games = EXCLUDED.selected_games
            "#,
        )
        .bind(id)
        .bind(&update.story)
        .bind(&update.objectives)
        .bind(&update.special_rules)
        .bind(&update.selected_games)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("Updated quest {id}");

        self.get(id).await?.ok_or_else(|| not_found(id))
    }

    async fn replace_tiles(
        &self,
        id: Uuid,
        tiles: Vec<QuestTile>,
    ) -> Result<QuestDocument, AppError> {
        let tiles = sorted_by_order(tiles);
        let mut tx = self.pool.begin().await?;

        let touched = sqlx::query("UPDATE quest_documents SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if touched.rows_affected() == 0 {
            return Err(not_found(id));
        }

        sqlx::query("DELETE FROM quest_tiles WHERE document_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for tile in &tiles {
            sqlx::query(
                r#"
                INSERT INTO quest_tiles
                    (id, document_id, name, source_game, side, rotation, order_index)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(tile.id)
            .bind(id)
            .bind(&tile.name)
            .bind(tile.source_game.code())
            .bind(tile.side.as_str())
            .bind(tile.rotation)
            .bind(tile.order_index)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!("Saved {} tile(s) for quest {id}", tiles.len());

        self.get(id).await?.ok_or_else(|| not_found(id))
    }

    async fn rotate_tile(&self, id: Uuid, order_index: i32) -> Result<QuestDocument, AppError> {
        let mut tx = self.pool.begin().await?;

        let touched = sqlx::query("UPDATE quest_documents SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if touched.rows_affected() == 0 {
            return Err(not_found(id));
        }

        // The row lock serialises concurrent rotations of the same tile.
        let rotated = sqlx::query(
            r#"
            UPDATE quest_tiles SET rotation = (rotation + 90) % 360
            WHERE document_id = $1 AND order_index = $2
            "#,
        )
        .bind(id)
        .bind(order_index)
        .execute(&mut *tx)
        .await?;

        if rotated.rows_affected() == 0 {
            return Err(tile_not_found(id, order_index));
        }

        tx.commit().await?;
        info!("Rotated tile {order_index} of quest {id}");

        self.get(id).await?.ok_or_else(|| not_found(id))
    }

    async fn set_page_count(&self, id: Uuid, page_count: i32) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE quest_documents SET page_count = $2 WHERE id = $1")
            .bind(id)
            .bind(page_count)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        // quests and quest_tiles rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM quest_documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!("Deleted quest {id}");
        }
        Ok(removed)
    }
}
