use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::tile::QuestTile;

pub const DEFAULT_TITLE: &str = "Untitled";

/// Narrative and rules content attached to one quest document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub special_rules: Vec<String>,
    /// Game names as entered by the user, e.g. "Black Plague".
    #[serde(default)]
    pub selected_games: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub file_name: String,
    /// Pages of the last composed sheet; 0 until one has been composed.
    pub page_count: i32,
}

impl FileMetadata {
    pub fn new(title: &str) -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            file_name: file_name_for(title),
            page_count: 0,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

pub fn file_name_for(title: &str) -> String {
    format!("{title}.pdf")
}

/// A quest sheet: title, tile map, optional quest content and file metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestDocument {
    pub id: Uuid,
    pub title: String,
    pub tiles: Vec<QuestTile>,
    pub quest: Option<Quest>,
    pub file: FileMetadata,
}

impl QuestDocument {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: Uuid::new_v4(),
            file: FileMetadata::new(&title),
            title,
            tiles: Vec::new(),
            quest: None,
        }
    }

    /// Tiles in render order.
    pub fn ordered_tiles(&self) -> Vec<QuestTile> {
        let mut tiles = self.tiles.clone();
        tiles.sort_by_key(|t| t.order_index);
        tiles
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct QuestDocumentRow {
    pub id: Uuid,
    pub title: String,
    pub file_name: String,
    pub page_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct QuestRow {
    pub document_id: Uuid,
    pub story: String,
    pub objectives: Vec<String>,
    pub special_rules: Vec<String>,
    pub selected_games: Vec<String>,
}

impl From<QuestRow> for Quest {
    fn from(row: QuestRow) -> Self {
        Quest {
            objectives: row.objectives,
            story: row.story,
            special_rules: row.special_rules,
            selected_games: row.selected_games,
        }
    }
}

impl QuestDocumentRow {
    pub fn into_document(self, tiles: Vec<QuestTile>, quest: Option<Quest>) -> QuestDocument {
        QuestDocument {
            id: self.id,
            title: self.title,
            tiles,
            quest,
            file: FileMetadata {
                created_at: self.created_at,
                updated_at: self.updated_at,
                file_name: self.file_name,
                page_count: self.page_count,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tile::SourceGame;

    #[test]
    fn test_new_document_starts_empty() {
        let doc = QuestDocument::new(DEFAULT_TITLE);
        assert_eq!(doc.title, "Untitled");
        assert!(doc.tiles.is_empty());
        assert!(doc.quest.is_none());
        assert_eq!(doc.file.file_name, "Untitled.pdf");
        assert_eq!(doc.file.page_count, 0);
        assert_eq!(doc.file.created_at, doc.file.updated_at);
    }

    #[test]
    fn test_ordered_tiles_sorts_by_order_index() {
        let mut doc = QuestDocument::new("Night Watch");
        for (name, order) in [("3", 2), ("1", 0), ("2", 1)] {
            let mut tile = QuestTile::new(name, SourceGame::BlackPlague);
            tile.order_index = order;
            doc.tiles.push(tile);
        }
        let names: Vec<String> = doc.ordered_tiles().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["1", "2", "3"]);
    }
}
