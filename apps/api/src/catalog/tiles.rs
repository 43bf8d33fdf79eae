//! Master tile catalog: every map tile available across the supported game boxes.
//!
//! Constructed once at startup and carried in `AppState`; nothing reads it from
//! process-wide state.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::models::{QuestTile, SourceGame};

/// Tile number ranges per game box.
const CATALOG_RANGES: &[(SourceGame, RangeInclusive<u32>)] = &[
    (SourceGame::BlackPlague, 1..=9),
    (SourceGame::Wulfsburg, 10..=11),
    (SourceGame::GreenHoard, 12..=20),
    (SourceGame::FriendsAndFoes, 21..=25),
    (SourceGame::NoRestForTheWicked, 26..=30),
];

#[derive(Debug, Clone, Serialize)]
pub struct TileCatalog {
    tiles: Vec<QuestTile>,
}

impl TileCatalog {
    /// The catalog shipped with the app: 30 tiles over five game boxes.
    pub fn standard() -> Self {
        let tiles = CATALOG_RANGES
            .iter()
            .flat_map(|(game, range)| {
                range
                    .clone()
                    .map(move |number| QuestTile::new(number.to_string(), *game))
            })
            .collect();
        Self { tiles }
    }

    pub fn tiles(&self) -> &[QuestTile] {
        &self.tiles
    }

    /// Tiles whose source game is in `games`, in catalog order.
    pub fn filtered(&self, games: &[SourceGame]) -> Vec<QuestTile> {
        self.tiles
            .iter()
            .filter(|t| games.contains(&t.source_game))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_has_thirty_tiles() {
        let catalog = TileCatalog::standard();
        assert_eq!(catalog.tiles().len(), 30);
        assert_eq!(catalog.tiles()[0].name, "1");
        assert_eq!(catalog.tiles()[29].name, "30");
    }

    #[test]
    fn test_filtered_counts_per_game() {
        let catalog = TileCatalog::standard();
        assert_eq!(catalog.filtered(&[SourceGame::BlackPlague]).len(), 9);
        assert_eq!(catalog.filtered(&[SourceGame::Wulfsburg]).len(), 2);
        assert_eq!(catalog.filtered(&[SourceGame::GreenHoard]).len(), 9);
        assert_eq!(catalog.filtered(&[SourceGame::FriendsAndFoes]).len(), 5);
        assert_eq!(catalog.filtered(&[SourceGame::NoRestForTheWicked]).len(), 5);
    }

    #[test]
    fn test_filtered_with_no_games_is_empty() {
        let catalog = TileCatalog::standard();
        assert!(catalog.filtered(&[]).is_empty());
    }

    #[test]
    fn test_catalog_tiles_start_unrotated_on_v_side() {
        let catalog = TileCatalog::standard();
        assert!(catalog
            .tiles()
            .iter()
            .all(|t| t.rotation == 0 && t.side == crate::models::Side::V));
    }
}
