use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The five game boxes a tile can come from. Serialized as the short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceGame {
    #[serde(rename = "GH")]
    GreenHoard,
    #[serde(rename = "BP")]
    BlackPlague,
    #[serde(rename = "WB")]
    Wulfsburg,
    #[serde(rename = "FF")]
    FriendsAndFoes,
    #[serde(rename = "NR")]
    NoRestForTheWicked,
}

impl SourceGame {
    pub const ALL: [SourceGame; 5] = [
        SourceGame::GreenHoard,
        SourceGame::BlackPlague,
        SourceGame::Wulfsburg,
        SourceGame::FriendsAndFoes,
        SourceGame::NoRestForTheWicked,
    ];

    /// Two-letter code used in tile names and image asset keys.
    pub fn code(self) -> &'static str {
        match self {
            SourceGame::GreenHoard => "GH",
            SourceGame::BlackPlague => "BP",
            SourceGame::Wulfsburg => "WB",
            SourceGame::FriendsAndFoes => "FF",
            SourceGame::NoRestForTheWicked => "NR",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SourceGame::GreenHoard => "Green Hoard",
            SourceGame::BlackPlague => "Black Plague",
            SourceGame::Wulfsburg => "Wulfsburg",
            SourceGame::FriendsAndFoes => "Friends and Foes",
            SourceGame::NoRestForTheWicked => "No Rest for the Wicked",
        }
    }
}

impl fmt::Display for SourceGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SourceGame {
    type Err = anyhow::Error;

    /// Accepts either the short code or the display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        SourceGame::ALL
            .into_iter()
            .find(|g| {
                g.code().eq_ignore_ascii_case(needle) || g.display_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| anyhow!("unknown source game '{s}'"))
    }
}

/// Printed face of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    R,
    #[default]
    V,
    A,
    B,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::R => "r",
            Side::V => "v",
            Side::A => "a",
            Side::B => "b",
        }
    }
}

impl FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" => Ok(Side::R),
            "v" => Ok(Side::V),
            "a" => Ok(Side::A),
            "b" => Ok(Side::B),
            other => Err(anyhow!("unknown tile side '{other}'")),
        }
    }
}

/// A tile placed on a quest map.
///
/// `name` is a bare number for catalog tiles (`"12"`) and is decorated for
/// generated boards: `"12R\nGH"` (number, side, line break, source code).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestTile {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub source_game: SourceGame,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub order_index: i32,
}

impl QuestTile {
    pub fn new(name: impl Into<String>, source_game: SourceGame) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            source_game,
            side: Side::default(),
            rotation: 0,
            order_index: 0,
        }
    }

    /// First line of the name, e.g. `"12R"`. Used in the "Tiles Needed" list.
    pub fn label(&self) -> &str {
        self.name.split('\n').next().unwrap_or(&self.name)
    }

    /// Asset key: the name with line breaks removed, e.g. `"12RGH"`.
    pub fn image_name(&self) -> String {
        self.name.replace('\n', "")
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotation = (self.rotation + 90).rem_euclid(360);
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct QuestTileRow {
    pub id: Uuid,
    pub document_id: Uuid,
    pub name: String,
    pub source_game: String,
    pub side: String,
    pub rotation: i32,
    pub order_index: i32,
}

impl TryFrom<QuestTileRow> for QuestTile {
    type Error = anyhow::Error;

    fn try_from(row: QuestTileRow) -> Result<Self, Self::Error> {
        Ok(QuestTile {
            id: row.id,
            name: row.name,
            source_game: row.source_game.parse()?,
            side: row.side.parse()?,
            rotation: row.rotation,
            order_index: row.order_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_game_parses_code_and_display_name() {
        assert_eq!("GH".parse::<SourceGame>().unwrap(), SourceGame::GreenHoard);
        assert_eq!(
            "black plague".parse::<SourceGame>().unwrap(),
            SourceGame::BlackPlague
        );
        assert!("Monopoly".parse::<SourceGame>().is_err());
    }

    #[test]
    fn test_source_game_serializes_as_code() {
        let json = serde_json::to_string(&SourceGame::FriendsAndFoes).unwrap();
        assert_eq!(json, "\"FF\"");
    }

    #[test]
    fn test_label_and_image_name_of_decorated_tile() {
        let tile = QuestTile::new("12R\nGH", SourceGame::GreenHoard);
        assert_eq!(tile.label(), "12R");
        assert_eq!(tile.image_name(), "12RGH");
    }

    #[test]
    fn test_label_of_bare_catalog_tile() {
        let tile = QuestTile::new("7", SourceGame::BlackPlague);
        assert_eq!(tile.label(), "7");
        assert_eq!(tile.image_name(), "7");
    }

    #[test]
    fn test_rotate_clockwise_wraps_at_360() {
        let mut tile = QuestTile::new("1", SourceGame::BlackPlague);
        tile.rotation = 270;
        tile.rotate_clockwise();
        assert_eq!(tile.rotation, 0);
        tile.rotate_clockwise();
        assert_eq!(tile.rotation, 90);
    }

    #[test]
    fn test_row_conversion_rejects_unknown_side() {
        let row = QuestTileRow {
            id: Uuid::new_v4(),
            document_id: Uuid::new_v4(),
            name: "3".to_string(),
            source_game: "BP".to_string(),
            side: "z".to_string(),
            rotation: 0,
            order_index: 0,
        };
        assert!(QuestTile::try_from(row).is_err());
    }
}
