//! Sheet assembly: builds the flyer text for a quest document, paginates it and
//! composes the pages.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::layout::assets::AssetManifest;
use crate::layout::composer::{compose, LayoutVariant, SheetHeader, SheetLayout};
use crate::layout::font_metrics::TextMeasure;
use crate::layout::page::LayoutConfig;
use crate::layout::paginator::split_text_into_columns;
use crate::models::{QuestDocument, QuestTile};

const DEFAULT_QUEST_NUMBER: u32 = 1;

/// Options for composing a sheet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetRequest {
    /// Number printed in the "Quest N:" heading. Defaults to 1.
    pub quest_number: Option<u32>,
    /// Overrides the materials line derived from the selected games.
    pub materials: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sheet {
    pub columns: Vec<String>,
    pub variant: LayoutVariant,
    /// Height limit the text was paginated against (second column gets extra slack).
    pub max_column_height: f32,
    #[serde(flatten)]
    pub layout: SheetLayout,
}

impl Sheet {
    pub fn page_count(&self) -> usize {
        self.layout.pages.len()
    }
}

/// Column height left for text once the tile grid has claimed its share of the page.
pub fn column_height_for_tiles(tile_count: usize) -> f32 {
    match tile_count {
        1..=3 => 450.0,
        4..=6 => 305.0,
        _ => 200.0,
    }
}

/// `"Zombicide: A, Zombicide: B and Zombicide: C"`.
pub fn format_games(games: &[String]) -> String {
    let named: Vec<String> = games
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .map(|g| format!("Zombicide: {g}"))
        .collect();
    match named.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}

pub fn format_list(items: &[String]) -> String {
    items.join("\n")
}

/// Tile labels in order, comma separated: `"1R, 12V, 26R"`.
pub fn tile_description(tiles: &[QuestTile]) -> String {
    tiles
        .iter()
        .map(QuestTile::label)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn flyer_text(
    story: &str,
    tiles: &str,
    materials: &str,
    objectives: &str,
    rules: &str,
) -> String {
    format!(
        "{story}\n\nTiles Needed:\n{tiles}\n\n{materials}\n\nObjectives:\n{objectives}\n\nSpecial Rules:\n{rules}"
    )
}

/// Paginates and composes the sheet for `document`.
pub fn build_sheet(
    document: &QuestDocument,
    request: &SheetRequest,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
    assets: &AssetManifest,
) -> Sheet {
    let tiles = document.ordered_tiles();
    let quest = document.quest.clone().unwrap_or_default();

    let materials = request
        .materials
        .clone()
        .unwrap_or_else(|| format_games(&quest.selected_games));

    let text = flyer_text(
        &quest.story,
        &tile_description(&tiles),
        &materials,
        &format_list(&quest.objectives),
        &format_list(&quest.special_rules),
    );

    let max_column_height = column_height_for_tiles(tiles.len());
    let columns = split_text_into_columns(
        text.trim(),
        measure,
        config.column_width,
        max_column_height,
        config.second_column_slack,
    );
    let variant = LayoutVariant::for_column_count(columns.len());

    let header = SheetHeader {
        quest_number: request.quest_number.unwrap_or(DEFAULT_QUEST_NUMBER),
        title: document.title.clone(),
    };
    let layout = compose(&columns, &tiles, &header, variant, config, assets);

    info!(
        "Built sheet for quest {}: {} column(s), {:?}, {} page(s)",
        document.id,
        columns.len(),
        variant,
        layout.pages.len()
    );

    Sheet {
        columns,
        variant,
        max_column_height,
        layout,
    }
}
