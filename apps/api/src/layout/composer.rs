//! Page Composer: turns text columns and tile placements into per-page draw commands.
//!
//! The output is device-independent: a renderer replays each page's commands in
//! order (later commands draw on top). Coordinates are points with the origin at
//! the top-left of the page.
//!
//! # Variants
//! - `Compact`: text and a 120pt tile grid share the first page.
//! - `Centered`: text fills the first page; the tile grid (150pt) is centred on
//!   the next page, with placement instructions above it.
//!
//! In both variants at most 9 tiles (3 × 3) go on a page; tile 9, 18, … start a
//! new page that carries only tiles.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::layout::assets::{
    AssetManifest, BACKGROUND_IMAGE, ITEMS_NEEDED_IMAGE, TILE_PLACEMENT_IMAGE,
};
use crate::layout::font_metrics::FontFamily;
use crate::layout::page::{LayoutConfig, Point, Rect};
use crate::models::QuestTile;

pub const TILES_PER_PAGE: usize = 9;
pub const TILES_PER_ROW: usize = 3;

const COMPACT_TILE_SIZE: f32 = 120.0;
const CENTERED_TILE_SIZE: f32 = 150.0;
/// Gap kept under the compact tile grid.
const BOTTOM_MARGIN: f32 = 60.0;

// ────────────────────────────────────────────────────────────────────────────
// Draw command types
// ────────────────────────────────────────────────────────────────────────────

/// How a tile image is turned before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Up,
    Right,
    Down,
    Left,
}

/// Maps a stored rotation to an image orientation.
///
/// Degrees are taken modulo 360 keeping their sign (450 → 90, -90 → -90).
/// Anything other than 90, 180 or 270 after that falls back to `Up`.
pub fn orientation_for(degrees: i32) -> Orientation {
    match degrees % 360 {
        90 => Orientation::Right,
        180 => Orientation::Down,
        270 => Orientation::Left,
        _ => Orientation::Up,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    /// "Quest N:", bold 30pt, blue.
    QuestHeading,
    /// Sheet title, bold 35pt.
    Title,
    /// Column text in the body font.
    Body,
}

/// Resolved face, size and colour a renderer draws a text command with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFont {
    pub family: FontFamily,
    pub size_pt: f32,
    pub color: String,
}

impl TextStyle {
    pub fn font(self, config: &LayoutConfig) -> TextFont {
        let (family, size_pt) = match self {
            TextStyle::QuestHeading => (FontFamily::SystemBold, 30.0),
            TextStyle::Title => (FontFamily::SystemBold, 35.0),
            TextStyle::Body => (config.body_font, config.body_font_size_pt),
        };
        let color = match self {
            TextStyle::QuestHeading => "blue",
            TextStyle::Title | TextStyle::Body => "black",
        };
        TextFont {
            family,
            size_pt,
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Full-page background image.
    Background { image: String, rect: Rect },
    /// Horizontal rule starting at `from`.
    Rule { from: Point, width: f32, line_width: f32 },
    /// Single-line text drawn at a point.
    Text {
        text: String,
        at: Point,
        style: TextStyle,
        font: TextFont,
    },
    /// Wrapped text clipped to a rectangle.
    TextBlock {
        text: String,
        rect: Rect,
        style: TextStyle,
        font: TextFont,
    },
    /// Decorative or instructional image.
    Image { image: String, rect: Rect },
    /// A map tile image.
    Tile {
        order_index: i32,
        image: String,
        rect: Rect,
        orientation: Orientation,
    },
    /// 3 × 3 grid of tile names, for the compact variant.
    TileNameGrid { names: Vec<String>, rect: Rect },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// 1-based page number.
    pub number: usize,
    pub commands: Vec<DrawCommand>,
}

#[cfg(test)]
impl PageLayout {
    pub fn tiles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Tile { .. }))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub pages: Vec<PageLayout>,
    /// Columns past the second, which neither variant has room for.
    pub unplaced_columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    Compact,
    Centered,
}

impl LayoutVariant {
    /// Two columns fit on the first page; more push the tiles to a page of their own.
    pub fn for_column_count(count: usize) -> Self {
        if count > 2 {
            LayoutVariant::Centered
        } else {
            LayoutVariant::Compact
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetHeader {
    pub quest_number: u32,
    pub title: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Page accumulator
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct PageSink {
    pages: Vec<PageLayout>,
}

impl PageSink {
    fn begin_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(PageLayout {
            number,
            commands: Vec::new(),
        });
    }

    fn draw(&mut self, command: DrawCommand) {
        if self.pages.is_empty() {
            self.begin_page();
        }
        if let Some(page) = self.pages.last_mut() {
            page.commands.push(command);
        }
    }

    fn draw_image_if_present(&mut self, assets: &AssetManifest, image: &str, rect: Rect) {
        if assets.contains(image) {
            self.draw(DrawCommand::Image {
                image: image.to_string(),
                rect,
            });
        } else {
            warn!("Image asset '{image}' not found, skipping");
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// Lays out a quest sheet.
///
/// `tiles` are drawn in the order given; callers sort them by `order_index`.
/// Missing tile images are logged and skipped without affecting where the
/// following tiles or page breaks land.
pub fn compose(
    columns: &[String],
    tiles: &[QuestTile],
    header: &SheetHeader,
    variant: LayoutVariant,
    config: &LayoutConfig,
    assets: &AssetManifest,
) -> SheetLayout {
    let mut sink = PageSink::default();

    sink.begin_page();
    draw_background(&mut sink, config, assets);
    draw_header(&mut sink, header, config);
    draw_columns(&mut sink, columns, config);

    match variant {
        LayoutVariant::Compact => map_tiles_compact(&mut sink, tiles, config, assets),
        LayoutVariant::Centered => {
            sink.begin_page();
            draw_background(&mut sink, config, assets);
            map_tiles_centered(&mut sink, tiles, config, assets);
        }
    }

    let unplaced_columns: Vec<String> = columns.iter().skip(2).cloned().collect();
    if !unplaced_columns.is_empty() {
        warn!(
            "{} text column(s) do not fit the sheet and were left out",
            unplaced_columns.len()
        );
    }

    debug!(
        "Composed {:?} sheet: {} page(s), {} tile(s)",
        variant,
        sink.pages.len(),
        tiles.len()
    );

    SheetLayout {
        pages: sink.pages,
        unplaced_columns,
    }
}

/// Rows the tile grid occupies on its first page (at most 3).
pub fn grid_rows(tile_count: usize) -> usize {
    ((tile_count + TILES_PER_ROW - 1) / TILES_PER_ROW).min(TILES_PER_PAGE / TILES_PER_ROW)
}

fn draw_background(sink: &mut PageSink, config: &LayoutConfig, assets: &AssetManifest) {
    if assets.contains(BACKGROUND_IMAGE) {
        sink.draw(DrawCommand::Background {
            image: BACKGROUND_IMAGE.to_string(),
            rect: Rect::new(0.0, 0.0, config.page_width, config.page_height),
        });
    } else {
        warn!("Background image '{BACKGROUND_IMAGE}' not found, page left blank");
    }
}

fn draw_header(sink: &mut PageSink, header: &SheetHeader, config: &LayoutConfig) {
    sink.draw(rule(Point::new(45.0, 50.0), config.column_width));
    sink.draw(DrawCommand::Text {
        text: format!("Quest {}:", header.quest_number),
        at: Point::new(50.0, 55.0),
        style: TextStyle::QuestHeading,
        font: TextStyle::QuestHeading.font(config),
    });
    sink.draw(DrawCommand::Text {
        text: header.title.clone(),
        at: Point::new(50.0, 100.0),
        style: TextStyle::Title,
        font: TextStyle::Title.font(config),
    });
    sink.draw(rule(Point::new(45.0, 150.0), config.column_width));
}

fn rule(from: Point, width: f32) -> DrawCommand {
    DrawCommand::Rule {
        from,
        width,
        line_width: 2.0,
    }
}

/// Left column under the header, right column along the full right half.
fn draw_columns(sink: &mut PageSink, columns: &[String], config: &LayoutConfig) {
    let slots = [
        Rect::new(50.0, 170.0, config.column_width, 550.0),
        Rect::new(310.0, 53.0, config.column_width, 670.0),
    ];
    for (text, rect) in columns.iter().zip(slots) {
        sink.draw(DrawCommand::TextBlock {
            text: text.clone(),
            rect,
            style: TextStyle::Body,
            font: TextStyle::Body.font(config),
        });
    }
}

fn map_tiles_compact(
    sink: &mut PageSink,
    tiles: &[QuestTile],
    config: &LayoutConfig,
    assets: &AssetManifest,
) {
    let grid_height = grid_rows(tiles.len()) as f32 * COMPACT_TILE_SIZE;
    let grid_top = config.page_height - grid_height - BOTTOM_MARGIN;

    sink.draw_image_if_present(
        assets,
        ITEMS_NEEDED_IMAGE,
        Rect::new(310.0, grid_top - 150.0, 250.0, 150.0),
    );

    sink.draw(DrawCommand::TileNameGrid {
        names: tiles
            .iter()
            .take(TILES_PER_PAGE)
            .map(|t| t.name.clone())
            .collect(),
        rect: Rect::new(430.0, grid_top - COMPACT_TILE_SIZE + 160.0, 100.0, 100.0),
    });

    place_tiles(sink, tiles, assets, COMPACT_TILE_SIZE, Point::new(50.0, grid_top));
}

fn map_tiles_centered(
    sink: &mut PageSink,
    tiles: &[QuestTile],
    config: &LayoutConfig,
    assets: &AssetManifest,
) {
    let grid_height = grid_rows(tiles.len()) as f32 * CENTERED_TILE_SIZE;
    let grid_width = TILES_PER_ROW as f32 * CENTERED_TILE_SIZE;
    let origin = Point::new(
        (config.page_width - grid_width) / 2.0,
        (config.page_height - grid_height) / 2.0,
    );

    // Instructions are drawn as a pair or not at all.
    if assets.contains(ITEMS_NEEDED_IMAGE) && assets.contains(TILE_PLACEMENT_IMAGE) {
        let items_y = origin.y - 150.0 - 20.0;
        sink.draw(DrawCommand::Image {
            image: TILE_PLACEMENT_IMAGE.to_string(),
            rect: Rect::new(80.0, items_y + 50.0, 100.0, 100.0),
        });
        sink.draw(DrawCommand::Image {
            image: ITEMS_NEEDED_IMAGE.to_string(),
            rect: Rect::new(280.0, items_y, 250.0, 150.0),
        });
    } else {
        warn!("Tile placement instructions missing, drawing the grid alone");
    }

    place_tiles(sink, tiles, assets, CENTERED_TILE_SIZE, origin);
}

fn place_tiles(
    sink: &mut PageSink,
    tiles: &[QuestTile],
    assets: &AssetManifest,
    tile_size: f32,
    origin: Point,
) {
    for (index, tile) in tiles.iter().enumerate() {
        if index % TILES_PER_PAGE == 0 && index != 0 {
            sink.begin_page();
        }

        let image = tile.image_name();
        if !assets.contains(&image) {
            warn!("Image for tile {image} not found, skipping");
            continue;
        }

        let slot = index % TILES_PER_PAGE;
        let row = slot / TILES_PER_ROW;
        let col = slot % TILES_PER_ROW;

        sink.draw(DrawCommand::Tile {
            order_index: tile.order_index,
            image,
            rect: Rect::new(
                origin.x + col as f32 * tile_size,
                origin.y + row as f32 * tile_size,
                tile_size,
                tile_size,
            ),
            orientation: orientation_for(tile.rotation),
        });
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TileCatalog;
    use crate::layout::page::default_layout_config;
    use crate::models::SourceGame;

    fn assets() -> AssetManifest {
        AssetManifest::bundled(&TileCatalog::standard())
    }

    fn header() -> SheetHeader {
        SheetHeader {
            quest_number: 12,
            title: "The Final Stand".to_string(),
        }
    }

    /// Up to 18 tiles named like generated ones: Black Plague 1–9, then Green Hoard 12–20.
    fn make_tiles(n: usize) -> Vec<QuestTile> {
        (0..n)
            .map(|i| {
                let (number, game) = if i < 9 {
                    (i + 1, SourceGame::BlackPlague)
                } else {
                    (i + 3, SourceGame::GreenHoard)
                };
                let mut tile = QuestTile::new(format!("{number}R\n{}", game.code()), game);
                tile.order_index = i as i32;
                tile.rotation = (i as i32 * 90) % 360;
                tile
            })
            .collect()
    }

    fn tile_counts(layout: &SheetLayout) -> Vec<usize> {
        layout.pages.iter().map(|p| p.tiles().count()).collect()
    }

    #[test]
    fn test_orientation_lookup() {
        assert_eq!(orientation_for(0), Orientation::Up);
        assert_eq!(orientation_for(90), Orientation::Right);
        assert_eq!(orientation_for(180), Orientation::Down);
        assert_eq!(orientation_for(270), Orientation::Left);
        assert_eq!(orientation_for(450), Orientation::Right);
        assert_eq!(orientation_for(360), Orientation::Up);
        assert_eq!(orientation_for(45), Orientation::Up);
        assert_eq!(orientation_for(-90), Orientation::Up);
        assert_eq!(orientation_for(-270), Orientation::Up);
    }

    #[test]
    fn test_twelve_tiles_compact_split_nine_and_three() {
        let config = default_layout_config();
        let layout = compose(
            &["story".to_string()],
            &make_tiles(12),
            &header(),
            LayoutVariant::Compact,
            &config,
            &assets(),
        );
        assert_eq!(layout.pages.len(), 2);
        assert_eq!(tile_counts(&layout), vec![9, 3]);
    }

    #[test]
    fn test_twelve_tiles_centered_start_on_second_page() {
        let config = default_layout_config();
        let layout = compose(
            &["a".to_string(), "b".to_string(), "c".to_string()],
            &make_tiles(12),
            &header(),
            LayoutVariant::Centered,
            &config,
            &assets(),
        );
        assert_eq!(tile_counts(&layout), vec![0, 9, 3]);
        assert_eq!(layout.unplaced_columns, vec!["c".to_string()]);
    }

    #[test]
    fn test_overflow_page_restarts_grid_at_first_slot() {
        let config = default_layout_config();
        let layout = compose(
            &[],
            &make_tiles(10),
            &header(),
            LayoutVariant::Compact,
            &config,
            &assets(),
        );
        let first = layout.pages[0].tiles().next().cloned();
        let tenth = layout.pages[1].tiles().next().cloned();
        match (first, tenth) {
            (Some(DrawCommand::Tile { rect: a, .. }), Some(DrawCommand::Tile { rect: b, .. })) => {
                assert_eq!(a.x, b.x);
                assert_eq!(a.y, b.y);
            }
            other => panic!("expected tile commands, got {other:?}"),
        }
    }

    #[test]
    fn test_compact_grid_positions() {
        let config = default_layout_config();
        let layout = compose(
            &[],
            &make_tiles(4),
            &header(),
            LayoutVariant::Compact,
            &config,
            &assets(),
        );
        let rects: Vec<Rect> = layout.pages[0]
            .tiles()
            .filter_map(|c| match c {
                DrawCommand::Tile { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        // 4 tiles → 2 rows → grid top at 792 - 240 - 60 = 492.
        assert_eq!(rects[0], Rect::new(50.0, 492.0, 120.0, 120.0));
        assert_eq!(rects[2], Rect::new(290.0, 492.0, 120.0, 120.0));
        assert_eq!(rects[3], Rect::new(50.0, 612.0, 120.0, 120.0));
    }

    #[test]
    fn test_centered_grid_is_centered() {
        let config = default_layout_config();
        let layout = compose(
            &[],
            &make_tiles(9),
            &header(),
            LayoutVariant::Centered,
            &config,
            &assets(),
        );
        let first = layout.pages[1].tiles().next().cloned();
        match first {
            Some(DrawCommand::Tile { rect, .. }) => {
                assert_eq!(rect.x, (612.0 - 450.0) / 2.0);
                assert_eq!(rect.y, (792.0 - 450.0) / 2.0);
                assert_eq!(rect.width, 150.0);
            }
            other => panic!("expected a tile, got {other:?}"),
        }
    }

    #[test]
    fn test_tile_rotation_is_applied() {
        let config = default_layout_config();
        let mut tiles = make_tiles(1);
        tiles[0].rotation = 450;
        let layout = compose(
            &[],
            &tiles,
            &header(),
            LayoutVariant::Compact,
            &config,
            &assets(),
        );
        let first = layout.pages[0].tiles().next().cloned();
        match first {
            Some(DrawCommand::Tile { orientation, .. }) => {
                assert_eq!(orientation, Orientation::Right)
            }
            other => panic!("expected a tile, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_tile_image_is_skipped_but_keeps_its_slot() {
        let config = default_layout_config();
        let mut tiles = make_tiles(10);
        tiles[9].name = "99R\nGH".to_string(); // not in the manifest
        let layout = compose(
            &[],
            &tiles,
            &header(),
            LayoutVariant::Compact,
            &config,
            &assets(),
        );
        // The page break at index 9 still happens; the page has no tile on it.
        assert_eq!(tile_counts(&layout), vec![9, 0]);
    }

    #[test]
    fn test_header_and_columns_on_first_page() {
        let config = default_layout_config();
        let layout = compose(
            &["left".to_string(), "right".to_string()],
            &[],
            &header(),
            LayoutVariant::Compact,
            &config,
            &assets(),
        );
        let page = &layout.pages[0];
        assert!(matches!(page.commands[0], DrawCommand::Background { .. }));
        assert!(page.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, style: TextStyle::QuestHeading, .. } if text == "Quest 12:"
        )));
        assert!(page.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, style: TextStyle::Title, .. } if text == "The Final Stand"
        )));
        let blocks: Vec<(&str, Rect)> = page
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::TextBlock { text, rect, .. } => Some((text.as_str(), *rect)),
                _ => None,
            })
            .collect();
        assert_eq!(blocks[0], ("left", Rect::new(50.0, 170.0, 250.0, 550.0)));
        assert_eq!(blocks[1], ("right", Rect::new(310.0, 53.0, 250.0, 670.0)));
        assert!(layout.unplaced_columns.is_empty());

        let heading_font = page.commands.iter().find_map(|c| match c {
            DrawCommand::Text { style: TextStyle::QuestHeading, font, .. } => Some(font.clone()),
            _ => None,
        });
        assert_eq!(
            heading_font,
            Some(TextFont {
                family: FontFamily::SystemBold,
                size_pt: 30.0,
                color: "blue".to_string(),
            })
        );
        let body_font = page.commands.iter().find_map(|c| match c {
            DrawCommand::TextBlock { font, .. } => Some(font.size_pt),
            _ => None,
        });
        assert_eq!(body_font, Some(14.0));
    }

    #[test]
    fn test_missing_decorations_do_not_block_layout() {
        let config = default_layout_config();
        let assets = AssetManifest::new(["1RBP"]);
        let layout = compose(
            &[],
            &make_tiles(1),
            &header(),
            LayoutVariant::Centered,
            &config,
            &assets,
        );
        assert_eq!(tile_counts(&layout), vec![0, 1]);
        assert!(!layout.pages[1]
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Image { .. } | DrawCommand::Background { .. })));
    }

    #[test]
    fn test_variant_for_column_count() {
        assert_eq!(LayoutVariant::for_column_count(0), LayoutVariant::Compact);
        assert_eq!(LayoutVariant::for_column_count(2), LayoutVariant::Compact);
        assert_eq!(LayoutVariant::for_column_count(3), LayoutVariant::Centered);
    }

    #[test]
    fn test_grid_rows_caps_at_three() {
        assert_eq!(grid_rows(0), 0);
        assert_eq!(grid_rows(1), 1);
        assert_eq!(grid_rows(4), 2);
        assert_eq!(grid_rows(9), 3);
        assert_eq!(grid_rows(30), 3);
    }
}
