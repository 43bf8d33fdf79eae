//! Page geometry and the layout parameters shared by the paginator and composer.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{FontFamily, FontMetrics};
use crate::layout::paginator::DEFAULT_SECOND_COLUMN_SLACK;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, origin at the top-left, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Layout parameters for a quest sheet.
///
/// Page size is US letter in points (8.5" × 11" at 72pt/in).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Width of each text column.
    pub column_width: f32,
    /// Extra height allowed for the second text column.
    pub second_column_slack: f32,
    pub body_font: FontFamily,
    pub body_font_size_pt: f32,
}

impl LayoutConfig {
    pub fn body_metrics(&self) -> FontMetrics {
        FontMetrics::new(self.body_font, self.body_font_size_pt)
    }
}

/// Letter page, 250pt columns, system font at 14pt.
pub fn default_layout_config() -> LayoutConfig {
    LayoutConfig {
        page_width: 8.5 * 72.0,
        page_height: 11.0 * 72.0,
        column_width: 250.0,
        second_column_slack: DEFAULT_SECOND_COLUMN_SLACK,
        body_font: FontFamily::System,
        body_font_size_pt: 14.0,
    }
}
