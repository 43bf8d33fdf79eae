//! Static font metrics used to measure wrapped text on the quest sheet.
//!
//! Character widths are in em units (relative to font size) and approximate the
//! platform system font. Other families are expressed as a width scale over the
//! system table; this is close enough for column breaking, where a line more or
//! less only shifts a break by one word.
//! The table covers ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};
use tracing::warn;

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// Fonts the sheet can be laid out with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Platform sans-serif, used for column text.
    System,
    /// Bold system face, used for the title and quest heading.
    SystemBold,
    /// Body face of the app chrome.
    Andalus,
    /// Condensed display face of the app chrome.
    Algo,
}

impl FontFamily {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "system" => Some(FontFamily::System),
            "system_bold" | "system-bold" => Some(FontFamily::SystemBold),
            "andalus" => Some(FontFamily::Andalus),
            "algo" | "algofyw01-regular" => Some(FontFamily::Algo),
            _ => None,
        }
    }

    /// Resolves a configured font name, falling back to the system font when
    /// the name is unknown.
    pub fn resolve(name: &str) -> Self {
        FontFamily::from_name(name).unwrap_or_else(|| {
            warn!("Font '{name}' is not available, falling back to the system font");
            FontFamily::System
        })
    }

    /// Width relative to the system font.
    fn width_scale(self) -> f32 {
        match self {
            FontFamily::System => 1.0,
            FontFamily::SystemBold => 1.06,
            FontFamily::Andalus => 0.92,
            FontFamily::Algo => 0.80,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Measurement port
// ────────────────────────────────────────────────────────────────────────────

/// Measures how tall a block of text renders when wrapped at a given width.
///
/// Implemented by `FontMetrics`; tests substitute simpler measures.
pub trait TextMeasure {
    /// Bounding-box height in points of `text` wrapped at `width` points.
    fn bounding_height(&self, text: &str, width: f32) -> f32;
}

// ────────────────────────────────────────────────────────────────────────────
// Width table
// ────────────────────────────────────────────────────────────────────────────

/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
#[rustfmt::skip]
static SYSTEM_WIDTHS: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.27, 0.28, 0.37, 0.60, 0.58, 0.87, 0.71, 0.21, 0.34, 0.34, 0.46, 0.60, 0.26, 0.41, 0.26, 0.39,
    // 0     1     2     3     4     5     6     7     8     9
    0.60, 0.42, 0.57, 0.59, 0.61, 0.58, 0.59, 0.54, 0.59, 0.59,
    // :     ;     <     =     >     ?     @
    0.26, 0.26, 0.60, 0.60, 0.60, 0.48, 0.93,
    // A     B     C     D     E     F     G     H     I     J     K     L     M
    0.67, 0.64, 0.71, 0.71, 0.58, 0.55, 0.73, 0.74, 0.26, 0.53, 0.66, 0.54, 0.87,
    // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
    0.74, 0.76, 0.62, 0.76, 0.64, 0.62, 0.62, 0.73, 0.67, 0.95, 0.66, 0.64, 0.62,
    // [     \     ]     ^     _     `
    0.34, 0.39, 0.34, 0.60, 0.50, 0.50,
    // a     b     c     d     e     f     g     h     i     j     k     l     m
    0.53, 0.58, 0.52, 0.58, 0.55, 0.33, 0.58, 0.56, 0.24, 0.24, 0.52, 0.24, 0.86,
    // n     o     p     q     r     s     t     u     v     w     x     y     z
    0.56, 0.57, 0.58, 0.58, 0.35, 0.48, 0.34, 0.56, 0.51, 0.76, 0.50, 0.51, 0.49,
    // {     |     }     ~
    0.34, 0.25, 0.34, 0.60,
];

/// Fallback width for non-ASCII characters (codepoints > 0x7E).
const AVERAGE_CHAR_WIDTH: f32 = 0.53;

/// Line height as a multiple of the point size (font ascender + descender + leading).
pub const DEFAULT_LINE_HEIGHT_FACTOR: f32 = 1.2;

// ────────────────────────────────────────────────────────────────────────────
// Font metrics
// ────────────────────────────────────────────────────────────────────────────

/// A font family at a point size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub family: FontFamily,
    pub size_pt: f32,
    pub line_height_factor: f32,
}

impl FontMetrics {
    pub fn new(family: FontFamily, size_pt: f32) -> Self {
        Self {
            family,
            size_pt,
            line_height_factor: DEFAULT_LINE_HEIGHT_FACTOR,
        }
    }

    /// Rendered width of a single-line string, in points.
    pub fn measure_str(&self, s: &str) -> f32 {
        let em: f32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    SYSTEM_WIDTHS[code - 32]
                } else {
                    AVERAGE_CHAR_WIDTH
                }
            })
            .sum();
        em * self.family.width_scale() * self.size_pt
    }

    pub fn line_height(&self) -> f32 {
        self.size_pt * self.line_height_factor
    }

    /// Number of printed lines `text` occupies when wrapped at `width` points.
    ///
    /// Every `\n` starts a new line; an empty line still takes one line. Words
    /// are greedily packed; a word wider than the column is broken across
    /// `ceil(word_width / width)` lines.
    pub fn line_count(&self, text: &str, width: f32) -> u32 {
        if text.is_empty() {
            return 0;
        }
        text.split('\n')
            .map(|line| self.wrapped_lines(line, width))
            .fold(0u32, u32::saturating_add)
    }

    fn wrapped_lines(&self, line: &str, width: f32) -> u32 {
        let words: Vec<&str> = line.split(' ').filter(|w| !w.is_empty()).collect();
        if words.is_empty() {
            return 1;
        }
        if width <= 0.0 {
            return words.len() as u32;
        }

        let space_w = self.measure_str(" ");
        let mut lines = 1u32;
        let mut current_width = 0.0_f32;
        let mut first_on_line = true;

        for word in words {
            let word_w = self.measure_str(word);

            if word_w > width {
                // Character-wrapped word: starts on a fresh line, spills over.
                if !first_on_line {
                    lines = lines.saturating_add(1);
                }
                // `as` saturates, so a vanishing width yields u32::MAX spans.
                let spans = ((word_w / width).ceil() as u32).max(1);
                lines = lines.saturating_add(spans - 1);
                current_width = word_w - (spans - 1) as f32 * width;
                first_on_line = false;
                continue;
            }

            let gap = if first_on_line { 0.0 } else { space_w };
            if !first_on_line && current_width + gap + word_w > width {
                lines = lines.saturating_add(1);
                current_width = word_w;
            } else {
                current_width += gap + word_w;
                first_on_line = false;
            }
        }
        lines
    }
}

impl TextMeasure for FontMetrics {
    fn bounding_height(&self, text: &str, width: f32) -> f32 {
        self.line_count(text, width) as f32 * self.line_height()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
