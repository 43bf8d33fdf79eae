//! Text paginator: splits flyer text into height-bounded columns.
//!
//! Greedy, single pass: words are appended to the open column until the
//! measured height of the candidate would exceed the column's limit, at which
//! point the column is closed and the overflowing word opens the next one.

use crate::layout::font_metrics::TextMeasure;

/// Extra height granted to the second column (index 1), which runs the full
/// height of the right half of the page.
pub const DEFAULT_SECOND_COLUMN_SLACK: f32 = 120.0;

/// Height limit for the column at `column_index`.
pub fn column_height_limit(column_index: usize, max_height: f32, second_column_slack: f32) -> f32 {
    if column_index == 1 {
        max_height + second_column_slack
    } else {
        max_height
    }
}

/// Splits `text` into columns whose wrapped height fits the per-column limit.
///
/// Words are the non-empty pieces between spaces; line breaks stay inside the
/// words and count as hard breaks when measured. A word that alone exceeds the
/// limit occupies a column by itself. Empty input yields no columns.
pub fn split_text_into_columns(
    text: &str,
    measure: &dyn TextMeasure,
    column_width: f32,
    max_height: f32,
    second_column_slack: f32,
) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut column_index = 0usize;

    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        let limit = column_height_limit(column_index, max_height, second_column_slack);
        let height = measure.bounding_height(&candidate, column_width);

        if height > limit && !current.is_empty() {
            columns.push(current.trim_matches(' ').to_string());
            column_index += 1;
            current = word.to_string();
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        columns.push(current.trim_matches(' ').to_string());
    }

    columns
}
