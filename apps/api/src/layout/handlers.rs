//! Axum route handlers for the Layout API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::composer::LayoutVariant;
use crate::layout::font_metrics::{FontFamily, FontMetrics};
use crate::layout::paginator::split_text_into_columns;
use crate::state::AppState;

/// Flyer text is a few paragraphs; longer bodies are rejected.
const MAX_TEXT_BYTES: usize = 16 * 1024;
const MIN_COLUMN_WIDTH: f32 = 1.0;
/// Ten letter pages; no sheet column comes close.
const MAX_LENGTH_PT: f32 = 7920.0;

#[derive(Debug, Deserialize)]
pub struct ColumnsRequest {
    pub text: String,
    pub max_height: f32,
    pub column_width: Option<f32>,
    pub second_column_slack: Option<f32>,
    pub font: Option<String>,
    pub font_size_pt: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct ColumnsResponse {
    pub columns: Vec<String>,
    /// The sheet variant this column count would select.
    pub variant: LayoutVariant,
}

/// POST /api/v1/layout/columns
///
/// Paginates arbitrary text with the sheet's defaults for anything not given.
pub async fn handle_split_columns(
    State(state): State<AppState>,
    Json(request): Json<ColumnsRequest>,
) -> Result<Json<ColumnsResponse>, AppError> {
    let defaults = &state.layout_config;
    let column_width = request.column_width.unwrap_or(defaults.column_width);
    let font_size = request.font_size_pt.unwrap_or(defaults.body_font_size_pt);

    let slack = request
        .second_column_slack
        .unwrap_or(defaults.second_column_slack);
    validate_columns_request(&request.text, column_width, request.max_height, font_size, slack)?;

    let family = request
        .font
        .as_deref()
        .map(FontFamily::resolve)
        .unwrap_or(defaults.body_font);
    let metrics = FontMetrics::new(family, font_size);

    let columns = split_text_into_columns(
        &request.text,
        &metrics,
        column_width,
        request.max_height,
        slack,
    );
    let variant = LayoutVariant::for_column_count(columns.len());

    Ok(Json(ColumnsResponse { columns, variant }))
}

fn validate_columns_request(
    text: &str,
    column_width: f32,
    max_height: f32,
    font_size: f32,
    slack: f32,
) -> Result<(), AppError> {
    if text.len() > MAX_TEXT_BYTES {
        return Err(AppError::Validation(format!(
            "text is {} bytes, at most {MAX_TEXT_BYTES} are accepted",
            text.len()
        )));
    }
    let in_range = |value: f32, min: f32| value.is_finite() && value >= min && value <= MAX_LENGTH_PT;
    if !in_range(column_width, MIN_COLUMN_WIDTH) {
        return Err(AppError::Validation(format!(
            "column_width must be between {MIN_COLUMN_WIDTH} and {MAX_LENGTH_PT}"
        )));
    }
    if !in_range(max_height, f32::MIN_POSITIVE) || !in_range(font_size, f32::MIN_POSITIVE) {
        return Err(AppError::Validation(format!(
            "max_height and font_size_pt must be positive and at most {MAX_LENGTH_PT}"
        )));
    }
    if !in_range(slack, 0.0) {
        return Err(AppError::Validation(format!(
            "second_column_slack must be between 0 and {MAX_LENGTH_PT}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_sheet_defaults() {
        assert!(validate_columns_request("Find the keys", 250.0, 450.0, 14.0, 120.0).is_ok());
    }

    #[test]
    fn test_rejects_sub_point_column_width() {
        assert!(matches!(
            validate_columns_request("alpha beta", 1e-9, 400.0, 14.0, 120.0),
            Err(AppError::Validation(_))
        ));
        assert!(validate_columns_request("alpha", f32::NAN, 400.0, 14.0, 120.0).is_err());
    }

    #[test]
    fn test_rejects_oversized_text_and_height() {
        let text = "horde ".repeat(MAX_TEXT_BYTES);
        assert!(validate_columns_request(&text, 250.0, 400.0, 14.0, 120.0).is_err());
        assert!(validate_columns_request("a", 250.0, 1.0e9, 14.0, 120.0).is_err());
        assert!(validate_columns_request("a", 250.0, 400.0, 14.0, -1.0).is_err());
    }
}
