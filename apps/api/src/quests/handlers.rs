use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::{build_sheet, Sheet, SheetRequest};
use crate::models::{QuestDocument, QuestTile, DEFAULT_TITLE};
use crate::quests::store::{
    not_found, require_document, validate_tiles, validate_title, QuestUpdate,
};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateQuestRequest {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceTilesRequest {
    pub tiles: Vec<QuestTile>,
}

/// POST /api/v1/quests
pub async fn handle_create_quest(
    State(state): State<AppState>,
    Json(req): Json<CreateQuestRequest>,
) -> Result<(StatusCode, Json<QuestDocument>), AppError> {
    let title = req.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
    validate_title(&title)?;
    let document = state.store.create(&title).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/v1/quests
pub async fn handle_list_quests(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuestDocument>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// GET /api/v1/quests/:id
pub async fn handle_get_quest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuestDocument>, AppError> {
    let document = require_document(state.store.as_ref(), id).await?;
    Ok(Json(document))
}

/// PUT /api/v1/quests/:id
pub async fn handle_update_quest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<QuestUpdate>,
) -> Result<Json<QuestDocument>, AppError> {
    validate_title(&update.title)?;
    let document = state.store.update_quest(id, &update).await?;
    Ok(Json(document))
}

/// PUT /api/v1/quests/:id/tiles
pub async fn handle_replace_tiles(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReplaceTilesRequest>,
) -> Result<Json<QuestDocument>, AppError> {
    validate_tiles(&req.tiles)?;
    let document = state.store.replace_tiles(id, req.tiles).await?;
    Ok(Json(document))
}

/// POST /api/v1/quests/:id/tiles/:order_index/rotate
///
/// Turns one placed tile a quarter clockwise.
pub async fn handle_rotate_tile(
    State(state): State<AppState>,
    Path((id, order_index)): Path<(Uuid, i32)>,
) -> Result<Json<QuestDocument>, AppError> {
    let document = state.store.rotate_tile(id, order_index).await?;
    Ok(Json(document))
}

/// DELETE /api/v1/quests/:id
pub async fn handle_delete_quest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/quests/:id/sheet
///
/// Paginates the quest text, composes the pages and records the page count.
pub async fn handle_build_sheet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SheetRequest>,
) -> Result<Json<Sheet>, AppError> {
    let document = require_document(state.store.as_ref(), id).await?;
    let metrics = state.layout_config.body_metrics();

    let sheet = build_sheet(
        &document,
        &req,
        &state.layout_config,
        &metrics,
        &state.assets,
    );

    let page_count = i32::try_from(sheet.page_count())
        .map_err(|_| AppError::Internal(anyhow::anyhow!("page count out of range")))?;
    state.store.set_page_count(id, page_count).await?;

    Ok(Json(sheet))
}
