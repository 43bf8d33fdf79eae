use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::generate_board;
use crate::errors::AppError;
use crate::models::{QuestTile, SourceGame, DEFAULT_TITLE};
use crate::quests::store::require_document;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Comma-separated game codes or names, e.g. `BP,GH`.
    pub games: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub tiles: Vec<QuestTile>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateBoardRequest {
    pub board_size: usize,
    pub games: Vec<SourceGame>,
    /// Existing document to put the board on. A new "Untitled" one otherwise.
    pub document_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct GenerateBoardResponse {
    pub document_id: Uuid,
    pub tiles: Vec<QuestTile>,
}

fn parse_games(raw: &str) -> Result<Vec<SourceGame>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<SourceGame>()
                .map_err(|e| AppError::Validation(e.to_string()))
        })
        .collect()
}

/// GET /api/v1/catalog
pub async fn handle_get_catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> Result<Json<CatalogResponse>, AppError> {
    let tiles = match params.games.as_deref() {
        Some(raw) => state.catalog.filtered(&parse_games(raw)?),
        None => state.catalog.tiles().to_vec(),
    };
    Ok(Json(CatalogResponse { tiles }))
}

/// POST /api/v1/boards
///
/// Generates a random board and saves it as the document's tile map.
pub async fn handle_generate_board(
    State(state): State<AppState>,
    Json(req): Json<GenerateBoardRequest>,
) -> Result<(StatusCode, Json<GenerateBoardResponse>), AppError> {
    if req.board_size == 0 {
        return Err(AppError::Validation(
            "board_size must be at least 1".to_string(),
        ));
    }
    if req.games.is_empty() {
        return Err(AppError::Validation(
            "select at least one game".to_string(),
        ));
    }

    // ThreadRng is !Send; drop it before the first await.
    let tiles = {
        let mut rng = rand::thread_rng();
        generate_board(&state.catalog, req.board_size, &req.games, &mut rng)
    };

    let document_id = match req.document_id {
        Some(id) => require_document(state.store.as_ref(), id).await?.id,
        None => state.store.create(DEFAULT_TITLE).await?.id,
    };

    let document = state.store.replace_tiles(document_id, tiles).await?;

    Ok((
        StatusCode::CREATED,
        Json(GenerateBoardResponse {
            document_id: document.id,
            tiles: document.tiles,
        }),
    ))
}
