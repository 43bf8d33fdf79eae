pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::layout::handlers as layout;
use crate::quests::handlers as quests;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Tile catalog and random boards
        .route("/api/v1/catalog", get(catalog::handle_get_catalog))
        .route("/api/v1/boards", post(catalog::handle_generate_board))
        // Quest documents
        .route(
            "/api/v1/quests",
            get(quests::handle_list_quests).post(quests::handle_create_quest),
        )
        .route(
            "/api/v1/quests/:id",
            get(quests::handle_get_quest)
                .put(quests::handle_update_quest)
                .delete(quests::handle_delete_quest),
        )
        .route("/api/v1/quests/:id/tiles", put(quests::handle_replace_tiles))
        .route(
            "/api/v1/quests/:id/tiles/:order_index/rotate",
            post(quests::handle_rotate_tile),
        )
        .route("/api/v1/quests/:id/sheet", post(quests::handle_build_sheet))
        // Layout
        .route("/api/v1/layout/columns", post(layout::handle_split_columns))
        .with_state(state)
}
