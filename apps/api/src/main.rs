mod catalog;
mod config;
mod db;
mod errors;
mod layout;
mod models;
mod quests;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::TileCatalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::layout::{default_layout_config, AssetManifest, FontFamily};
use crate::quests::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Quest API v{}", env!("CARGO_PKG_VERSION"));

    // Postgres when configured, otherwise documents live for the process lifetime
    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => Arc::new(PgDocumentStore::new(create_pool(url).await?)),
        None => {
            info!("DATABASE_URL not set, using the in-memory document store");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    let catalog = TileCatalog::standard();
    info!("Tile catalog loaded: {} tiles", catalog.tiles().len());

    let assets = match &config.asset_dir {
        Some(dir) => AssetManifest::from_dir(dir)
            .with_context(|| format!("Failed to read assets from {}", dir.display()))?,
        None => AssetManifest::bundled(&catalog),
    };
    if assets.is_empty() {
        warn!("Asset manifest is empty, sheets will be drawn without images");
    } else {
        info!("Asset manifest: {} images", assets.len());
    }

    let mut layout_config = default_layout_config();
    layout_config.second_column_slack = config.second_column_slack;
    layout_config.body_font = FontFamily::resolve(&config.body_font);
    info!(
        "Layout config: {:?} {}pt, {}pt columns",
        layout_config.body_font, layout_config.body_font_size_pt, layout_config.column_width
    );

    let state = AppState {
        store,
        catalog: Arc::new(catalog),
        assets: Arc::new(assets),
        layout_config,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
