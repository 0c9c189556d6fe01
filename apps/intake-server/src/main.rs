//! Intake Server
//!
//! Receives finished intake records from the form page, renders each one to
//! PDF and archives the PDF next to a copy of the submitted JSON.
//!
//! - `POST /api/intake` (also `POST /`): render and archive one record
//! - `GET /health` (also `GET /`): service status

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use intake_render::{DocumentRenderer, RendererConfig};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod storage;
#[cfg(test)]
mod tests;

use api::{handle_health, handle_intake};
use storage::ArchiveFolder;

/// Command-line arguments for the intake server
#[derive(Parser, Debug)]
#[command(name = "intake-server")]
#[command(about = "Renders clinic intake forms to PDF and archives them")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "INTAKE_PORT")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0", env = "INTAKE_HOST")]
    host: String,

    /// Directory the archive folder is created in
    #[arg(long, default_value = ".", env = "INTAKE_ARCHIVE_DIR")]
    archive_dir: PathBuf,

    /// Extra font directory, e.g. one holding Noto Sans TC (repeatable)
    #[arg(long = "font-dir", env = "INTAKE_FONT_DIRS", value_delimiter = ',')]
    font_dirs: Vec<PathBuf>,

    /// Render timeout in milliseconds
    #[arg(long, default_value = "30000")]
    timeout_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub renderer: DocumentRenderer,
    pub archive: Arc<ArchiveFolder>,
    /// Render timeout in milliseconds
    pub timeout_ms: u64,
}

/// All routes, without middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_health).post(handle_intake))
        .route("/health", get(handle_health))
        .route("/api/intake", post(handle_intake))
        .with_state(state)
}

/// Refuse to start when the Chinese text of every PDF would print without glyphs
pub fn ensure_cjk_font(renderer: &DocumentRenderer) -> anyhow::Result<()> {
    if renderer.has_cjk_font() {
        info!(families = ?renderer.cjk_families(), "CJK fonts available");
        return Ok(());
    }

    anyhow::bail!(
        "no Traditional Chinese font found among [{}]; \
         pass --font-dir (or INTAKE_FONT_DIRS) pointing at e.g. Noto Sans TC",
        renderer.font_families().join(", ")
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting intake server on {}:{}", args.host, args.port);

    let renderer = DocumentRenderer::new(&RendererConfig {
        font_dirs: args.font_dirs.clone(),
    });
    ensure_cjk_font(&renderer)?;
    let archive = ArchiveFolder::new(&args.archive_dir);

    let state = AppState {
        renderer,
        archive: Arc::new(archive),
        timeout_ms: args.timeout_ms,
    };

    // The form page is served from elsewhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Archiving into {}", args.archive_dir.display());
    info!("Render timeout: {}ms", args.timeout_ms);

    axum::serve(listener, app).await?;

    Ok(())
}
