//! HTTP API for card prices, card info and search

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use mtg_common::Price;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::catalog::CardRecord;
use crate::error::Error;
use crate::service::{PriceService, RichInfo};

/// `?cardName=` query parameter
#[derive(Deserialize)]
struct CardParams {
    #[serde(rename = "cardName", default)]
    card_name: String,
}

/// Search query parameters
#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    100
}

/// Not-found errors are the client's problem, everything else is ours
fn error_status(name: &str, err: &Error) -> StatusCode {
    if err.is_not_found() {
        log::warn!("Card lookup failed ({}): {}", name, err);
        StatusCode::NOT_FOUND
    } else {
        log::error!("Card lookup error ({}): {}", name, err);
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// GET /api/price?cardName={name}
async fn price_handler(
    State(service): State<Arc<PriceService>>,
    Query(params): Query<CardParams>,
) -> Result<Json<Price>, StatusCode> {
    service
        .price_for_card(&params.card_name)
        .await
        .map(Json)
        .map_err(|e| error_status(&params.card_name, &e))
}

/// GET /api/info?cardName={name}
async fn info_handler(
    State(service): State<Arc<PriceService>>,
    Query(params): Query<CardParams>,
) -> Result<Json<RichInfo>, StatusCode> {
    service
        .rich_info(&params.card_name)
        .await
        .map(Json)
        .map_err(|e| error_status(&params.card_name, &e))
}

/// GET /api/search?q={query}&limit={limit}
async fn search_handler(
    State(service): State<Arc<PriceService>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<CardRecord>> {
    let results: Vec<CardRecord> = service
        .search(&params.q)
        .into_iter()
        .take(params.limit)
        .cloned()
        .collect();
    log::debug!("Search {:?}: {} results", params.q, results.len());
    Json(results)
}

/// Build the web server router. `static_dir`, if given, is served for every other path.
pub fn create_router(service: Arc<PriceService>, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api/price", get(price_handler))
        .route("/api/info", get(info_handler))
        .route("/api/search", get(search_handler))
        .with_state(service);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Start the web server and run until Ctrl-C or SIGTERM
pub async fn serve(
    service: Arc<PriceService>,
    static_dir: Option<&Path>,
    port: u16,
) -> std::io::Result<()> {
    let app = create_router(service, static_dir);
    let addr = format!("0.0.0.0:{}", port);

    log::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Shutting down...");
}
