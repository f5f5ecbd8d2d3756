//! MTG Price - card price and rating server
//!
//! Loads the bulk card data, opens the enrichment store and serves the HTTP API.

use clap::Parser;
use mtgprice::sources::{GathererClient, TcgPriceClient, DEFAULT_PRICE_URL, DEFAULT_RATING_URL};
use mtgprice::{CardCatalog, EnrichmentCache, PriceService, SharedStore, SqliteStore};
use std::path::PathBuf;
use std::sync::Arc;

/// MTG card price server - caches TCGplayer prices and Gatherer ratings
#[derive(Parser, Debug)]
#[command(name = "mtgprice")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the SQLite store for fetched prices and ratings
    #[arg(short, long, default_value_t = default_db_path())]
    database: String,

    /// Path to the bulk card data (AllSets JSON)
    #[arg(short, long, default_value = "static/AllSets.json")]
    card_data: PathBuf,

    /// Port for the HTTP server
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Directory served for non-API paths (index page, assets)
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Base URL of the TCGplayer price API
    #[arg(long, default_value = DEFAULT_PRICE_URL)]
    price_url: String,

    /// Base URL of Gatherer
    #[arg(long, default_value = DEFAULT_RATING_URL)]
    rating_url: String,
}

/// Returns the default store path: ~/.local/share/mtgprice/mtgprice.db
fn default_db_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mtgprice")
        .join("mtgprice.db")
        .to_string_lossy()
        .to_string()
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let db_path = PathBuf::from(&args.database);

    log::info!("Starting mtgprice...");

    let catalog = match CardCatalog::load(&args.card_data) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!(
                "Failed to load card data from {}: {}",
                args.card_data.display(),
                e
            );
            std::process::exit(1);
        }
    };

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!("Failed to create store directory: {}", e);
                std::process::exit(1);
            }
            log::info!("Created directory: {}", parent.display());
        }
    }

    let store = match SqliteStore::open(&db_path) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to open store {}: {}", db_path.display(), e);
            std::process::exit(1);
        }
    };

    let cache = EnrichmentCache::new(
        Arc::new(SharedStore::new(store)),
        Arc::new(TcgPriceClient::with_base_url(&args.price_url)),
        Arc::new(GathererClient::with_base_url(&args.rating_url)),
    );
    let service = Arc::new(PriceService::new(Arc::new(catalog), cache));

    // Collect write-back results so failures are counted instead of piling up
    let monitor = Arc::clone(&service);
    tokio::spawn(async move {
        let mut failed = 0usize;
        while let Some(outcome) = monitor.cache().next_write_outcome().await {
            if outcome.result.is_err() {
                failed += 1;
                log::warn!("{} cache write(s) failed so far", failed);
            }
        }
    });

    if let Err(e) = mtgprice::web::serve(service, args.static_dir.as_deref(), args.port).await {
        log::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
