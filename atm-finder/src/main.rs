use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use atm_finder::catalog::{
    CatalogConfig, CsvFileDataset, DEFAULT_REFRESH_HOUR, FileCatalogStore, StationCatalog,
    download_dataset,
};
use atm_finder::recommend::{EngineConfig, RecommendationEngine};
use atm_finder::web::{AppState, create_router};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let dataset_path = PathBuf::from(env_or("ATM_DATASET_PATH", "cajeros-automaticos.csv"));
    let store_dir = PathBuf::from(env_or("ATM_STORE_DIR", "catalogs"));

    // Fetch the dataset once if we have nowhere else to get it
    if let Ok(url) = std::env::var("ATM_DATASET_URL")
        && !dataset_path.exists()
    {
        info!(%url, path = %dataset_path.display(), "downloading dataset");
        let bytes = download_dataset(&url, &dataset_path)
            .await
            .expect("Failed to download dataset");
        info!(bytes, "dataset downloaded");
    }

    let mut catalog_config = CatalogConfig::default();
    if let Ok(locality) = std::env::var("ATM_LOCALITY") {
        catalog_config = catalog_config.with_locality(locality);
    }
    if let Ok(hour) = std::env::var("ATM_REFRESH_HOUR") {
        match hour.parse::<u32>() {
            Ok(h) if h < 24 => catalog_config = catalog_config.with_refresh_hour(h),
            _ => warn!(%hour, default = DEFAULT_REFRESH_HOUR, "ignoring invalid ATM_REFRESH_HOUR"),
        }
    }

    info!(
        dataset = %dataset_path.display(),
        store = %store_dir.display(),
        locality = %catalog_config.locality,
        refresh_hour = catalog_config.refresh_hour,
        "starting"
    );

    let catalog = StationCatalog::new(
        FileCatalogStore::new(store_dir),
        CsvFileDataset::new(dataset_path),
        catalog_config,
    );
    let engine = RecommendationEngine::new(catalog, EngineConfig::default())
        .expect("Invalid engine configuration");

    let state = AppState::new(engine);
    let app = create_router(state);

    let addr: SocketAddr = env_or("ATM_LISTEN_ADDR", "127.0.0.1:3000")
        .parse()
        .expect("Invalid ATM_LISTEN_ADDR");
    info!(%addr, "listening");
    info!("  GET    /health                  - Health check");
    info!("  GET    /networks                - Supported networks");
    info!("  PUT    /sessions/:id/location   - Share location");
    info!("  DELETE /sessions/:id            - End session");
    info!("  POST   /sessions/:id/recommend  - Recommend stations");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
