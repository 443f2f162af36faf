//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! The router has two halves:
//!
//! - the price proxies, open to any origin (`Access-Control-Allow-Origin: *`
//!   is set by the handlers themselves);
//! - the wallet application API, behind a CORS layer restricted to
//!   [`ServerConfig::allowed_origins`].

// region: --- Imports
use crate::handlers;
use crate::middleware::{log_requests, map_res, stamp_req, RequestStamp, REQUEST_ID_HEADER};
use axum::{
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use lib_core::{create_pool, Config, DAppDirectory, SqliteKvStore, WalletStore};
use lib_market::MarketClient;
use lib_utils::envs::get_env_or;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub wallet: Arc<WalletStore>,
    pub dapps: Arc<DAppDirectory>,
    pub market: Arc<MarketClient>,
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<WalletStore> {
    fn from_ref(state: &AppState) -> Self {
        state.wallet.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<DAppDirectory> {
    fn from_ref(state: &AppState) -> Self {
        state.dapps.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<MarketClient> {
    fn from_ref(state: &AppState) -> Self {
        state.market.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3001";

/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3001")
    pub bind_address: String,
    /// Origins allowed to call the wallet API
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read `BIND_ADDRESS` and `ALLOWED_ORIGINS` (comma separated), falling
    /// back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let allowed_origins = match get_env_or("ALLOWED_ORIGINS", "") {
            list if list.trim().is_empty() => defaults.allowed_origins,
            list => list
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
        };

        Self {
            bind_address: get_env_or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            allowed_origins,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Install the global tracing subscriber. `LOG_LEVEL` accepts a level or any
/// `EnvFilter` directive; unparseable values fall back to `info`.
pub fn init_tracing() -> anyhow::Result<()> {
    let log_level = get_env_or("LOG_LEVEL", "info").to_lowercase();
    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    info!(" Log level: {}", log_level);
    Ok(())
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - The database cannot be opened
/// - The HTTP client cannot be built
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    init_tracing()?;
    info!(" HOW WALLET BACKEND STARTING");

    info!("Loading configuration...");
    let app_config = Config::load().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;
    info!("Configuration: {:?}", app_config);

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;
    let kv = SqliteKvStore::new(pool).await?;

    let wallet = Arc::new(WalletStore::open(Arc::new(kv), &app_config).await);
    match wallet.snapshot().current_wallet {
        Some(w) => info!(" Wallet restored: {} ({})", w.name, w.network),
        None => info!(" No wallet yet"),
    }

    let market = Arc::new(MarketClient::from_config(&app_config)?);
    if !market.has_birdeye_key() {
        warn!("BIRDEYE_API_KEY is not set; /api/price will answer 500");
    }

    let state = AppState {
        dapps: Arc::new(DAppDirectory::new(app_config.dapp_delay())),
        config: app_config,
        wallet,
        market,
    };

    let app = create_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)]);

    let proxy_routes = Router::new()
        .route("/api/price", get(handlers::proxy::birdeye_price))
        .route("/api/market-chart", get(handlers::proxy::market_chart));

    let api_routes = Router::new()
        .route(
            "/api/wallet",
            get(handlers::wallet::get_wallet).delete(handlers::wallet::reset_wallet),
        )
        .route("/api/wallet/create", post(handlers::wallet::create_wallet))
        .route("/api/wallet/import", post(handlers::wallet::import_wallet))
        .route("/api/wallet/select", post(handlers::wallet::select_wallet))
        .route("/api/wallet/network", post(handlers::wallet::change_network))
        .route("/api/wallet/send", post(handlers::wallet::send_token))
        .route("/api/wallet/prices/refresh", post(handlers::wallet::refresh_prices))
        .route("/api/transactions", get(handlers::transactions::list_transactions))
        .route("/api/dapps", get(handlers::dapps::list_dapps))
        .layer(cors);

    Router::new()
        .merge(proxy_routes)
        .merge(api_routes)
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Route not found" })),
            )
        })
        .with_state(state)
        .layer(axum::middleware::from_fn(map_res))
        .layer(axum::middleware::from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                },
            ),
        )
        // Outermost, so every inner layer sees the stamp.
        .layer(axum::middleware::from_fn(stamp_req))
}

/// Log server information
fn log_server_info() {
    info!(" PRICE PROXIES:");
    info!("   • GET    /api/price?address={{mint}}");
    info!("   • GET    /api/market-chart?tokenId={{id}}&days={{n}}");
    info!(" WALLET:");
    info!("   • GET    /api/wallet");
    info!("   • POST   /api/wallet/create | import | select | network | send");
    info!("   • POST   /api/wallet/prices/refresh");
    info!("   • DELETE /api/wallet");
    info!(" ACTIVITY:");
    info!("   • GET    /api/transactions?type={{kind}}");
    info!("   • GET    /api/dapps?category={{name}}");
    info!(" HEALTH:");
    info!("   • GET    /health");
}
// endregion: --- Server Setup
