use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod handlers;

/// Process-wide server settings, fixed at startup.
#[derive(Debug, Clone)]
struct ServerConfig {
    addr: String,
    /// Upper bound on the request body; uploads are held in memory.
    max_upload_bytes: usize,
}

impl ServerConfig {
    fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3001);
        Self {
            addr: format!("0.0.0.0:{port}"),
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

fn router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/processImage", post(handlers::process_image))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    let app = router(&config);

    log::info!("🚀 imagefx server running on http://{}", config.addr);
    log::info!("📖 API endpoints:");
    log::info!("   POST /processImage - Apply a named transformation to an uploaded image");
    log::info!("   GET  /health - Health check");

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

async fn root() -> String {
    let ops: Vec<&str> = imagefx_core::Operation::ALL
        .iter()
        .map(|op| op.as_str())
        .collect();
    format!(
        "imagefx server v{}\n\nPOST /processImage (multipart: image, operation)\n\nOperations:\n  {}\n",
        env!("CARGO_PKG_VERSION"),
        ops.join("\n  ")
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
