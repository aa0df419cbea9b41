use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aaitek_edge::{router, AppState, Config};

#[tokio::main]
async fn main() {
    let config = Config::from_env().expect("Failed to load configuration");

    // JSON logs in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("aaitek_edge=info,tower_http=info"));

    if config.is_dev {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    }

    info!("🚀 aaitek-edge starting...");
    info!(cms = %config.cms_url, site = %config.site_url, "📝 Configuration loaded");

    if config.prerender_token.is_some() {
        info!("🕷️  Prerender service enabled for crawlers");
    }
    if config.resend_api_key.is_none() {
        tracing::warn!("RESEND_API_KEY not set, contact notifications disabled");
    }
    if config.allowed_origins.is_empty() {
        info!("🔓 CORS: any origin");
    } else {
        info!(origins = ?config.allowed_origins, "🔒 CORS: restricted origins");
    }

    let state = AppState::from_config(&config).expect("Failed to build HTTP client");

    if state.cms.is_healthy().await {
        info!("✅ CMS reachable");
    } else {
        tracing::warn!("CMS health check failed at startup; serving fallbacks until it recovers");
    }

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = router(state, &config.allowed_origins)
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        .layer(prometheus_layer);

    let addr = config.server_addr();
    info!("🎧 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
