use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use label_verify::app_state::AppState;
use label_verify::config::AppConfig;
use label_verify::routes;

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing label-verify server");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);

    // Register application metrics
    metrics::describe_counter!(
        "label_verifications_total",
        "Total label verifications, by outcome"
    );
    metrics::describe_counter!(
        "label_verification_discrepancies_total",
        "Failed fields across all verifications, by field"
    );
    metrics::describe_histogram!(
        "label_verification_seconds",
        "Time spent in the verification engine per label"
    );
    metrics::describe_counter!(
        "ocr_requests_failed_total",
        "OCR extraction calls that returned an error"
    );

    let state = AppState::from_config(&config);
    if state.ocr.is_configured() {
        tracing::info!(model = %config.ocr_model, "OCR client configured");
    } else {
        tracing::warn!("OCR_API_KEY not set, /api/v1/analyze is disabled");
    }

    tracing::info!(
        fuzzy_match = config.fuzzy_match_threshold,
        abv_tolerance = config.abv_tolerance,
        net_contents_tolerance = config.net_contents_tolerance,
        "Verification thresholds loaded"
    );

    let app = routes::api_router(state)
        // Prometheus metrics endpoint (separate state)
        .route(
            "/metrics",
            get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
