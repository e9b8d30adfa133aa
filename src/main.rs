//! Trend Scout — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the discovery pipeline, shared state,
//! and middleware.

use std::sync::Arc;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use trend_scout::api::{create_router, AppState};
use trend_scout::config::AppConfig;
use trend_scout::gemini::{GeminiClient, TextGenerator};
use trend_scout::metrics::Metrics;
use trend_scout::orchestrator::Orchestrator;
use trend_scout::scout::ProductScout;
use trend_scout::search::{ImageSource, SearchImageSource, SearchProvider, SerperClient};
use trend_scout::verify::LinkVerifier;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - SCOUT_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("SCOUT_DEV_LOG").ok().is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trend_scout=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments. This is what makes
    // GEMINI_API_KEY / SERPER_API_KEY visible to AppConfig.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    enable_dev_tracing();

    let cfg = AppConfig::from_env().expect("Failed to load scout config");

    let metrics = Metrics::init(cfg.verify_timeout.as_millis() as u64);

    let generator: Arc<dyn TextGenerator> = Arc::new(
        GeminiClient::new(&cfg.gemini_api_key, &cfg.model).expect("Failed to build Gemini client"),
    );
    let search: Arc<dyn SearchProvider> = Arc::new(
        SerperClient::new(&cfg.serper_api_key, &cfg.region)
            .expect("Failed to build Serper client"),
    );
    let images: Arc<dyn ImageSource> = Arc::new(SearchImageSource::new(Arc::clone(&search)));
    let verifier = if cfg.verify_links {
        Some(Arc::new(
            LinkVerifier::new(cfg.verify_timeout).expect("Failed to build link verifier"),
        ))
    } else {
        None
    };

    let scout = Arc::new(ProductScout::new(
        Arc::clone(&generator),
        Arc::clone(&search),
    ));
    let orchestrator = Arc::new(Orchestrator::new(
        generator,
        Arc::clone(&scout),
        images,
        verifier,
        cfg.category_count,
        cfg.article_count,
    ));

    // One-off smoke test of the generation client; logs, never panics.
    if let Err(e) = trend_scout::run_ai_quick_probe().await {
        tracing::warn!(error = ?e, "AI quick probe didn't run");
    }

    let state = AppState {
        orchestrator,
        scout,
    };
    let router = create_router(state).merge(metrics.router());

    Ok(router.into())
}
