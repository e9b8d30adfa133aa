use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize the Prometheus recorder, register every series the
    /// pipeline emits, and expose a static gauge for the link-verifier
    /// timeout.
    pub fn init(verify_timeout_ms: u64) -> Self {
        // Use default buckets to avoid API differences across crate versions.
        let builder = PrometheusBuilder::new();

        let handle = builder
            .install_recorder()
            .expect("prometheus: install recorder");

        describe_pipeline_metrics();
        gauge!("link_verify_timeout_ms").set(verify_timeout_ms as f64);

        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// One-time registration of descriptions (so series show up on /metrics
/// with help text). Emission sites live in scout.rs / orchestrator.rs /
/// search.rs; this is the single catalog of what they record.
fn describe_pipeline_metrics() {
    describe_counter!(
        "scout_layer_priced_total",
        "Lookups resolved by the priced shopping layer."
    );
    describe_counter!(
        "scout_layer_generic_total",
        "Lookups resolved by the generic image+AI fallback layer."
    );
    describe_counter!(
        "scout_layer_terminal_total",
        "Lookups that exhausted every layer and got a synthetic record."
    );
    describe_counter!("discover_runs_total", "Completed discovery pipeline runs.");
    describe_counter!(
        "discover_failures_total",
        "Discovery runs aborted by the category call."
    );
    describe_counter!(
        "article_image_fallback_total",
        "Article slots that degraded to the placeholder image."
    );
    describe_counter!(
        "scout_links_replaced_total",
        "Scout links replaced after failing verification."
    );
    describe_counter!(
        "search_provider_errors_total",
        "Search provider fetch/parse errors."
    );
    describe_histogram!(
        "discover_duration_ms",
        "Discovery wall time in milliseconds."
    );
}
