// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod metrics;
pub mod orchestrator;
pub mod prompts;
pub mod scout;
pub mod search;
pub mod types;
pub mod verify;

pub mod bootstrap;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::error::ScoutError;
pub use crate::orchestrator::Orchestrator;
pub use crate::scout::ProductScout;
pub use crate::types::{AnswerRecord, ArticleRecord, DiscoveryResult, ProductRecord};

use tracing::info;

/// Call this from the Shuttle entrypoint (after tracing init) to perform a
/// one-off smoke test of the Gemini client. It won't panic on failure; it
/// just logs the result.
pub async fn run_ai_quick_probe() -> anyhow::Result<()> {
    let runtime = bootstrap::ScoutRuntime::from_env()?;
    runtime.quick_probe().await;
    info!("AI quick probe finished");
    Ok(())
}
