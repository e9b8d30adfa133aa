// src/bootstrap.rs
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::gemini::{GeminiClient, TextGenerator};

pub struct ScoutRuntime {
    pub cfg: AppConfig,
    pub generator: Arc<dyn TextGenerator>,
}

impl ScoutRuntime {
    pub fn from_env() -> anyhow::Result<Self> {
        let cfg = AppConfig::from_env()?;
        // Safe diagnostics: model + region + key lengths only, never the keys.
        info!(
            "scout cfg loaded: model={}, region={}, gemini_key_len={}, serper_key_len={}",
            cfg.model,
            cfg.region,
            cfg.gemini_api_key.len(),
            cfg.serper_api_key.len()
        );
        let generator: Arc<dyn TextGenerator> =
            Arc::new(GeminiClient::new(&cfg.gemini_api_key, &cfg.model)?);
        Ok(Self { cfg, generator })
    }

    /// One-off smoke test of the generation client. Logs the outcome, never
    /// panics on failure.
    pub async fn quick_probe(&self) {
        let sample = "Name one product category trending with online shoppers. One word.";
        match self.generator.generate(sample).await {
            Ok(text) => info!(provider = self.generator.name(), "quick probe => {text:?}"),
            Err(e) => warn!(provider = self.generator.name(), error = %e, "quick probe failed"),
        }
    }
}
