//! Demo that resolves a few keywords through the scout against live keys.
//! Requires GEMINI_API_KEY and SERPER_API_KEY in the environment (or .env).

use std::sync::Arc;

use trend_scout::config::AppConfig;
use trend_scout::gemini::{GeminiClient, TextGenerator};
use trend_scout::scout::ProductScout;
use trend_scout::search::{SearchProvider, SerperClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = AppConfig::from_env()?;
    let generator: Arc<dyn TextGenerator> =
        Arc::new(GeminiClient::new(&cfg.gemini_api_key, &cfg.model)?);
    let search: Arc<dyn SearchProvider> =
        Arc::new(SerperClient::new(&cfg.serper_api_key, &cfg.region)?);
    let scout = ProductScout::new(generator, search);

    let keywords = std::env::args().skip(1).collect::<Vec<_>>();
    let keywords = if keywords.is_empty() {
        vec!["air fryer".to_string(), "mechanical keyboard".to_string()]
    } else {
        keywords
    };

    for kw in keywords {
        let record = scout.find_product(&kw).await;
        println!("{}", serde_json::to_string_pretty(&record)?);
    }

    println!("scout-demo done");
    Ok(())
}
