// tests/discovery_pipeline.rs
//
// Orchestrator discovery semantics: the category call is the only step with
// no fallback; branch failures are absorbed per-slot; the featured pick
// aliases the first product.

use std::sync::Arc;

use async_trait::async_trait;
use trend_scout::error::{Result, ScoutError};
use trend_scout::gemini::TextGenerator;
use trend_scout::orchestrator::Orchestrator;
use trend_scout::scout::ProductScout;
use trend_scout::search::{ImageSource, SearchProvider};
use trend_scout::types::{ImageItem, ShoppingItem};

/// Generator scripted by prompt markers: the discovery prompt declares
/// `trending_categories`, the scout fallback prompt declares `amazon_link`.
struct ScriptedGenerator {
    categories_reply: Option<String>,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(ScoutError::transport("stub", "no free-text generation"))
    }

    async fn generate_json(&self, prompt: &str) -> Result<String> {
        if prompt.contains("trending_categories") {
            return self
                .categories_reply
                .clone()
                .ok_or_else(|| ScoutError::transport("stub", "category call down"));
        }
        Err(ScoutError::transport("stub", "fallback call down"))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

struct DownSearch;

#[async_trait]
impl SearchProvider for DownSearch {
    async fn shopping(&self, _query: &str) -> Result<Vec<ShoppingItem>> {
        Err(ScoutError::transport("stub", "down"))
    }

    async fn images(&self, _query: &str) -> Result<Vec<ImageItem>> {
        Err(ScoutError::transport("stub", "down"))
    }

    fn name(&self) -> &'static str {
        "down"
    }
}

struct NoImages;

#[async_trait]
impl ImageSource for NoImages {
    async fn image_for(&self, _title: &str) -> Result<String> {
        Err(ScoutError::Format("no images".into()))
    }
}

fn orchestrator(categories_reply: Option<String>) -> Orchestrator {
    let generator: Arc<dyn TextGenerator> = Arc::new(ScriptedGenerator { categories_reply });
    let search: Arc<dyn SearchProvider> = Arc::new(DownSearch);
    let scout = Arc::new(ProductScout::new(Arc::clone(&generator), search));
    Orchestrator::new(generator, scout, Arc::new(NoImages), None, 3, 3)
}

const THREE_CATEGORIES: &str = "```json\n{\"trending_categories\": [\
    {\"category\": \"Kitchen\", \"example_product\": \"air fryer\"},\
    {\"category\": \"Desk\", \"example_product\": \"mechanical keyboard\"},\
    {\"category\": \"Pets\", \"example_product\": \"dog camera\"}\
    ]}\n```";

#[tokio::test]
async fn failed_category_call_fails_the_whole_discovery() {
    let orch = orchestrator(None);
    let err = orch.discover().await.expect_err("must fail, no partial result");
    assert!(matches!(err, ScoutError::Transport { .. }), "got {err:?}");
}

#[tokio::test]
async fn prose_category_reply_is_a_format_error() {
    let orch = orchestrator(Some("no JSON today".to_string()));
    let err = orch.discover().await.expect_err("must fail");
    assert!(matches!(err, ScoutError::Format(_)), "got {err:?}");
}

#[tokio::test]
async fn failing_branches_still_yield_one_record_per_category() {
    // Every scout branch loses all its external calls; each one degrades to
    // its own terminal record instead of aborting the batch.
    let orch = orchestrator(Some(THREE_CATEGORIES.to_string()));
    let result = orch.discover().await.expect("discovery succeeds");

    assert_eq!(result.products.len(), 3);
    let expected = [
        ("air fryer", "Kitchen"),
        ("mechanical keyboard", "Desk"),
        ("dog camera", "Pets"),
    ];
    for (record, (keyword, category)) in result.products.iter().zip(expected) {
        assert_eq!(record.name, keyword, "input order must be preserved");
        assert_eq!(record.tags, vec![category.to_string()]);
        assert!(!record.image.is_empty());
        assert!(!record.link.is_empty());
    }
}

#[tokio::test]
async fn featured_pick_aliases_the_first_product() {
    let orch = orchestrator(Some(THREE_CATEGORIES.to_string()));
    let result = orch.discover().await.expect("discovery succeeds");

    assert_eq!(result.editors_picks.len(), 1);
    assert!(
        Arc::ptr_eq(&result.editors_picks[0], &result.products[0]),
        "editors_picks[0] must be the same record as products[0], not a copy"
    );
}

#[tokio::test]
async fn empty_category_list_is_a_shape_error() {
    let orch = orchestrator(Some("{\"trending_categories\": []}".to_string()));
    let err = orch.discover().await.expect_err("must fail");
    assert!(matches!(err, ScoutError::Shape(_)), "got {err:?}");
}
