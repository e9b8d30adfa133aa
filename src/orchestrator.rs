// src/orchestrator.rs
// Top-level pipelines: trend discovery, article batch, and the single-shot
// learn/Q&A call.
//
// Shape of both batch pipelines: one AI call produces the work list (its
// failure fails the whole operation, there is no fallback for that step);
// then one task per item is spawned and the handles are awaited in input
// order ("wait for all, keep order"). Every branch absorbs its own failures
// before returning, so a bad branch degrades its own slot only.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Result, ScoutError};
use crate::extract;
use crate::gemini::TextGenerator;
use crate::prompts;
use crate::scout::{self, ProductScout};
use crate::search::ImageSource;
use crate::types::{AnswerRecord, ArticleDraft, ArticleRecord, DiscoveryResult, ProductRecord};
use crate::verify::LinkVerifier;

#[derive(Debug, Deserialize)]
struct TrendingPayload {
    trending_categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    category: String,
    example_product: String,
}

#[derive(Debug, Deserialize)]
struct ArticlesPayload {
    articles: Vec<ArticleDraft>,
}

pub struct Orchestrator {
    generator: Arc<dyn TextGenerator>,
    scout: Arc<ProductScout>,
    images: Arc<dyn ImageSource>,
    /// Optional pre-trust filter for scout links.
    verifier: Option<Arc<LinkVerifier>>,
    category_count: usize,
    article_count: usize,
}

impl Orchestrator {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        scout: Arc<ProductScout>,
        images: Arc<dyn ImageSource>,
        verifier: Option<Arc<LinkVerifier>>,
        category_count: usize,
        article_count: usize,
    ) -> Self {
        Self {
            generator,
            scout,
            images,
            verifier,
            category_count,
            article_count,
        }
    }

    /// Discovery pipeline: category list → concurrent scout per category →
    /// assembled result with the first product aliased as the featured pick.
    pub async fn discover(&self) -> Result<DiscoveryResult> {
        let t0 = Instant::now();

        let raw = self
            .generator
            .generate_json(&prompts::trending_categories(self.category_count))
            .await
            .inspect_err(|_| counter!("discover_failures_total").increment(1))?;
        let payload: TrendingPayload = extract::json_payload(&raw)
            .inspect_err(|_| counter!("discover_failures_total").increment(1))?;
        if payload.trending_categories.is_empty() {
            counter!("discover_failures_total").increment(1);
            return Err(ScoutError::Shape("trending_categories is empty".into()));
        }

        // Fan-out: one scout task per category, joined in input order.
        let mut handles = Vec::with_capacity(payload.trending_categories.len());
        for entry in &payload.trending_categories {
            let scout = Arc::clone(&self.scout);
            let verifier = self.verifier.clone();
            let keyword = entry.example_product.clone();
            let category = entry.category.clone();
            handles.push((
                entry.example_product.clone(),
                tokio::spawn(async move {
                    let mut record = scout.find_product(&keyword).await;
                    record.tags.push(category);
                    if let Some(v) = verifier {
                        if !v.verify(&record.link).await {
                            debug!(%keyword, link = %record.link, "replacing unverified link");
                            counter!("scout_links_replaced_total").increment(1);
                            record.link = scout::search_link(&keyword);
                        }
                    }
                    record
                }),
            ));
        }

        let mut products: Vec<Arc<ProductRecord>> = Vec::with_capacity(handles.len());
        for (keyword, handle) in handles {
            let record = match handle.await {
                Ok(record) => record,
                // A panicked branch costs its own slot only.
                Err(e) => {
                    warn!(%keyword, error = ?e, "scout task failed; using terminal record");
                    scout::terminal_record(&keyword)
                }
            };
            products.push(Arc::new(record));
        }

        let editors_picks = products.first().cloned().into_iter().collect();

        counter!("discover_runs_total").increment(1);
        histogram!("discover_duration_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        info!(products = products.len(), "discovery pipeline complete");

        Ok(DiscoveryResult {
            editors_picks,
            products,
        })
    }

    /// Content pipeline: article batch → concurrent image lookup per title →
    /// positional merge. A failed image lookup degrades that one slot to the
    /// placeholder URL.
    pub async fn full_articles(&self) -> Result<Vec<ArticleRecord>> {
        let raw = self
            .generator
            .generate_json(&prompts::articles(self.article_count))
            .await?;
        let payload: ArticlesPayload = extract::json_payload(&raw)?;
        if payload.articles.is_empty() {
            return Err(ScoutError::Shape("articles is empty".into()));
        }

        // Image pass, keyed by title, joined positionally with the drafts.
        let mut handles = Vec::with_capacity(payload.articles.len());
        for draft in &payload.articles {
            let images = Arc::clone(&self.images);
            let title = draft.title.clone();
            handles.push(tokio::spawn(async move {
                images.image_for(&title).await
            }));
        }

        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let mut out = Vec::with_capacity(payload.articles.len());
        for (i, (draft, handle)) in payload.articles.into_iter().zip(handles).enumerate() {
            let image = match handle.await {
                Ok(Ok(url)) => url,
                Ok(Err(e)) => {
                    debug!(title = %draft.title, error = %e, "image lookup failed");
                    counter!("article_image_fallback_total").increment(1);
                    scout::placeholder_image(&draft.title)
                }
                Err(e) => {
                    warn!(title = %draft.title, error = ?e, "image task failed");
                    counter!("article_image_fallback_total").increment(1);
                    scout::placeholder_image(&draft.title)
                }
            };
            out.push(ArticleRecord {
                id: i as u32 + 1,
                title: draft.title,
                author: draft
                    .author
                    .unwrap_or_else(|| "Trend Scout Editorial".to_string()),
                date: today.clone(),
                summary: draft.summary,
                content: draft.content,
                takeaways: draft.takeaways,
                image,
            });
        }

        info!(articles = out.len(), "content pipeline complete");
        Ok(out)
    }

    /// Learn surface: one declared-shape Q&A call.
    pub async fn ask(&self, question: &str) -> Result<AnswerRecord> {
        let raw = self
            .generator
            .generate_json(&prompts::answer(question))
            .await?;
        extract::json_payload(&raw)
    }
}
