// src/types.rs
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One resolved product, as handed to the renderer.
/// `image` and `link` are always populated: either a real resolved value or
/// a deterministic placeholder, never empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRecord {
    pub name: String,
    pub image: String,
    pub link: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Final assembly of a discovery run. `editors_picks[0]` aliases
/// `products[0]` (same allocation, not a copy).
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryResult {
    #[serde(rename = "editorsPicks")]
    pub editors_picks: Vec<Arc<ProductRecord>>,
    pub products: Vec<Arc<ProductRecord>>,
}

/// One generated article. `image` is attached in a second pass after text
/// generation and falls back to a placeholder URL, never left unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleRecord {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub date: String,
    pub summary: String,
    pub content: String,
    pub takeaways: Vec<String>,
    pub image: String,
}

/// Article body as produced by the generation call, before the image pass.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    pub summary: String,
    pub content: String,
    #[serde(default)]
    pub takeaways: Vec<String>,
}

/// Q&A payload for the learn surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerRecord {
    pub answer: String,
    #[serde(rename = "relatedQuestions", default)]
    pub related_questions: Vec<String>,
}

// ---- Search-provider item shapes (lenient: providers omit fields freely) ----

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub link: String,
}
