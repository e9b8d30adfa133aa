// src/gemini.rs
// AI text generation: provider trait + the Gemini implementation.
//
// One request, one response, no retries and no caching: every failure
// (transport, non-2xx, missing text path) collapses into a single classified
// error and the caller's fallback layer decides what happens next.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoutError};

/// Seam for the generation call so pipelines can run against mocks.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Free-text generation.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generation with a JSON response hint. Providers that support a
    /// response-schema hint override this; the default is plain generation
    /// (the extractor copes with fenced output either way).
    async fn generate_json(&self, prompt: &str) -> Result<String> {
        self.generate(prompt).await
    }

    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(ScoutError::Configuration(
                "gemini api key must not be empty".into(),
            ));
        }
        let http = reqwest::Client::builder()
            .user_agent("trend-scout/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ScoutError::transport("gemini", e))?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    async fn call(&self, prompt: &str, json_hint: bool) -> Result<String> {
        debug_assert!(!prompt.is_empty(), "prompts are never empty when sent");

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            safety_settings: default_safety_settings(),
            generation_config: json_hint.then(|| GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
            }),
        };

        let url = format!(
            "{GEMINI_BASE}/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScoutError::transport("gemini", e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScoutError::Transport {
                endpoint: "gemini",
                message: format!("status {status}"),
            });
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ScoutError::Format(format!("gemini response body: {e}")))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ScoutError::Format("gemini response carried no text".into()))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.call(prompt, false).await
    }

    async fn generate_json(&self, prompt: &str) -> Result<String> {
        self.call(prompt, true).await
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// ---- Wire shapes (camelCase per the Gemini REST API) ----

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    safety_settings: Vec<SafetySetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Debug)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize, Debug)]
struct RequestPart {
    text: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

fn default_safety_settings() -> Vec<SafetySetting> {
    // Product copy trips the default filters surprisingly often.
    [
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ]
    .into_iter()
    .map(|category| SafetySetting {
        category,
        threshold: "BLOCK_ONLY_HIGH",
    })
    .collect()
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}
