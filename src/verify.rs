// src/verify.rs
// Lightweight link liveness check, used as an optional pre-trust filter on
// scout output. `verify` never fails: anything short of a timely 2xx is
// simply `false`.

use std::time::Duration;

use tracing::debug;

use crate::error::{Result, ScoutError};

pub struct LinkVerifier {
    http: reqwest::Client,
}

impl LinkVerifier {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("trend-scout/0.1")
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| ScoutError::transport("verify", e))?;
        Ok(Self { http })
    }

    /// True only for URLs with a recognized scheme that answer 2xx within
    /// the bounded wait. Malformed URLs are rejected without any network
    /// call.
    pub async fn verify(&self, url: &str) -> bool {
        if !has_recognized_scheme(url) {
            return false;
        }

        match self.http.head(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!(url, error = ?e, "link verification failed");
                false
            }
        }
    }
}

fn has_recognized_scheme(url: &str) -> bool {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.starts_with("http://") || trimmed.starts_with("https://")
}
