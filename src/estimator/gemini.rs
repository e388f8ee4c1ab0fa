//! Gemini `generateContent` estimator
//!
//! Uses the blocking ureq client on the blocking pool; one request per call,
//! no retries.

use super::Estimator;
use crate::error::{WagecastError, WagecastResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const PROVIDER: &str = "gemini";

/// Estimator backed by the Gemini REST API
pub struct GeminiEstimator {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiEstimator {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url,
            timeout,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl Estimator for GeminiEstimator {
    async fn generate(&self, prompt: &str) -> WagecastResult<String> {
        let url = self.generate_url();
        let api_key = self.api_key.clone();
        let timeout = self.timeout;
        let body = build_body(prompt).to_string();

        debug!("POST {}", url);
        let reply = tokio::task::spawn_blocking(move || -> WagecastResult<String> {
            let agent: ureq::Agent = ureq::Agent::config_builder()
                .timeout_global(Some(timeout))
                .build()
                .into();

            let mut response = agent
                .post(&url)
                .header("x-goog-api-key", &api_key)
                .header("Content-Type", "application/json")
                .send(body)
                .map_err(|e| WagecastError::estimation(PROVIDER, e.to_string()))?;

            response
                .body_mut()
                .read_to_string()
                .map_err(|e| WagecastError::estimation(PROVIDER, e.to_string()))
        })
        .await
        .map_err(|e| WagecastError::estimation(PROVIDER, format!("request task failed: {}", e)))??;

        extract_text(&reply)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

fn build_body(prompt: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [
            { "parts": [ { "text": prompt } ] }
        ]
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Concatenate the text parts of the first candidate
fn extract_text(reply: &str) -> WagecastResult<String> {
    let parsed: GenerateResponse = serde_json::from_str(reply)
        .map_err(|e| WagecastError::estimation(PROVIDER, format!("unexpected reply: {}", e)))?;

    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_includes_model() {
        let estimator = GeminiEstimator::new(
            "key",
            "gemini-1.5-flash",
            "https://example.test/",
            Duration::from_secs(1),
        );
        assert_eq!(
            estimator.generate_url(),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(estimator.name(), "gemini");
    }

    #[test]
    fn body_wraps_prompt() {
        let body = build_body("hello");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn extract_joins_parts() {
        let reply = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "₹6,00,000"}, {"text": " - ₹8,50,000 per annum\n"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        assert_eq!(
            extract_text(reply).unwrap(),
            "₹6,00,000 - ₹8,50,000 per annum\n"
        );
    }

    #[test]
    fn extract_without_candidates_is_empty() {
        assert_eq!(extract_text(r#"{"candidates": []}"#).unwrap(), "");
        assert_eq!(extract_text(r#"{"promptFeedback": {}}"#).unwrap(), "");
    }

    #[test]
    fn extract_rejects_non_json() {
        let err = extract_text("<html>").unwrap_err();
        assert!(matches!(err, WagecastError::Estimation { .. }));
    }
}
