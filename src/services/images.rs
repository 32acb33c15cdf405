use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::warn;

use crate::config::ProviderConfig;
use crate::error::{PlannerError, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Image-generation capability: text prompt in, retrieval URL out.
#[async_trait]
pub trait ImageApi: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// OpenAI images/generations implementation.
#[derive(Clone, Debug)]
pub struct OpenAiImages {
    config: ProviderConfig,
    timeout: Duration,
}

impl OpenAiImages {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ImageApi for OpenAiImages {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| PlannerError::Provider(format!("Failed to build HTTP client: {err}")))?;

        let url = format!(
            "{}/images/generations",
            self.config.base_url().trim_end_matches('/')
        );
        let body = json!({
            "model": self.config.image_model(),
            "prompt": prompt,
            "size": "1024x1024",
            "quality": "standard",
            "n": 1
        });

        let response = client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| PlannerError::Provider(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let response_json: Value = response
            .json()
            .await
            .map_err(|err| PlannerError::Provider(format!("Failed to read response: {err}")))?;

        if !status.is_success() {
            let api_message = response_json
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(|value| value.as_str())
                .unwrap_or("image generation failed");
            return Err(PlannerError::Provider(format!(
                "HTTP {} error: {}",
                status, api_message
            )));
        }

        response_json
            .get("data")
            .and_then(|data| data.get(0))
            .and_then(|entry| entry.get("url"))
            .and_then(|value| value.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                PlannerError::Provider("image response carried no retrieval URL".to_string())
            })
    }
}

/// Resilience boundary for the optional illustration. Any failure is
/// logged and resolved to `None`; it never sinks the itinerary itself.
pub async fn request_illustration(api: &dyn ImageApi, destination: &str) -> Option<String> {
    if destination.trim().is_empty() {
        return None;
    }

    let prompt = format!("Generate an image related to {destination}");
    match api.generate(&prompt).await {
        Ok(url) => Some(url),
        Err(err) => {
            warn!(destination, error = %err, "illustration request failed");
            None
        }
    }
}
