use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{PlannerError, Result};
use crate::prompts::PromptBundle;
use crate::schemas::{deserialize_payload, validate_payload};

const MAX_RETRIES: usize = 3;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Completion capability: send role-tagged messages with a forced
/// function-call directive, return the raw arguments string of the
/// matching tool call, or `None` when the model produced no structured
/// payload at all.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn call_function(
        &self,
        messages: Vec<Value>,
        tool: Value,
        function_name: &str,
    ) -> Result<Option<String>>;
}

/// OpenAI-compatible chat-completions implementation.
#[derive(Clone, Debug)]
pub struct OpenAiCompletion {
    config: ProviderConfig,
    timeout: Duration,
}

impl OpenAiCompletion {
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

    async fn chat_completion(&self, body: &Value) -> Result<Value> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| PlannerError::Provider(format!("Failed to build HTTP client: {err}")))?;

        let mut attempt = 0;
        let mut backoff = Duration::from_millis(250);

        loop {
            let request_url = build_chat_url(self.config.base_url());

            let response = client
                .post(&request_url)
                .header("Authorization", format!("Bearer {}", self.config.api_key()))
                .header("Content-Type", "application/json")
                .json(body)
                .send()
                .await
                .map_err(|err| PlannerError::Provider(format!("HTTP request failed: {err}")))?;

            let status = response.status();
            let headers = response.headers().clone();
            let response_text = response
                .text()
                .await
                .map_err(|err| PlannerError::Provider(format!("Failed to read response: {err}")))?;

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_duration = headers
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.parse::<u64>().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(backoff);

                if attempt < MAX_RETRIES {
                    tokio::time::sleep(retry_after_duration).await;
                    attempt += 1;
                    backoff *= 2;
                    continue;
                }

                return Err(PlannerError::RateLimit {
                    retry_after: retry_after_duration.as_secs().max(1),
                });
            }

            if status.is_server_error() && attempt < MAX_RETRIES {
                tokio::time::sleep(backoff).await;
                attempt += 1;
                backoff *= 2;
                continue;
            }

            let response_json: Value = serde_json::from_str(&response_text).map_err(|err| {
                PlannerError::Provider(format!("Failed to parse response JSON: {err}"))
            })?;

            if !status.is_success() {
                let api_message = response_json
                    .get("error")
                    .and_then(|error| error.get("message"))
                    .and_then(|value| value.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or(response_text.clone());

                return Err(PlannerError::Provider(format!(
                    "HTTP {} error: {}",
                    status, api_message
                )));
            }

            if let Some(error) = response_json.get("error") {
                let error_message = error
                    .get("message")
                    .and_then(|value| value.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| error.to_string());
                return Err(PlannerError::Provider(format!("API error: {}", error_message)));
            }

            return Ok(response_json);
        }
    }
}

#[async_trait]
impl CompletionApi for OpenAiCompletion {
    async fn call_function(
        &self,
        messages: Vec<Value>,
        tool: Value,
        function_name: &str,
    ) -> Result<Option<String>> {
        let body = json!({
            "model": self.config.model(),
            "messages": messages,
            "tools": [tool],
            "tool_choice": {
                "type": "function",
                "function": { "name": function_name }
            }
        });

        let response = self.chat_completion(&body).await?;
        Ok(extract_arguments(&response, function_name).map(|s| s.to_string()))
    }
}

/// Find the forced tool call in a chat-completions response and return
/// its raw arguments string. Free-text replies yield `None`; they are
/// never parsed as JSON.
fn extract_arguments<'a>(response: &'a Value, function_name: &str) -> Option<&'a str> {
    let tool_calls = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("tool_calls"))
        .and_then(|calls| calls.as_array())?;

    tool_calls.iter().find_map(|call| {
        let function = call.get("function")?;
        let name = function.get("name").and_then(|value| value.as_str())?;
        if name != function_name {
            return None;
        }
        function.get("arguments").and_then(|value| value.as_str())
    })
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

/// Wraps a completion capability with the structured-call contract:
/// absent payload resolves to `Ok(None)`, a present-but-malformed
/// payload is a hard error.
#[derive(Clone)]
pub struct StructuredClient {
    api: Arc<dyn CompletionApi>,
}

impl StructuredClient {
    pub fn new(api: Arc<dyn CompletionApi>) -> Self {
        Self { api }
    }

    /// Run one structured call. Returns `Ok(None)` when the model
    /// declined to invoke the schema; parse and schema-validation
    /// failures are propagated, not swallowed.
    pub async fn invoke(&self, bundle: &PromptBundle) -> Result<Option<Value>> {
        let messages = vec![
            json!({ "role": "system", "content": bundle.system }),
            json!({ "role": "user", "content": bundle.user }),
        ];
        let tool = json!({
            "type": "function",
            "function": {
                "name": bundle.schema_name,
                "description": bundle.description,
                "parameters": bundle.schema
            }
        });

        let arguments = self
            .api
            .call_function(messages, tool, bundle.schema_name)
            .await?;

        let Some(raw) = arguments else {
            debug!(schema = bundle.schema_name, "model returned no structured payload");
            return Ok(None);
        };

        let payload: Value = serde_json::from_str(&raw).map_err(|err| {
            PlannerError::InvalidFunctionCall(format!(
                "Failed to parse arguments for `{}`: {}",
                bundle.schema_name, err
            ))
        })?;

        validate_payload(bundle.schema_name, &bundle.schema, &payload)?;
        Ok(Some(payload))
    }

    /// `invoke` plus deserialization into the envelope type.
    pub async fn invoke_as<T>(&self, bundle: &PromptBundle) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.invoke(bundle).await? {
            Some(payload) => Ok(Some(deserialize_payload(bundle.schema_name, &payload)?)),
            None => Ok(None),
        }
    }
}
