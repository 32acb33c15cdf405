use std::env;

use crate::error::{PlannerError, Result};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Provider credentials and model selection, established once at startup
/// and read-only afterwards.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    api_key: String,
    model: String,
    image_model: String,
    base_url: String,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read configuration from the environment. `OPENAI_API_KEY` is
    /// required; everything else falls back to defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            PlannerError::Config(
                "OPENAI_API_KEY is required. Set it in the environment or a .env file".to_string(),
            )
        })?;

        let mut config = Self::new(api_key);
        if let Ok(model) = env::var("TRIPWEAVER_MODEL") {
            config.model = model;
        }
        if let Ok(image_model) = env::var("TRIPWEAVER_IMAGE_MODEL") {
            config.image_model = image_model;
        }
        if let Ok(base_url) = env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_image_model(mut self, image_model: impl Into<String>) -> Self {
        self.image_model = image_model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
