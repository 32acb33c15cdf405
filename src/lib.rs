//! tripweaver: a travel itinerary backend driven by structured LLM completions
//!
//! A client supplies trip parameters; the service builds prompts, forces
//! the model to answer through a named function schema, composes the
//! dependent calls (itinerary, costs, and for refinements: title) into
//! one document, and optionally attaches an illustrative image.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tripweaver::{
//!     config::ProviderConfig,
//!     services::{ItineraryComposer, OpenAiCompletion, OpenAiImages, StructuredClient},
//!     types::TripParameters,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProviderConfig::from_env()?;
//!     let completion = StructuredClient::new(Arc::new(OpenAiCompletion::new(config.clone())));
//!     let composer = ItineraryComposer::new(completion, Arc::new(OpenAiImages::new(config)));
//!
//!     let params = TripParameters {
//!         origin: "Boston".to_string(),
//!         destinations: vec!["Tokyo".to_string()],
//!         days: 3,
//!         ..TripParameters::default()
//!     };
//!     let document = composer.generate(&params).await?;
//!     println!("{}", serde_json::to_string_pretty(&document)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod prompts;
pub mod schemas;
pub mod services;
pub mod types;

pub use config::ProviderConfig;
pub use error::{PlannerError, Result};
pub use handlers::{generate_itinerary, update_itinerary, HandlerResponse};
pub use prompts::PromptBundle;
pub use services::{
    CompletionApi, ImageApi, ItineraryComposer, OpenAiCompletion, OpenAiImages, StructuredClient,
};
pub use types::{CostSummary, DayPlan, ItineraryDocument, TripParameters};

#[cfg(feature = "cli")]
pub mod cli;
