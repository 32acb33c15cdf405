use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{PlannerError, Result};
use crate::prompts::{self, PromptBundle};
use crate::services::completion::StructuredClient;
use crate::services::images::{request_illustration, ImageApi};
use crate::types::{
    CostArguments, CostSummary, DayPlan, ItineraryArguments, ItineraryDocument, TitleArguments,
    TripParameters,
};

/// What to do when a structured call yields no payload. Kept as an
/// explicit per-call-site table so the generate/update asymmetry is a
/// documented policy rather than scattered conditionals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnEmpty {
    /// Resolve to an empty value and keep going.
    Degrade,
    /// Surface `EmptyCompletion` to the caller.
    Fail,
}

const GENERATE_ITINERARY: OnEmpty = OnEmpty::Degrade;
const GENERATE_COSTS: OnEmpty = OnEmpty::Degrade;
const UPDATE_ITINERARY: OnEmpty = OnEmpty::Fail;
const UPDATE_TITLE: OnEmpty = OnEmpty::Degrade;
const UPDATE_COSTS: OnEmpty = OnEmpty::Degrade;

/// Orchestrates the dependent structured calls of the generate and
/// update flows into one document.
#[derive(Clone)]
pub struct ItineraryComposer {
    completion: StructuredClient,
    images: Arc<dyn ImageApi>,
}

impl ItineraryComposer {
    pub fn new(completion: StructuredClient, images: Arc<dyn ImageApi>) -> Self {
        Self { completion, images }
    }

    /// Generate flow: skeleton, day-by-day itinerary, cost rollup over
    /// the produced itinerary, then the optional illustration.
    pub async fn generate(&self, params: &TripParameters) -> Result<ItineraryDocument> {
        let mut document = ItineraryDocument::skeleton(params);
        info!(title = %document.title, days = params.days, "generating itinerary");

        document.itinerary = self
            .itinerary_call(&prompts::itinerary_prompt(params), GENERATE_ITINERARY)
            .await?;
        document.itinerary_costs = self
            .cost_call(&document.itinerary, GENERATE_COSTS)
            .await?;

        if let Some(destination) = params.first_destination() {
            document.image = request_illustration(self.images.as_ref(), destination).await;
        }

        Ok(document)
    }

    /// Update flow: replace the itinerary (failing loudly when the
    /// model yields nothing, since there is no fallback content), then
    /// best-effort title rewrite, then cost rollup over the NEW
    /// itinerary. No field is touched before the update call succeeds.
    pub async fn update(
        &self,
        mut document: ItineraryDocument,
        suggestion: &str,
    ) -> Result<ItineraryDocument> {
        info!(title = %document.title, "updating itinerary");

        document.itinerary = self
            .itinerary_call(&prompts::update_prompt(&document, suggestion), UPDATE_ITINERARY)
            .await?;

        let title_bundle = prompts::title_prompt(&document.title, suggestion);
        if let Some(args) = self.resolve(
            self.completion.invoke_as::<TitleArguments>(&title_bundle).await,
            &title_bundle,
            UPDATE_TITLE,
        )? {
            document.title = args.title;
        }

        document.itinerary_costs = self.cost_call(&document.itinerary, UPDATE_COSTS).await?;
        Ok(document)
    }

    async fn itinerary_call(&self, bundle: &PromptBundle, policy: OnEmpty) -> Result<Vec<DayPlan>> {
        let result = self
            .resolve(
                self.completion.invoke_as::<ItineraryArguments>(bundle).await,
                bundle,
                policy,
            )?
            .map(|args| args.itinerary)
            .unwrap_or_default();
        Ok(result)
    }

    async fn cost_call(&self, itinerary: &[DayPlan], policy: OnEmpty) -> Result<CostSummary> {
        let bundle = prompts::cost_prompt(itinerary);
        let result = self
            .resolve(
                self.completion.invoke_as::<CostArguments>(&bundle).await,
                &bundle,
                policy,
            )?
            .map(|args| args.itinerary_costs)
            .unwrap_or_default();
        Ok(result)
    }

    /// Apply the on-empty policy to one structured-call outcome. Hard
    /// errors always propagate; only the absent-payload case differs
    /// between call sites.
    fn resolve<T>(
        &self,
        outcome: Result<Option<T>>,
        bundle: &PromptBundle,
        policy: OnEmpty,
    ) -> Result<Option<T>> {
        match outcome? {
            Some(value) => Ok(Some(value)),
            None => match policy {
                OnEmpty::Degrade => {
                    warn!(schema = bundle.schema_name, "no structured payload, degrading to empty");
                    Ok(None)
                }
                OnEmpty::Fail => Err(PlannerError::EmptyCompletion(
                    bundle.schema_name.to_string(),
                )),
            },
        }
    }
}
