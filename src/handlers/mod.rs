//! Transport-agnostic request handlers. The HTTP layer is expected to
//! deserialize the body to JSON, hand it over, and write back the
//! status and body of the returned response.

use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::error::PlannerError;
use crate::services::ItineraryComposer;
use crate::types::{ItineraryDocument, TripParameters};

/// Outcome of one handled request: an HTTP-ish status code plus the
/// response body. A success body never carries an error payload and
/// vice versa.
#[derive(Clone, Debug, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn from_error(err: &PlannerError) -> Self {
        let status = match err {
            PlannerError::EmptyCompletion(_)
            | PlannerError::InvalidFunctionCall(_)
            | PlannerError::Validation(_) => 400,
            _ => 500,
        };
        Self {
            status,
            body: err.to_error_payload(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpdateRequest {
    current_itinerary: ItineraryDocument,
    user_suggestion: String,
}

/// Handle a generation request. Sparse input is filled with defaults
/// rather than rejected; only a body whose fields carry the wrong
/// shapes entirely (or an internal failure) produces an error response.
pub async fn generate_itinerary(composer: &ItineraryComposer, body: Value) -> HandlerResponse {
    let params: TripParameters = match serde_json::from_value(body) {
        Ok(params) => params,
        Err(err) => {
            error!(%err, "malformed generate request");
            return HandlerResponse::from_error(&PlannerError::Serialization(err));
        }
    };

    match composer.generate(&params).await {
        Ok(document) => match serde_json::to_value(&document) {
            Ok(value) => HandlerResponse::ok(value),
            Err(err) => HandlerResponse::from_error(&PlannerError::Serialization(err)),
        },
        Err(err) => {
            error!(%err, "itinerary generation failed");
            HandlerResponse::from_error(&err)
        }
    }
}

/// Handle a refinement request over an existing document.
pub async fn update_itinerary(composer: &ItineraryComposer, body: Value) -> HandlerResponse {
    let request: UpdateRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(err) => {
            error!(%err, "malformed update request");
            return HandlerResponse::from_error(&PlannerError::Serialization(err));
        }
    };

    match composer
        .update(request.current_itinerary, &request.user_suggestion)
        .await
    {
        Ok(document) => match serde_json::to_value(&document) {
            Ok(value) => HandlerResponse::ok(value),
            Err(err) => HandlerResponse::from_error(&PlannerError::Serialization(err)),
        },
        Err(err) => {
            error!(%err, "itinerary update failed");
            HandlerResponse::from_error(&err)
        }
    }
}
