use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::trip::TripParameters;

/// One day of the generated plan. The detail fields are deliberately
/// free text; the model supplies prose inside a structured envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DayPlan {
    pub day: String,
    pub details: DayDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DayDetails {
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
    pub meals: String,
    pub estimated_costs: String,
}

/// Aggregate trip costs. Every field is optional and absent fields are
/// omitted on the wire, so the degraded value serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CostSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_stay_costs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_transportation_costs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_meal_costs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_miscellaneous_costs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_trip_cost: Option<String>,
}

impl CostSummary {
    pub fn is_empty(&self) -> bool {
        self.total_stay_costs.is_none()
            && self.total_transportation_costs.is_none()
            && self.total_meal_costs.is_none()
            && self.total_miscellaneous_costs.is_none()
            && self.total_trip_cost.is_none()
    }
}

/// The trip parameters echoed back inside the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TripDetails {
    pub budget: String,
    pub currency: String,
    #[serde(rename = "groupSize")]
    pub group_size: u32,
    #[serde(rename = "comfortLevel")]
    pub comfort_level: String,
    #[serde(rename = "StayPref")]
    pub stay_pref: String,
    pub theme: String,
    #[serde(rename = "additionalInfo")]
    pub additional_info: String,
}

impl From<&TripParameters> for TripDetails {
    fn from(params: &TripParameters) -> Self {
        Self {
            budget: params.budget.clone(),
            currency: params.currency.clone(),
            group_size: params.group_size,
            comfort_level: params.comfort_level.clone(),
            stay_pref: params.stay_pref.clone(),
            theme: params.theme.clone(),
            additional_info: params.additional_info.clone(),
        }
    }
}

/// The aggregate itinerary response: title, echoed parameters, the
/// day-by-day plan, a cost rollup, and an optional illustration URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryDocument {
    pub title: String,
    pub details: TripDetails,
    pub itinerary: Vec<DayPlan>,
    pub itinerary_costs: CostSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ItineraryDocument {
    /// Document skeleton built from the trip parameters before any
    /// completion call has run.
    pub fn skeleton(params: &TripParameters) -> Self {
        Self {
            title: params.title(),
            details: TripDetails::from(params),
            itinerary: Vec::new(),
            itinerary_costs: CostSummary::default(),
            image: None,
        }
    }
}

/// Argument envelope for the `create_daily_itinerary` and
/// `update_daily_itinerary` functions.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ItineraryArguments {
    pub itinerary: Vec<DayPlan>,
}

/// Argument envelope for the `total_costs_calculator` function.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CostArguments {
    pub itinerary_costs: CostSummary,
}

/// Argument envelope for the `update_title` function.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TitleArguments {
    pub title: String,
}
