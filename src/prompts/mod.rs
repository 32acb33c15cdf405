//! Prompt Builder: pure assembly of message pairs and output schemas.
//!
//! Every function here is side-effect free. Each bundle names the
//! function the model is forced to call and carries the JSON schema of
//! that function's arguments.

use serde_json::Value;

use crate::schemas::schema_value_for;
use crate::types::{
    CostArguments, DayPlan, ItineraryArguments, ItineraryDocument, TitleArguments, TripParameters,
};

pub const ITINERARY_SCHEMA: &str = "create_daily_itinerary";
pub const COSTS_SCHEMA: &str = "total_costs_calculator";
pub const UPDATE_SCHEMA: &str = "update_daily_itinerary";
pub const TITLE_SCHEMA: &str = "update_title";

/// A single structured-completion request: system/user message pair
/// plus the named schema the model must answer with.
#[derive(Clone, Debug)]
pub struct PromptBundle {
    pub system: String,
    pub user: String,
    pub schema_name: &'static str,
    pub description: &'static str,
    pub schema: Value,
}

/// Build the day-by-day generation prompt. Every provided parameter is
/// named verbatim so the model cannot hallucinate unset fields.
pub fn itinerary_prompt(params: &TripParameters) -> PromptBundle {
    let user = format!(
        "Create a detailed day-by-day itinerary for a {days}-day trip with the costs calculation:\n\
         - From: {origin}\n\
         - To: {destinations}\n\
         - Budget: {budget} {currency}\n\
         - Stay Preference: {stay_pref}\n\
         - Group Size: {group_size}\n\
         - Comfort Level: {comfort_level}\n\
         - Theme: {theme}\n\
         - Additional Info: {additional_info}\n\
         \n\
         For each day, provide:\n\
         1. Morning activities, MUST provide transportation details for each activity (for example, taxi to the hotel address), including estimated transportation time; if the theme is not general and the activity is related to the theme, MUST explain how the activity relates to the theme.\n\
         2. Afternoon activities, with the same transportation and theme requirements.\n\
         3. Evening activities, with the same transportation and theme requirements.\n\
         4. Recommended restaurants/meals.\n\
         5. Estimated costs, which must include stay (hotel/airbnb) costs, transportation costs, meal costs and miscellaneous costs.\n\
         \n\
         After the day-by-day itinerary, also provide:\n\
         1. Estimated Stay Total Costs\n\
         2. Estimated Transportation Total Costs\n\
         3. Estimated Meal Total Costs\n\
         4. Estimated Miscellaneous Costs\n\
         5. Estimated Trip Total Costs",
        days = params.days,
        origin = params.origin,
        destinations = params.destinations_label(),
        budget = params.budget,
        currency = params.currency,
        stay_pref = params.stay_pref,
        group_size = params.group_size,
        comfort_level = params.comfort_level,
        theme = params.theme,
        additional_info = params.additional_info,
    );

    PromptBundle {
        system: "You are a knowledgeable travel planner. Create detailed, realistic daily \
                 itineraries that fit the budget and preferences specified."
            .to_string(),
        user,
        schema_name: ITINERARY_SCHEMA,
        description: "Create detailed daily itinerary",
        schema: schema_value_for::<ItineraryArguments>(),
    }
}

/// Build the aggregate-cost prompt for an already generated itinerary.
pub fn cost_prompt(itinerary: &[DayPlan]) -> PromptBundle {
    let serialized = serde_json::to_string(itinerary).unwrap_or_else(|_| "[]".to_string());
    PromptBundle {
        system: "You are a trip cost calculator. Calculate the total trip cost using the \
                 itinerary provided."
            .to_string(),
        user: format!("Itinerary:{}", serialized),
        schema_name: COSTS_SCHEMA,
        description: "Calculate the total costs based on the detailed daily itinerary",
        schema: schema_value_for::<CostArguments>(),
    }
}

/// Build the refinement prompt: apply a free-text suggestion to an
/// existing document while keeping its structure and detail level.
pub fn update_prompt(document: &ItineraryDocument, suggestion: &str) -> PromptBundle {
    let current = serde_json::to_string_pretty(document).unwrap_or_else(|_| "{}".to_string());
    let user = format!(
        "Update this itinerary based on the following suggestion: {suggestion}\n\
         \n\
         Current itinerary:\n\
         {current}\n\
         \n\
         Please maintain the same JSON structure but modify the activities and details \
         according to the suggestion. Make sure to keep the same level of detail for \
         transportation, costs, and activities."
    );

    PromptBundle {
        system: "You are a travel assistant. Update the provided itinerary based on user \
                 suggestions while maintaining the same structure and level of detail."
            .to_string(),
        user,
        schema_name: UPDATE_SCHEMA,
        description: "Update the daily itinerary",
        schema: schema_value_for::<ItineraryArguments>(),
    }
}

/// Build the conditional title-rewrite prompt. The model may return the
/// original title unchanged when the suggestion does not warrant a new
/// one.
pub fn title_prompt(current_title: &str, suggestion: &str) -> PromptBundle {
    let user = format!(
        "Based on this user suggestion: {suggestion}\n\
         And the current title: {current_title}\n\
         Should the title be updated? If yes, generate a new title that reflects the changes.\n\
         If no changes are needed, return the original title."
    );

    PromptBundle {
        system: "You are a travel assistant. Help update the trip title if the user's \
                 suggestions warrant a change."
            .to_string(),
        user,
        schema_name: TITLE_SCHEMA,
        description: "Update the itinerary title if needed",
        schema: schema_value_for::<TitleArguments>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DayDetails, TripParameters};

    fn sample_params() -> TripParameters {
        TripParameters {
            origin: "Boston".to_string(),
            destinations: vec!["Tokyo".to_string(), "Kyoto".to_string()],
            budget: "3000".to_string(),
            days: 3,
            currency: "EUR".to_string(),
            group_size: 4,
            comfort_level: "luxury".to_string(),
            theme: "food".to_string(),
            additional_info: "vegetarian options".to_string(),
            stay_pref: "ryokan".to_string(),
        }
    }

    #[test]
    fn itinerary_prompt_names_every_parameter_verbatim() {
        let params = sample_params();
        let bundle = itinerary_prompt(&params);

        for fragment in [
            "Boston",
            "Tokyo;Kyoto",
            "3000 EUR",
            "3-day trip",
            "Group Size: 4",
            "Comfort Level: luxury",
            "Theme: food",
            "vegetarian options",
            "Stay Preference: ryokan",
        ] {
            assert!(
                bundle.user.contains(fragment),
                "prompt is missing `{}`:\n{}",
                fragment,
                bundle.user
            );
        }
        assert_eq!(bundle.schema_name, ITINERARY_SCHEMA);
    }

    #[test]
    fn default_fields_still_enter_the_prompt() {
        let params = TripParameters {
            origin: "Boston".to_string(),
            destinations: vec!["Tokyo".to_string()],
            ..TripParameters::default()
        };
        let bundle = itinerary_prompt(&params);
        assert!(bundle.user.contains("5-day trip"));
        assert!(bundle.user.contains("Comfort Level: moderate"));
        assert!(bundle.user.contains("Theme: general"));
    }

    #[test]
    fn cost_prompt_embeds_the_itinerary() {
        let itinerary = vec![DayPlan {
            day: "Day 1".to_string(),
            details: DayDetails {
                morning: "Tsukiji market".to_string(),
                ..DayDetails::default()
            },
        }];
        let bundle = cost_prompt(&itinerary);
        assert!(bundle.user.starts_with("Itinerary:"));
        assert!(bundle.user.contains("Tsukiji market"));
        assert_eq!(bundle.schema_name, COSTS_SCHEMA);
    }

    #[test]
    fn title_prompt_carries_both_inputs() {
        let bundle = title_prompt("3-Day Trip from Boston to Tokyo", "add a day in Kyoto");
        assert!(bundle.user.contains("3-Day Trip from Boston to Tokyo"));
        assert!(bundle.user.contains("add a day in Kyoto"));
        assert_eq!(bundle.schema_name, TITLE_SCHEMA);
    }

    #[test]
    fn update_prompt_embeds_suggestion_and_document() {
        let doc = crate::types::ItineraryDocument::skeleton(&sample_params());
        let bundle = update_prompt(&doc, "swap Kyoto for Osaka");
        assert!(bundle.user.contains("swap Kyoto for Osaka"));
        assert!(bundle.user.contains("3-Day food Trip from Boston to Tokyo;Kyoto"));
        assert_eq!(bundle.schema_name, UPDATE_SCHEMA);
    }
}
