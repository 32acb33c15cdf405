pub mod itinerary;
pub mod trip;

pub use itinerary::{
    CostArguments, CostSummary, DayDetails, DayPlan, ItineraryArguments, ItineraryDocument,
    TitleArguments, TripDetails,
};
pub use trip::TripParameters;
