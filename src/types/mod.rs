pub mod inputs;
pub mod itinerary;
pub mod response;

pub use inputs::{Locale, TravelInputs, TravelStyle, MAX_DAYS, MIN_DAYS};
pub use itinerary::{
    Activity, DayPlan, EstimatedCosts, GroundingSource, ItineraryResponse, TimeOfDay,
    SOURCE_TITLE_PLACEHOLDER,
};
pub use response::deserialize_structured_response;
