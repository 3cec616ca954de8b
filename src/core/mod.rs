pub mod contract;
pub mod planner;

pub use contract::{
    build_request, connection_test_request, parse_response, DEFAULT_CONNECTION_TEST_MODEL,
    DEFAULT_ITINERARY_MODEL,
};
pub use planner::ItineraryPlanner;
