//! travel-buddy: a typed request/response contract for generating grounded,
//! multi-day travel itineraries with Gemini.
//!
//! The crate builds a schema-constrained `generateContent` request from
//! [`TravelInputs`], sends it through a [`GenerationBackend`], and turns the
//! answer into a validated [`ItineraryResponse`] with de-duplicated web
//! sources.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use travel_buddy::{ItineraryPlanner, TravelInputs, TravelStyle};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let planner = ItineraryPlanner::from_env()?;
//!     let inputs = TravelInputs::new("제주도", 3, TravelStyle::Healing);
//!
//!     let itinerary = planner.generate_itinerary(&inputs).await?;
//!     for day in &itinerary.itinerary {
//!         println!("Day {}: {}", day.day, day.theme);
//!     }
//!     Ok(())
//! }
//! ```

extern crate self as travel_buddy;

pub mod core;
pub mod error;
pub mod schemas;
pub mod services;
pub mod types;

pub use core::{build_request, connection_test_request, parse_response, ItineraryPlanner};
pub use error::{ContractError, Result, GENERIC_FAILURE_MESSAGE};
pub use schemas::{ResponseSchema, SchemaHandle, ValidationMode};
pub use services::{
    CredentialResolver, CredentialSource, GeminiClient, GenerateRequest, GenerateResponse,
    GenerationBackend, KeyBridge, ManualKeyStore,
};
pub use travel_buddy_macros::response_schema;
pub use types::{
    Activity, DayPlan, EstimatedCosts, GroundingSource, ItineraryResponse, Locale, TimeOfDay,
    TravelInputs, TravelStyle,
};

pub use schemas as schema;

#[cfg(feature = "cli")]
pub mod cli;
