use std::time::Duration;

use tracing::{debug, error, info};

use crate::{
    core::contract::{
        build_request, connection_test_request, parse_response, DEFAULT_CONNECTION_TEST_MODEL,
        DEFAULT_ITINERARY_MODEL,
    },
    error::{ContractError, Result},
    schemas::{validation::day_count_violation, ValidationMode},
    services::{
        credentials::CredentialResolver,
        gemini_client::DEFAULT_BASE_URL,
        GeminiClient, GenerationBackend,
    },
    types::{ItineraryResponse, Locale, TravelInputs},
};

pub const MODEL_VAR: &str = "TRAVEL_BUDDY_MODEL";
pub const TEST_MODEL_VAR: &str = "TRAVEL_BUDDY_TEST_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const TIMEOUT_VAR: &str = "TRAVEL_BUDDY_TIMEOUT_SECS";

/// Entry point for presentation layers: one call per user action.
#[derive(Debug, Clone)]
pub struct ItineraryPlanner<B> {
    backend: B,
    model: String,
    test_model: String,
    locale: Locale,
    validation: ValidationMode,
}

impl<B: GenerationBackend> ItineraryPlanner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            model: DEFAULT_ITINERARY_MODEL.to_string(),
            test_model: DEFAULT_CONNECTION_TEST_MODEL.to_string(),
            locale: Locale::default(),
            validation: ValidationMode::default(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_test_model(mut self, model: impl Into<String>) -> Self {
        self.test_model = model.into();
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_validation_mode(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Build the request, call the backend once, and validate the answer.
    pub async fn generate_itinerary(&self, inputs: &TravelInputs) -> Result<ItineraryResponse> {
        let request = build_request(inputs, self.locale, &self.model)?;
        info!(
            destination = %inputs.destination,
            days = inputs.days,
            style = %inputs.style,
            model = %self.model,
            "generating itinerary"
        );

        let response = self.backend.generate(&request).await?;
        let itinerary = parse_response(
            response.text.as_deref(),
            response.grounding.as_ref(),
            self.validation,
        )?;

        self.validation
            .enforce(day_count_violation(&itinerary, inputs.days).into_iter().collect())?;

        debug!(
            days = itinerary.itinerary.len(),
            sources = itinerary.sources.as_ref().map_or(0, Vec::len),
            "itinerary accepted"
        );
        Ok(itinerary)
    }

    /// True iff the backend answers the fixed test prompt with any text,
    /// whitespace included.
    /// Failures are logged, never returned.
    pub async fn test_connection(&self) -> bool {
        let request = connection_test_request(&self.test_model);
        match self.backend.generate(&request).await {
            Ok(response) => response
                .text
                .as_deref()
                .is_some_and(|text| !text.is_empty()),
            Err(err) => {
                error!(error = %err, "connection test failed");
                false
            }
        }
    }
}

impl ItineraryPlanner<GeminiClient> {
    /// Gemini-backed planner configured from the environment.
    pub fn from_env() -> Result<Self> {
        let credentials = CredentialResolver::standard();
        Self::from_env_with(credentials)
    }

    /// Same as [`from_env`](Self::from_env) with a caller-chosen resolver.
    pub fn from_env_with(credentials: CredentialResolver) -> Result<Self> {
        let base_url = std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = match std::env::var(TIMEOUT_VAR) {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        let client = GeminiClient::new(credentials)
            .with_base_url(base_url)
            .with_timeout(timeout);

        let mut planner = Self::new(client);
        if let Ok(model) = std::env::var(MODEL_VAR) {
            planner = planner.with_model(model);
        }
        if let Ok(model) = std::env::var(TEST_MODEL_VAR) {
            planner = planner.with_test_model(model);
        }
        Ok(planner)
    }
}

/// Whole seconds, at least one.
fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ContractError::Config(format!(
            "{TIMEOUT_VAR} must be a positive number of seconds, got `{raw}`"
        ))),
    }
}
