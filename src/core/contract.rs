//! The itinerary request/response contract: what is sent to the backend for
//! a set of [`TravelInputs`], and how its answer becomes an
//! [`ItineraryResponse`].

use crate::{
    error::Result,
    schemas::{gemini::itinerary_response_schema, validation::itinerary_violations, ValidationMode},
    services::{
        gemini_types::GroundingMetadata,
        prompt::{itinerary_prompt, CONNECTION_TEST_PROMPT},
        response_handler::{decode_structured, extract_sources},
        BackendTool, GenerateRequest,
    },
    types::{ItineraryResponse, Locale, TravelInputs},
};

pub const DEFAULT_ITINERARY_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_CONNECTION_TEST_MODEL: &str = "gemini-3-flash-preview";
pub const CONNECTION_TEST_MAX_TOKENS: u32 = 5;

/// Build the grounded, schema-constrained request for `inputs`.
pub fn build_request(inputs: &TravelInputs, locale: Locale, model: &str) -> Result<GenerateRequest> {
    inputs.validate()?;

    Ok(GenerateRequest::new(model, itinerary_prompt(inputs, locale))
        .with_tools(vec![BackendTool::GoogleSearch])
        .with_json_schema(itinerary_response_schema(locale)))
}

/// Minimal request used to check that the backend answers at all.
pub fn connection_test_request(model: &str) -> GenerateRequest {
    GenerateRequest::new(model, CONNECTION_TEST_PROMPT)
        .with_max_output_tokens(Some(CONNECTION_TEST_MAX_TOKENS))
}

/// Turn backend output into a validated itinerary with de-duplicated sources.
pub fn parse_response(
    raw: Option<&str>,
    grounding: Option<&GroundingMetadata>,
    mode: ValidationMode,
) -> Result<ItineraryResponse> {
    let mut response: ItineraryResponse = decode_structured(raw)?;
    mode.enforce(itinerary_violations(&response))?;

    if let Some(metadata) = grounding.filter(|m| !m.grounding_chunks.is_empty()) {
        response.sources = Some(extract_sources(metadata));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ContractError, types::TravelStyle};

    #[test]
    fn request_requires_every_activity_field() {
        for locale in [Locale::Korean, Locale::English] {
            for style in TravelStyle::ALL {
                for days in 1..=14 {
                    let inputs = TravelInputs::new("제주도", days, style);
                    let request = build_request(&inputs, locale, DEFAULT_ITINERARY_MODEL).unwrap();
                    let schema = request.response_schema.as_ref().unwrap();
                    let activity = &schema["properties"]["itinerary"]["items"]["properties"]
                        ["activities"]["items"];

                    let required: Vec<&str> = activity["required"]
                        .as_array()
                        .unwrap()
                        .iter()
                        .filter_map(|v| v.as_str())
                        .collect();
                    for field in ["time", "place", "description", "transportInfo", "address", "mapUrl"] {
                        assert!(required.contains(&field), "{field} not required");
                    }
                    assert_eq!(
                        activity["properties"]["time"]["enum"].as_array().unwrap().len(),
                        3
                    );
                    assert_eq!(request.tools, vec![BackendTool::GoogleSearch]);
                    assert_eq!(request.response_mime_type.as_deref(), Some("application/json"));
                }
            }
        }
    }

    #[test]
    fn out_of_range_days_never_build() {
        for days in [0, 15] {
            let inputs = TravelInputs::new("제주도", days, TravelStyle::Healing);
            assert!(matches!(
                build_request(&inputs, Locale::Korean, DEFAULT_ITINERARY_MODEL),
                Err(ContractError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn connection_test_is_capped() {
        let request = connection_test_request(DEFAULT_CONNECTION_TEST_MODEL);
        assert_eq!(request.prompt, CONNECTION_TEST_PROMPT);
        assert_eq!(request.max_output_tokens, Some(CONNECTION_TEST_MAX_TOKENS));
        assert!(request.tools.is_empty());
        assert!(request.response_schema.is_none());
    }

    #[test]
    fn absent_or_blank_text_is_empty_response() {
        for raw in [None, Some(""), Some("  \n ")] {
            assert!(matches!(
                parse_response(raw, None, ValidationMode::Strict),
                Err(ContractError::EmptyResponse)
            ));
        }
    }

    #[test]
    fn grounding_without_chunks_leaves_sources_absent() {
        let raw = include_str!("../../tests/fixtures/jeju_itinerary.json");
        let queries_only = GroundingMetadata {
            web_search_queries: vec!["제주 날씨".to_string()],
            grounding_chunks: Vec::new(),
        };

        for grounding in [GroundingMetadata::default(), queries_only] {
            let response = parse_response(Some(raw), Some(&grounding), ValidationMode::Strict).unwrap();
            assert_eq!(response.sources, None);
        }
    }

    #[test]
    fn broken_json_is_malformed() {
        assert!(matches!(
            parse_response(Some("{not valid json"), None, ValidationMode::Strict),
            Err(ContractError::MalformedResponse(_))
        ));
    }
}
