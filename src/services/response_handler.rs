use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::{
    error::{ContractError, Result},
    schemas::{validation::validate_structured_payload, ResponseSchema},
    services::gemini_types::GroundingMetadata,
    types::{deserialize_structured_response, GroundingSource, SOURCE_TITLE_PLACEHOLDER},
};

/// Remove Markdown code-fence markers wherever they appear.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Decode model text into `T`: fence stripping, JSON parsing, schema
/// validation, then typed deserialization.
pub fn decode_structured<T: ResponseSchema>(raw: Option<&str>) -> Result<T> {
    let raw = raw
        .filter(|text| !text.trim().is_empty())
        .ok_or(ContractError::EmptyResponse)?;

    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(&cleaned).map_err(|err| {
        debug!(target: "travel_buddy::response", error = %err, "response text is not JSON");
        ContractError::MalformedResponse(format!("response is not valid JSON: {err}"))
    })?;

    let schema = T::schema();
    if let Err(err) = validate_structured_payload(schema, &value) {
        debug!(
            target: "travel_buddy::response",
            schema = schema.schema_name(),
            error = %err,
            payload = %value,
            "payload rejected by schema"
        );
        return Err(err);
    }

    deserialize_structured_response(&value, schema)
}

/// Web references from grounding metadata, first occurrence per URI kept.
pub fn extract_sources(metadata: &GroundingMetadata) -> Vec<GroundingSource> {
    let mut seen = HashSet::new();

    metadata
        .grounding_chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let uri = web.uri.as_deref()?;
            let title = web
                .title
                .as_deref()
                .filter(|title| !title.trim().is_empty())
                .unwrap_or(SOURCE_TITLE_PLACEHOLDER);
            Some(GroundingSource {
                title: title.to_string(),
                uri: uri.to_string(),
            })
        })
        .filter(|source| seen.insert(source.uri.clone()))
        .collect()
}
