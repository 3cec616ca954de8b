use serde_json::json;
use travel_buddy::{
    schemas::validation::validate_structured_payload, ItineraryResponse, ResponseSchema,
};

const JEJU: &str = include_str!("fixtures/jeju_itinerary.json");

#[test]
fn local_schema_requires_every_documented_field() {
    let schema = ItineraryResponse::schema().schema_json();

    let required: Vec<&str> = schema["required"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    for field in ["destination", "duration", "itinerary", "estimatedCosts", "packingItems"] {
        assert!(required.contains(&field), "{field} should be required");
    }
    assert!(!required.contains(&"realTimeHighlights"));
    assert!(!required.contains(&"sources"));

    let activity_required = schema["definitions"]["Activity"]["required"]
        .as_array()
        .unwrap();
    assert_eq!(activity_required.len(), 6);
}

#[test]
fn time_slot_enum_lists_both_locales() {
    let schema = ItineraryResponse::schema().schema_json();
    let labels = schema["definitions"]["TimeOfDay"]["enum"].as_array().unwrap();
    for label in ["morning", "afternoon", "evening", "오전", "오후", "저녁"] {
        assert!(labels.contains(&json!(label)), "{label} missing");
    }
}

#[test]
fn wrong_types_are_reported_up_to_three_times() {
    let mut payload: serde_json::Value = serde_json::from_str(JEJU).unwrap();
    payload["estimatedCosts"]["food"] = json!("많이");
    payload["estimatedCosts"]["transport"] = json!("조금");
    payload["estimatedCosts"]["activities"] = json!(null);
    payload["estimatedCosts"]["accommodation"] = json!([]);

    let message = validate_structured_payload(ItineraryResponse::schema(), &payload)
        .unwrap_err()
        .to_string();
    assert!(message.contains("/estimatedCosts"), "{message}");
    assert!(message.contains("additional errors truncated"), "{message}");
}

#[test]
fn fixture_payload_is_valid() {
    let payload: serde_json::Value = serde_json::from_str(JEJU).unwrap();
    assert!(validate_structured_payload(ItineraryResponse::schema(), &payload).is_ok());
}
