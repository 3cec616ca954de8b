use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use travel_buddy::{
    response_schema, types::deserialize_structured_response, ContractError, ResponseSchema,
};

/// Weather snapshot for a destination.
#[derive(Debug, Deserialize, JsonSchema)]
#[response_schema(name = "WeatherSnapshot")]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    /// Air temperature in Celsius
    temperature_c: f64,
    /// Festivals running today
    #[serde(default)]
    ongoing_events: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[response_schema(description = "Free-form note")]
struct Described {
    note: String,
}

#[test]
fn explicit_name_and_doc_description_are_applied() {
    let handle = Snapshot::schema();
    assert_eq!(handle.schema_name(), "WeatherSnapshot");
    assert_eq!(handle.type_name(), "Snapshot");

    let schema = handle.schema_json();
    assert_eq!(
        schema["description"],
        "Weather snapshot for a destination."
    );
    assert_eq!(
        schema["properties"]["temperatureC"]["description"],
        "Air temperature in Celsius"
    );
}

#[test]
fn schema_name_defaults_to_struct_ident() {
    let handle = Described::schema();
    assert_eq!(handle.schema_name(), "Described");
    assert_eq!(handle.schema_json()["title"], "Described");
    assert!(handle.schema_json()["description"].is_string());
    assert!(std::ptr::eq(handle, Described::schema()));
}

#[test]
fn structured_payload_round_trips_through_handle() {
    let snapshot: Snapshot = deserialize_structured_response(
        &json!({ "temperatureC": 18.5, "ongoingEvents": ["들불축제"] }),
        Snapshot::schema(),
    )
    .unwrap();
    assert_eq!(snapshot.temperature_c, 18.5);
    assert_eq!(snapshot.ongoing_events.unwrap(), vec!["들불축제"]);
}

#[test]
fn mismatched_handle_is_rejected() {
    let result = deserialize_structured_response::<Snapshot>(
        &json!({ "note": "x" }),
        Described::schema(),
    );
    assert!(matches!(result, Err(ContractError::Config(_))));
}

#[test]
fn type_errors_name_the_field_path() {
    let err = deserialize_structured_response::<Snapshot>(
        &json!({ "temperatureC": "warm" }),
        Snapshot::schema(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("temperatureC"), "{err}");
}
