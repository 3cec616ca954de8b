//! Response schema in the OpenAPI subset Gemini accepts for
//! `generationConfig.responseSchema`. Gemini rejects `$ref` and
//! `definitions`, so the schemars output cannot be sent as-is.

use serde_json::{json, Value};

use crate::types::{Locale, TimeOfDay};

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn number() -> Value {
    json!({ "type": "NUMBER" })
}

fn activity_schema(locale: Locale) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "time": { "type": "STRING", "enum": TimeOfDay::labels(locale) },
            "place": string(),
            "description": string(),
            "transportInfo": string(),
            "address": string(),
            "mapUrl": string(),
        },
        "required": ["time", "place", "description", "transportInfo", "address", "mapUrl"]
    })
}

fn day_plan_schema(locale: Locale) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "day": { "type": "INTEGER" },
            "theme": string(),
            "activities": { "type": "ARRAY", "items": activity_schema(locale) },
            "localTip": string(),
            "efficiencyNote": string(),
            "indoorAlternative": string(),
        },
        "required": ["day", "theme", "activities", "localTip", "efficiencyNote", "indoorAlternative"]
    })
}

fn estimated_costs_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "food": number(),
            "transport": number(),
            "activities": number(),
            "accommodation": number(),
            "total": number(),
            "currency": string(),
        },
        "required": ["food", "transport", "activities", "accommodation", "total", "currency"]
    })
}

/// Schema for `ItineraryResponse`, minus the locally attached `sources`.
pub fn itinerary_response_schema(locale: Locale) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "destination": string(),
            "duration": string(),
            "packingItems": { "type": "ARRAY", "items": string() },
            "realTimeHighlights": string(),
            "itinerary": { "type": "ARRAY", "items": day_plan_schema(locale) },
            "estimatedCosts": estimated_costs_schema(),
        },
        "required": [
            "destination",
            "duration",
            "itinerary",
            "estimatedCosts",
            "packingItems",
            "realTimeHighlights"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_enum_follows_locale() {
        let ko = itinerary_response_schema(Locale::Korean);
        let en = itinerary_response_schema(Locale::English);
        let path = |schema: &Value| {
            schema["properties"]["itinerary"]["items"]["properties"]["activities"]["items"]
                ["properties"]["time"]["enum"]
                .clone()
        };
        assert_eq!(path(&ko), json!(["오전", "오후", "저녁"]));
        assert_eq!(path(&en), json!(["morning", "afternoon", "evening"]));
    }

    #[test]
    fn no_references_are_emitted() {
        let text = itinerary_response_schema(Locale::Korean).to_string();
        assert!(!text.contains("$ref"));
        assert!(!text.contains("definitions"));
    }
}
