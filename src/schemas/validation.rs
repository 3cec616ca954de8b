use crate::{
    error::{ContractError, Result},
    schemas::SchemaHandle,
    types::ItineraryResponse,
};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;
pub const PACKING_ITEM_COUNT: usize = 3;

/// Validate a structured payload against a schema
pub fn validate_structured_payload(schema: &SchemaHandle, payload: &Value) -> Result<()> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.schema_json())
        .map_err(|err| {
            ContractError::Config(format!(
                "`{}` schema failed to compile: {}",
                schema.schema_name(),
                err
            ))
        })?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx == MAX_SCHEMA_ERRORS {
                truncated = true;
                break;
            }
            let mut path = error.instance_path.to_string();
            if path.is_empty() {
                path = "<root>".to_string();
            }
            details.push(format!("{}: {}", path, error));
        }

        let mut detail_str = if details.is_empty() {
            "payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };
        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(ContractError::MalformedResponse(format!(
            "payload does not match `{}` schema: {}",
            schema.schema_name(),
            detail_str
        )));
    }

    Ok(())
}

/// Contract properties the JSON schema cannot express. Returns one message
/// per violation.
pub fn itinerary_violations(response: &ItineraryResponse) -> Vec<String> {
    let mut violations = Vec::new();

    if response.itinerary.is_empty() {
        violations.push("itinerary has no days".to_string());
    }

    for (idx, day) in response.itinerary.iter().enumerate() {
        let expected = idx as u32 + 1;
        if day.day != expected {
            violations.push(format!(
                "itinerary[{}].day is {}, expected {}",
                idx, day.day, expected
            ));
        }
        if day.activities.is_empty() {
            violations.push(format!("itinerary[{}] has no activities", idx));
        }
    }

    if response.packing_items.len() != PACKING_ITEM_COUNT {
        violations.push(format!(
            "packingItems has {} entries, expected {}",
            response.packing_items.len(),
            PACKING_ITEM_COUNT
        ));
    }

    let costs = &response.estimated_costs;
    if !costs.is_consistent() {
        violations.push(format!(
            "estimatedCosts.total {} does not match itemized sum {}",
            costs.total,
            costs.component_sum()
        ));
    }

    violations
}

/// Length check that needs the original request.
pub fn day_count_violation(response: &ItineraryResponse, requested_days: u32) -> Option<String> {
    let actual = response.itinerary.len();
    (actual != requested_days as usize).then(|| {
        format!(
            "itinerary has {} days, {} were requested",
            actual, requested_days
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::ResponseSchema;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "destination": "부산",
            "duration": "1박 2일",
            "itinerary": [
                {
                    "day": 1,
                    "theme": "바다",
                    "activities": [{
                        "time": "오전",
                        "place": "해운대",
                        "description": "산책",
                        "transportInfo": "지하철 2호선 20분",
                        "address": "부산 해운대구 우동",
                        "mapUrl": "https://map.naver.com/p/search/해운대"
                    }],
                    "localTip": "아침 일찍",
                    "efficiencyNote": "동선 최소화",
                    "indoorAlternative": "아쿠아리움"
                },
                {
                    "day": 2,
                    "theme": "시장",
                    "activities": [{
                        "time": "afternoon",
                        "place": "자갈치시장",
                        "description": "회",
                        "transportInfo": "버스 30분",
                        "address": "부산 중구 자갈치해안로 52",
                        "mapUrl": "https://map.naver.com/p/search/자갈치시장"
                    }],
                    "localTip": "현금 준비",
                    "efficiencyNote": "남포동과 묶기",
                    "indoorAlternative": "국제시장"
                }
            ],
            "estimatedCosts": {
                "food": 100000,
                "transport": 20000,
                "activities": 30000,
                "accommodation": 150000,
                "total": 300000,
                "currency": "KRW"
            },
            "packingItems": ["우산", "선크림", "운동화"]
        })
    }

    #[test]
    fn well_formed_payload_passes_schema() {
        assert!(validate_structured_payload(ItineraryResponse::schema(), &payload()).is_ok());
    }

    #[test]
    fn missing_activity_field_is_reported_with_path() {
        let mut value = payload();
        value["itinerary"][0]["activities"][0]
            .as_object_mut()
            .unwrap()
            .remove("mapUrl");

        let err = validate_structured_payload(ItineraryResponse::schema(), &value).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("/itinerary/0/activities/0"), "{message}");
        assert!(message.contains("mapUrl"), "{message}");
    }

    #[test]
    fn unknown_time_slot_fails_schema() {
        let mut value = payload();
        value["itinerary"][1]["activities"][0]["time"] = json!("midnight");
        assert!(matches!(
            validate_structured_payload(ItineraryResponse::schema(), &value),
            Err(ContractError::MalformedResponse(_))
        ));
    }

    #[test]
    fn clean_itinerary_has_no_violations() {
        let response: ItineraryResponse = serde_json::from_value(payload()).unwrap();
        assert!(itinerary_violations(&response).is_empty());
        assert!(day_count_violation(&response, 2).is_none());
        assert!(day_count_violation(&response, 3).is_some());
    }

    #[test]
    fn gaps_packing_and_costs_are_all_reported() {
        let mut value = payload();
        value["itinerary"][1]["day"] = json!(3);
        value["packingItems"] = json!(["우산"]);
        value["estimatedCosts"]["total"] = json!(1);
        let response: ItineraryResponse = serde_json::from_value(value).unwrap();

        let violations = itinerary_violations(&response);
        assert_eq!(violations.len(), 3, "{violations:?}");
        assert!(violations[0].contains("itinerary[1].day is 3"));
    }
}
