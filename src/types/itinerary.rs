use crate::response_schema;
use schemars::{
    gen::SchemaGenerator,
    schema::{InstanceType, Schema, SchemaObject},
    JsonSchema,
};
use serde::{Deserialize, Serialize};

use super::inputs::Locale;

/// Title given to grounding references the backend did not name.
pub const SOURCE_TITLE_PLACEHOLDER: &str = "참고 웹사이트";

/// Complete itinerary returned for one generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[response_schema(name = "ItineraryResponse")]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    /// Destination the itinerary was generated for
    pub destination: String,
    /// Human readable trip length (e.g. "2박 3일")
    pub duration: String,
    /// Day-by-day plan in chronological order
    pub itinerary: Vec<DayPlan>,
    /// Cost estimate for the whole trip
    pub estimated_costs: EstimatedCosts,
    /// Three items to pack for the current local weather
    pub packing_items: Vec<String>,
    /// Current weather, temperature, and ongoing festivals or events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_time_highlights: Option<String>,
    /// Web pages the backend grounded its answer on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<GroundingSource>>,
}

/// One day of the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// 1-based day counter
    pub day: u32,
    pub theme: String,
    pub activities: Vec<Activity>,
    pub local_tip: String,
    /// How the day's route saves time or effort
    pub efficiency_note: String,
    /// Plan B for bad weather
    pub indoor_alternative: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub time: TimeOfDay,
    pub place: String,
    pub description: String,
    /// Transport mode and travel time from the previous stop
    pub transport_info: String,
    /// Street address of the place
    pub address: String,
    /// Link to the place on the locale's map service
    pub map_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedCosts {
    pub food: f64,
    pub transport: f64,
    pub activities: f64,
    pub accommodation: f64,
    pub total: f64,
    pub currency: String,
}

impl EstimatedCosts {
    pub fn component_sum(&self) -> f64 {
        self.food + self.transport + self.activities + self.accommodation
    }

    /// Whether `total` matches the itemized costs within `max(1, 1%)`.
    pub fn is_consistent(&self) -> bool {
        let sum = self.component_sum();
        let tolerance = (sum.abs() * 0.01).max(1.0);
        (self.total - sum).abs() <= tolerance
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// Slot of the day an activity is scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    #[serde(alias = "오전")]
    Morning,
    #[serde(alias = "오후")]
    Afternoon,
    #[serde(alias = "저녁")]
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening];

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (TimeOfDay::Morning, Locale::Korean) => "오전",
            (TimeOfDay::Afternoon, Locale::Korean) => "오후",
            (TimeOfDay::Evening, Locale::Korean) => "저녁",
            (TimeOfDay::Morning, Locale::English) => "morning",
            (TimeOfDay::Afternoon, Locale::English) => "afternoon",
            (TimeOfDay::Evening, Locale::English) => "evening",
        }
    }

    /// Enumeration the backend must pick from for `locale`
    pub fn labels(locale: Locale) -> [&'static str; 3] {
        TimeOfDay::ALL.map(|slot| slot.label(locale))
    }
}

// Accepts the labels of every locale, matching what deserialization accepts.
impl JsonSchema for TimeOfDay {
    fn schema_name() -> String {
        "TimeOfDay".to_string()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        let labels = [Locale::English, Locale::Korean]
            .into_iter()
            .flat_map(TimeOfDay::labels)
            .map(serde_json::Value::from)
            .collect();

        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            enum_values: Some(labels),
            ..Default::default()
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn time_of_day_accepts_korean_labels() {
        let slot: TimeOfDay = serde_json::from_value(json!("저녁")).unwrap();
        assert_eq!(slot, TimeOfDay::Evening);
        let slot: TimeOfDay = serde_json::from_value(json!("morning")).unwrap();
        assert_eq!(slot, TimeOfDay::Morning);
        assert!(serde_json::from_value::<TimeOfDay>(json!("night")).is_err());
    }

    #[test]
    fn cost_consistency_allows_rounding() {
        let mut costs = EstimatedCosts {
            food: 150_000.0,
            transport: 80_000.0,
            activities: 70_000.0,
            accommodation: 300_000.0,
            total: 600_000.0,
            currency: "KRW".to_string(),
        };
        assert!(costs.is_consistent());

        costs.total = 603_000.0;
        assert!(costs.is_consistent());

        costs.total = 700_000.0;
        assert!(!costs.is_consistent());
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let response = ItineraryResponse {
            destination: "제주도".to_string(),
            duration: "2박 3일".to_string(),
            itinerary: Vec::new(),
            estimated_costs: EstimatedCosts {
                food: 0.0,
                transport: 0.0,
                activities: 0.0,
                accommodation: 0.0,
                total: 0.0,
                currency: "KRW".to_string(),
            },
            packing_items: Vec::new(),
            real_time_highlights: None,
            sources: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("realTimeHighlights").is_none());
        assert!(value.get("sources").is_none());
        assert!(value.get("estimatedCosts").is_some());
    }
}
