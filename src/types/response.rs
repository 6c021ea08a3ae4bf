use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    lenient,
    plan::{AccommodationSuggestion, DayPlan, FlightSuggestion},
};
use crate::error::{Result, TravelError};

/// JSON object the model is asked to return for a plan request.
///
/// Every field is optional; anything the model leaves out (or sends as `null`)
/// falls back to an empty list or zero. Numbers may arrive as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PlanResponse {
    /// Day-by-day itinerary, one entry per day of the trip
    pub itinerary: Vec<DayPlan>,
    /// Lodging options that fit the budget
    pub accommodation_suggestions: Vec<AccommodationSuggestion>,
    /// Flight options to and from the destination
    pub flight_suggestions: Vec<FlightSuggestion>,
    /// Total estimated cost of the trip in USD
    #[serde(deserialize_with = "lenient::amount")]
    pub estimated_total_cost: f64,
    /// Practical recommendations for the trip
    pub recommendations: Vec<String>,
}

/// JSON Schema for [`PlanResponse`], generated once per process
pub fn plan_response_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let root = schemars::schema_for!(PlanResponse);
        serde_json::to_value(root)
            .unwrap_or_else(|err| panic!("failed to serialize plan response schema: {}", err))
    })
}

/// Parse raw model output into a [`PlanResponse`].
///
/// The text must be a single JSON object; surrounding whitespace is ignored.
pub fn parse_plan_response(raw: &str) -> Result<PlanResponse> {
    let mut value: Value = serde_json::from_str(raw.trim())
        .map_err(|err| TravelError::Parse(format!("response is not valid JSON ({err})")))?;

    if !value.is_object() {
        return Err(TravelError::Parse(
            "response is not a JSON object".to_string(),
        ));
    }

    strip_nulls(&mut value);

    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        TravelError::Parse(format!("unexpected value at {}: {}", location, err.inner()))
    })
}

/// Drop `null` object members so field defaults apply to them
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, member| !member.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_response() {
        let raw = r#"
        {
            "itinerary": [
                {"day": 1, "date": "2026-11-17", "activities": ["Eiffel Tower"],
                 "meals": ["Cafe de Flore"], "estimated_cost": 150.0}
            ],
            "accommodation_suggestions": [
                {"name": "Hotel Lutetia", "type": "hotel", "price_per_night": 120.0,
                 "rating": 4.5, "location": "Saint-Germain", "amenities": ["wifi"]}
            ],
            "flight_suggestions": [
                {"route": "JFK - CDG", "departure_time": "2026-11-17 08:00",
                 "arrival_time": "2026-11-17 20:00", "estimated_price": 450.0,
                 "airline": "Air France"}
            ],
            "estimated_total_cost": 2500.0,
            "recommendations": ["Book flights early"]
        }
        "#;

        let response = parse_plan_response(raw).unwrap();
        assert_eq!(response.itinerary.len(), 1);
        assert_eq!(response.itinerary[0].activities, vec!["Eiffel Tower"]);
        assert_eq!(response.accommodation_suggestions[0].rating, Some(4.5));
        assert_eq!(response.flight_suggestions[0].airline, "Air France");
        assert_eq!(response.estimated_total_cost, 2500.0);
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let raw = r#"{"itinerary": [{"day": 1, "meals": null}], "estimated_total_cost": null}"#;

        let response = parse_plan_response(raw).unwrap();
        assert_eq!(response.itinerary.len(), 1);
        assert!(response.itinerary[0].meals.is_empty());
        assert!(response.accommodation_suggestions.is_empty());
        assert!(response.recommendations.is_empty());
        assert_eq!(response.estimated_total_cost, 0.0);
    }

    #[test]
    fn test_rejects_non_json() {
        let error = parse_plan_response("Here is your plan: day one...").unwrap_err();
        assert_eq!(error.error_code(), "PARSE_ERROR");
        assert!(error.to_string().contains("Please try again"));
    }

    #[test]
    fn test_rejects_non_object() {
        let error = parse_plan_response("[1, 2, 3]").unwrap_err();
        assert!(matches!(error, TravelError::Parse(_)));
    }

    #[test]
    fn test_loose_numbers_do_not_fail_the_plan() {
        let raw = r#"
        {
            "itinerary": [{"day": 1.0, "estimated_cost": "150.00"}, {"day": "one"}],
            "accommodation_suggestions": [{"name": "Hotel Lutetia", "rating": "4.5/5"}],
            "flight_suggestions": [{"route": "JFK - CDG", "estimated_price": 450}],
            "estimated_total_cost": "2,500"
        }
        "#;

        let response = parse_plan_response(raw).unwrap();
        assert_eq!(response.itinerary[0].day, 1);
        assert_eq!(response.itinerary[0].estimated_cost, 150.0);
        assert_eq!(response.itinerary[1].day, 0);
        assert_eq!(response.accommodation_suggestions[0].rating, None);
        assert_eq!(response.flight_suggestions[0].estimated_price, 450.0);
        assert_eq!(response.estimated_total_cost, 2500.0);
    }

    #[test]
    fn test_type_mismatch_reports_path() {
        let error =
            parse_plan_response(r#"{"itinerary": [{"activities": "Louvre"}]}"#).unwrap_err();
        assert!(error.to_string().contains("itinerary[0].activities"));
    }

    #[test]
    fn test_schema_lists_top_level_fields() {
        let schema = plan_response_schema();
        let properties = schema["properties"].as_object().unwrap();
        for field in [
            "itinerary",
            "accommodation_suggestions",
            "flight_suggestions",
            "estimated_total_cost",
            "recommendations",
        ] {
            assert!(properties.contains_key(field), "missing {field}");
        }
        assert!(schema["definitions"]["AccommodationSuggestion"]["properties"]
            .get("type")
            .is_some());
    }
}
