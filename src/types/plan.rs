use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{lenient, response::PlanResponse};

/// Structured travel plan produced by a successful generation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelPlan {
    pub destination: String,
    pub itinerary: Vec<DayPlan>,
    pub accommodation_suggestions: Vec<AccommodationSuggestion>,
    pub flight_suggestions: Vec<FlightSuggestion>,
    /// Total estimated cost of the whole trip in USD
    pub estimated_cost: f64,
    pub recommendations: Vec<String>,
}

impl TravelPlan {
    pub fn from_response(destination: impl Into<String>, response: PlanResponse) -> Self {
        Self {
            destination: destination.into(),
            itinerary: response.itinerary,
            accommodation_suggestions: response.accommodation_suggestions,
            flight_suggestions: response.flight_suggestions,
            estimated_cost: response.estimated_total_cost,
            recommendations: response.recommendations,
        }
    }

    /// Number of itinerary days
    pub fn duration_days(&self) -> usize {
        self.itinerary.len()
    }

    /// Activities planned across every day
    pub fn activity_count(&self) -> usize {
        self.itinerary.iter().map(|day| day.activities.len()).sum()
    }
}

/// Per-day itinerary details with activities, meals and a cost estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DayPlan {
    /// 1-based day counter within the itinerary
    #[serde(deserialize_with = "lenient::counter")]
    pub day: u32,
    /// Calendar date of the day in YYYY-MM-DD form
    pub date: String,
    /// Activities or attractions for the day in chronological order
    pub activities: Vec<String>,
    /// Breakfast, lunch and dinner suggestions
    pub meals: Vec<String>,
    /// Estimated total spend for the day in USD
    #[serde(deserialize_with = "lenient::amount")]
    pub estimated_cost: f64,
}

/// Lodging suggestion returned with the plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AccommodationSuggestion {
    pub name: String,
    /// Lodging kind: hotel, airbnb, hostel, ...
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::amount")]
    pub price_per_night: f64,
    /// Guest rating out of 5
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_number"
    )]
    pub rating: Option<f64>,
    /// Neighborhood or area (e.g., "City Center")
    pub location: String,
    pub amenities: Vec<String>,
}

/// Flight suggestion returned with the plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FlightSuggestion {
    /// Route in "Origin - Destination" form
    pub route: String,
    /// Local departure time, e.g. "2024-01-15 08:00"
    pub departure_time: String,
    /// Local arrival time, e.g. "2024-01-15 12:00"
    pub arrival_time: String,
    /// Estimated fare in USD
    #[serde(deserialize_with = "lenient::amount")]
    pub estimated_price: f64,
    pub airline: String,
}
