use serde_json::{Map, Value};
use tracing::info;

use crate::{
    core::{agent::TravelAgent, cart::BookingCart},
    error::{Result, TravelError},
    types::{BookingCategory, BookingItem, TravelPlan, TravelPreferences},
};

/// State owned by one traveler: the booking cart and the most recent plan.
///
/// Each session is independent; nothing here is shared between sessions.
#[derive(Debug, Default)]
pub struct TravelSession {
    cart: BookingCart,
    current_plan: Option<TravelPlan>,
    preferences: Option<TravelPreferences>,
}

impl TravelSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a plan and make it the session's current plan.
    ///
    /// On failure the previous plan stays in place.
    pub async fn generate_plan(
        &mut self,
        agent: &TravelAgent,
        preferences: TravelPreferences,
    ) -> Result<&TravelPlan> {
        let plan = agent.generate_plan(&preferences).await?;
        self.preferences = Some(preferences);
        Ok(&*self.current_plan.insert(plan))
    }

    pub fn current_plan(&self) -> Option<&TravelPlan> {
        self.current_plan.as_ref()
    }

    /// Preferences that produced the current plan
    pub fn preferences(&self) -> Option<&TravelPreferences> {
        self.preferences.as_ref()
    }

    pub fn cart(&self) -> &BookingCart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut BookingCart {
        &mut self.cart
    }

    /// Add the accommodation suggestion at `index` for the whole stay.
    ///
    /// The item is dated on the departure day and priced at the nightly rate
    /// times the number of itinerary days.
    pub fn book_accommodation(&mut self, index: usize) -> Result<String> {
        let plan = self.current_plan.as_ref().ok_or(TravelError::NoPlan)?;
        let suggestion = plan.accommodation_suggestions.get(index).ok_or_else(|| {
            TravelError::NotFound(format!("accommodation suggestion #{index}"))
        })?;

        let date = self
            .preferences
            .as_ref()
            .map(|prefs| prefs.departure_date.clone())
            .unwrap_or_default();
        let price = suggestion.price_per_night * plan.duration_days() as f64;

        let item = BookingItem::new(
            BookingCategory::Hotel,
            suggestion.name.clone(),
            date,
            price,
            to_details(suggestion)?,
        )?;

        let reference = self.cart.add(item);
        info!(%reference, hotel = %suggestion.name, "accommodation added to cart");
        Ok(reference)
    }

    /// Add the flight suggestion at `index`, priced at its estimated fare
    pub fn book_flight(&mut self, index: usize) -> Result<String> {
        let plan = self.current_plan.as_ref().ok_or(TravelError::NoPlan)?;
        let suggestion = plan
            .flight_suggestions
            .get(index)
            .ok_or_else(|| TravelError::NotFound(format!("flight suggestion #{index}")))?;

        let item = BookingItem::new(
            BookingCategory::Flight,
            format!("Flight - {}", suggestion.route),
            suggestion.departure_time.clone(),
            suggestion.estimated_price,
            to_details(suggestion)?,
        )?;

        let reference = self.cart.add(item);
        info!(%reference, route = %suggestion.route, "flight added to cart");
        Ok(reference)
    }
}

fn to_details<T: serde::Serialize>(suggestion: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(suggestion)? {
        Value::Object(map) => Ok(map),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            Ok(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccommodationSuggestion, DayPlan, FlightSuggestion};

    fn session_with_plan() -> TravelSession {
        TravelSession {
            current_plan: Some(TravelPlan {
                destination: "Paris".to_string(),
                itinerary: vec![DayPlan::default(); 3],
                accommodation_suggestions: vec![AccommodationSuggestion {
                    name: "Hotel Lutetia".to_string(),
                    kind: "hotel".to_string(),
                    price_per_night: 120.0,
                    rating: Some(4.5),
                    location: "Saint-Germain".to_string(),
                    amenities: vec!["wifi".to_string()],
                }],
                flight_suggestions: vec![FlightSuggestion {
                    route: "JFK - CDG".to_string(),
                    departure_time: "2026-11-17 08:00".to_string(),
                    arrival_time: "2026-11-17 20:00".to_string(),
                    estimated_price: 450.0,
                    airline: "Air France".to_string(),
                }],
                ..Default::default()
            }),
            preferences: Some(TravelPreferences {
                destination: "Paris".to_string(),
                departure_date: "2026-11-17".to_string(),
                return_date: "2026-11-20".to_string(),
                budget: 2000.0,
                travelers: 2,
                accommodation_type: "hotel".to_string(),
                activities: Vec::new(),
                dietary_restrictions: Vec::new(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_book_accommodation_prices_whole_stay() {
        let mut session = session_with_plan();
        let reference = session.book_accommodation(0).unwrap();

        assert_eq!(reference, "HOTEL-0001");
        let item = &session.cart().items()[0];
        assert_eq!(item.name(), "Hotel Lutetia");
        assert_eq!(item.date(), "2026-11-17");
        assert!((item.price() - 360.0).abs() < 1e-9);
        assert_eq!(item.details()["type"], "hotel");
        assert_eq!(item.details()["rating"], 4.5);
    }

    #[test]
    fn test_book_flight() {
        let mut session = session_with_plan();
        session.book_accommodation(0).unwrap();
        let reference = session.book_flight(0).unwrap();

        assert_eq!(reference, "FLIGHT-0002");
        let item = &session.cart().items()[1];
        assert_eq!(item.name(), "Flight - JFK - CDG");
        assert_eq!(item.date(), "2026-11-17 08:00");
        assert_eq!(item.details()["airline"], "Air France");
        assert!((session.cart().total_cost() - 810.0).abs() < 1e-9);
    }

    #[test]
    fn test_booking_requires_plan() {
        let mut session = TravelSession::new();
        assert!(matches!(
            session.book_flight(0).unwrap_err(),
            TravelError::NoPlan
        ));
    }

    #[test]
    fn test_booking_out_of_range() {
        let mut session = session_with_plan();
        let error = session.book_accommodation(4).unwrap_err();
        assert_eq!(error.error_code(), "NOT_FOUND");
        assert!(session.cart().is_empty());
    }
}
