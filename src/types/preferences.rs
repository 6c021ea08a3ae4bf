use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar-date format accepted for departure and return dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trip preferences collected from the traveler before plan generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPreferences {
    /// Destination city and country (e.g., "Paris, France")
    pub destination: String,
    /// Departure date in `YYYY-MM-DD` form
    pub departure_date: String,
    /// Return date in `YYYY-MM-DD` form
    pub return_date: String,
    /// Total budget in USD
    pub budget: f64,
    pub travelers: u32,
    /// Preferred lodging kind (hotel, airbnb, hostel, ...)
    pub accommodation_type: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

impl TravelPreferences {
    /// Check the preferences against today's local date.
    ///
    /// Returns every violation found; an empty list means the preferences are valid.
    pub fn validate(&self) -> Vec<String> {
        self.validate_on(Local::now().date_naive())
    }

    /// Check the preferences against an explicit current date
    pub fn validate_on(&self, today: NaiveDate) -> Vec<String> {
        let mut errors = Vec::new();

        match self.parsed_dates() {
            Some((departure, return_date)) => {
                if departure < today {
                    errors.push("Departure date cannot be in the past".to_string());
                }
                if return_date <= departure {
                    errors.push("Return date must be after departure date".to_string());
                }
            }
            None => errors.push("Please use YYYY-MM-DD format for dates".to_string()),
        }

        if self.budget.is_nan() || self.budget <= 0.0 {
            errors.push("Budget must be greater than 0".to_string());
        }

        if self.travelers < 1 {
            errors.push("Number of travelers must be at least 1".to_string());
        }

        if self.destination.trim().is_empty() {
            errors.push("Destination cannot be empty".to_string());
        }

        errors
    }

    /// Departure and return dates, or `None` when either fails to parse
    pub fn parsed_dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        let departure = NaiveDate::parse_from_str(&self.departure_date, DATE_FORMAT).ok()?;
        let return_date = NaiveDate::parse_from_str(&self.return_date, DATE_FORMAT).ok()?;
        Some((departure, return_date))
    }

    /// Trip length in whole days (return minus departure)
    pub fn duration_days(&self) -> Option<i64> {
        self.parsed_dates()
            .map(|(departure, return_date)| (return_date - departure).num_days())
    }
}
