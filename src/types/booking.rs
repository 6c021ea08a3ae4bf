use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{Result, TravelError};

/// Kind of bookable item held in the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingCategory {
    Flight,
    Hotel,
    Activity,
}

impl BookingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingCategory::Flight => "flight",
            BookingCategory::Hotel => "hotel",
            BookingCategory::Activity => "activity",
        }
    }

    /// Prefix used in cart references (e.g. `HOTEL`)
    pub fn reference_prefix(&self) -> &'static str {
        match self {
            BookingCategory::Flight => "FLIGHT",
            BookingCategory::Hotel => "HOTEL",
            BookingCategory::Activity => "ACTIVITY",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BookingCategory::Flight => "Flight",
            BookingCategory::Hotel => "Hotel",
            BookingCategory::Activity => "Activity",
        }
    }
}

impl fmt::Display for BookingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One priced, categorized entry in the booking cart.
///
/// Items are built with [`BookingItem::new`] and cannot be changed afterwards;
/// the reference stays empty until the cart assigns it on insertion.
///
/// ```compile_fail
/// use serde_json::Map;
/// use travel_agent_rs::{BookingCategory, BookingItem};
///
/// let mut item =
///     BookingItem::new(BookingCategory::Hotel, "Hotel", "2026-11-17", 10.0, Map::new()).unwrap();
/// item.price = -500.0;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingItem {
    #[serde(rename = "type")]
    category: BookingCategory,
    name: String,
    date: String,
    price: f64,
    details: Map<String, Value>,
    reference: Option<String>,
}

impl BookingItem {
    pub fn new(
        category: BookingCategory,
        name: impl Into<String>,
        date: impl Into<String>,
        price: f64,
        details: Map<String, Value>,
    ) -> Result<Self> {
        if !price.is_finite() || price < 0.0 {
            return Err(TravelError::invalid(format!(
                "Booking price must be a non-negative amount, got {price}"
            )));
        }

        Ok(Self {
            category,
            name: name.into(),
            date: date.into(),
            price,
            details,
            reference: None,
        })
    }

    pub fn category(&self) -> BookingCategory {
        self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Price in USD, always finite and non-negative
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn details(&self) -> &Map<String, Value> {
        &self.details
    }

    /// Reference assigned by the cart, `None` before insertion
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub(crate) fn assign_reference(&mut self, reference: String) {
        self.reference = Some(reference);
    }
}

/// Read-only projection of one cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingLine {
    pub reference: String,
    #[serde(rename = "type")]
    pub category: BookingCategory,
    pub name: String,
    pub date: String,
    pub price: f64,
    pub details: Map<String, Value>,
}

/// Snapshot of the cart contents in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub total_items: usize,
    pub total_cost: f64,
    pub bookings: Vec<BookingLine>,
}

/// Simulated confirmation for a single cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub reference: String,
    pub status: String,
    pub confirmation_code: String,
    pub message: String,
}

/// Outcome of a successful simulated checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub success: bool,
    pub total_cost: f64,
    pub bookings: Vec<BookingConfirmation>,
    pub message: String,
}
