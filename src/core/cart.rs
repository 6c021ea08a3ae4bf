use crate::{
    error::{Result, TravelError},
    types::{BookingConfirmation, BookingItem, BookingLine, BookingReceipt, BookingSummary},
};
use tracing::info;

/// In-memory booking cart owned by a single session.
///
/// References are derived from the cart position at insertion time
/// (`HOTEL-0001`, `FLIGHT-0002`, ...), so an item added after a removal can reuse
/// the reference of an item that left the cart.
#[derive(Debug, Default, Clone)]
pub struct BookingCart {
    items: Vec<BookingItem>,
    total_cost: f64,
}

impl BookingCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item and return the reference assigned to it
    pub fn add(&mut self, mut item: BookingItem) -> String {
        let reference = format!(
            "{}-{:04}",
            item.category().reference_prefix(),
            self.items.len() + 1
        );
        item.assign_reference(reference.clone());

        self.total_cost += item.price();
        info!(target: "travel_agent::cart", %reference, price = item.price(), "added booking");
        self.items.push(item);

        reference
    }

    /// Remove the first item carrying `reference`; `false` when nothing matched
    pub fn remove(&mut self, reference: &str) -> bool {
        let Some(index) = self
            .items
            .iter()
            .position(|item| item.reference() == Some(reference))
        else {
            return false;
        };

        let item = self.items.remove(index);
        self.total_cost -= item.price();
        info!(target: "travel_agent::cart", %reference, "removed booking");
        true
    }

    pub fn summary(&self) -> BookingSummary {
        BookingSummary {
            total_items: self.items.len(),
            total_cost: self.total_cost,
            bookings: self
                .items
                .iter()
                .map(|item| BookingLine {
                    reference: item.reference().unwrap_or_default().to_string(),
                    category: item.category(),
                    name: item.name().to_string(),
                    date: item.date().to_string(),
                    price: item.price(),
                    details: item.details().clone(),
                })
                .collect(),
        }
    }

    /// Simulate booking every item in the cart.
    ///
    /// Nothing is sent anywhere and the cart is left as is.
    pub fn confirm(&self) -> Result<BookingReceipt> {
        if self.items.is_empty() {
            return Err(TravelError::EmptyCart);
        }

        let bookings = self
            .items
            .iter()
            .map(|item| {
                let reference = item.reference().unwrap_or_default().to_string();
                BookingConfirmation {
                    confirmation_code: format!("CONF-{reference}"),
                    reference,
                    status: "confirmed".to_string(),
                    message: format!("{} booking confirmed", item.category().title()),
                }
            })
            .collect();

        Ok(BookingReceipt {
            success: true,
            total_cost: self.total_cost,
            bookings,
            message: format!("Successfully booked {} items", self.items.len()),
        })
    }

    pub fn items(&self) -> &[BookingItem] {
        &self.items
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
