pub mod booking;
mod lenient;
pub mod plan;
pub mod preferences;
pub mod response;

pub use booking::{
    BookingCategory, BookingConfirmation, BookingItem, BookingLine, BookingReceipt, BookingSummary,
};
pub use plan::{AccommodationSuggestion, DayPlan, FlightSuggestion, TravelPlan};
pub use preferences::{TravelPreferences, DATE_FORMAT};
pub use response::{parse_plan_response, plan_response_schema, PlanResponse};
