//! travel-agent-rs: an LLM-backed trip planner with an in-memory booking cart
//!
//! A [`TravelAgent`] validates [`TravelPreferences`], asks a chat-completion model
//! for a day-by-day [`TravelPlan`], and fetches destination tips. A
//! [`TravelSession`] holds one traveler's current plan and [`BookingCart`], whose
//! confirmation step is simulated locally.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use travel_agent_rs::{TravelAgent, TravelPreferences, TravelSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let agent = TravelAgent::from_env()?;
//!     let mut session = TravelSession::new();
//!
//!     let preferences = TravelPreferences {
//!         destination: "Paris, France".to_string(),
//!         departure_date: "2026-11-17".to_string(),
//!         return_date: "2026-11-24".to_string(),
//!         budget: 2000.0,
//!         travelers: 2,
//!         accommodation_type: "hotel".to_string(),
//!         activities: vec!["Museums".to_string()],
//!         dietary_restrictions: Vec::new(),
//!     };
//!
//!     let plan = session.generate_plan(&agent, preferences).await?;
//!     println!("{} days, about ${:.2}", plan.duration_days(), plan.estimated_cost);
//!
//!     let reference = session.book_accommodation(0)?;
//!     println!("Added {reference}");
//!     println!("{:?}", session.cart().confirm()?);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod error;
pub(crate) mod services;
pub mod types;

pub use crate::core::{
    BookingCart, ChatMessage, ConnectionOverrides, GenerationRequest, ModelSettings, Role,
    TextGenerator, TravelAgent, TravelSession,
};
pub use error::{Result, TravelError};
pub use services::openai_client::OpenAIClient;
pub use types::{
    AccommodationSuggestion, BookingCategory, BookingConfirmation, BookingItem, BookingLine,
    BookingReceipt, BookingSummary, DayPlan, FlightSuggestion, PlanResponse, TravelPlan,
    TravelPreferences,
};

#[cfg(feature = "cli")]
pub mod cli;
