pub mod agent;
pub mod cart;
pub mod generator;
pub mod session;

pub use agent::{ConnectionOverrides, TravelAgent};
pub use cart::BookingCart;
pub use generator::{ChatMessage, GenerationRequest, ModelSettings, Role, TextGenerator};
pub use session::TravelSession;
