//! Itinerary service
//!
//! Turns a destination, budget and trip length into a prompt, forwards it to
//! a large-language-model provider and returns the generated travel
//! itinerary over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod prompt;
pub mod provider;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::{ItineraryConfig, ProviderKind};
pub use error::ItineraryError;
pub use models::{ItineraryResult, TravelRequest};
pub use prompt::render_prompt;
pub use provider::{GenerationRequest, TextGenerator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ItineraryError>;
