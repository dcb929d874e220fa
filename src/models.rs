//! Request and response bodies of the itinerary endpoint

use serde::{Deserialize, Serialize};

/// Trip description sent by the caller.
///
/// Only the JSON shape is checked. Zero days, a negative budget or an empty
/// location are forwarded to the prompt as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelRequest {
    pub location: String,
    pub budget: f64,
    pub days: i64,
}

/// Generated itinerary returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryResult {
    pub itinerary: String,
}

impl From<String> for ItineraryResult {
    fn from(itinerary: String) -> Self {
        Self { itinerary }
    }
}
