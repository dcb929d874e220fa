use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use tracing::{error, info, instrument};

use crate::{
    models::{ItineraryResult, TravelRequest},
    provider::TextGenerator,
};

/// Shared handler state. The provider is built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(provider: Arc<dyn TextGenerator>) -> Self {
        Self { provider }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate-itinerary", post(generate_itinerary))
        .with_state(state)
}

#[instrument(skip_all, fields(location = %request.location, days = request.days))]
async fn generate_itinerary(
    State(state): State<AppState>,
    Json(request): Json<TravelRequest>,
) -> crate::Result<Json<ItineraryResult>> {
    let generation = state.provider.request_for(request.to_prompt());

    match state.provider.generate(&generation).await {
        Ok(itinerary) => {
            info!(
                provider = state.provider.name(),
                chars = itinerary.len(),
                "Generated itinerary"
            );
            Ok(Json(ItineraryResult::from(itinerary)))
        }
        Err(e) => {
            error!(provider = state.provider.name(), "Itinerary generation failed: {e:#}");
            Err(e.into())
        }
    }
}
