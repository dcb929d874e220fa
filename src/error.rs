//! Error types and handling for the itinerary service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Message reported when a provider answers without any usable text
pub const EMPTY_RESPONSE_MESSAGE: &str = "Failed to generate response.";

/// Main error type for the itinerary service
#[derive(Error, Debug)]
pub enum ItineraryError {
    /// Configuration-related errors, including missing credentials
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Any failure of the generation provider, carried as its raw message
    #[error("{message}")]
    Generation { message: String },

    /// The provider answered but produced no text
    #[error("{}", EMPTY_RESPONSE_MESSAGE)]
    EmptyResponse,

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ItineraryError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new generation error
    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for ItineraryError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ItineraryError>() {
            Ok(inner) => inner,
            Err(err) => ItineraryError::generation(format!("{err:#}")),
        }
    }
}

/// Body of every failed response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ItineraryError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
