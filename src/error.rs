//! Error taxonomy: client faults are rejected with 400 and a JSON body;
//! the pure core never fails for well-formed input.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Errors raised inside the progression engine. No session state is
/// mutated when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("answer {0:?} is not a number")]
    MalformedAnswer(String),
}

/// API-facing errors. Everything here is a client fault (400); an
/// unexpected panic in the core would surface as axum's generic 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("level {0} is not in the configured levels")]
    InvalidLevel(u32),
    #[error("answer {0:?} is not a number")]
    MalformedAnswer(String),
    #[error("malformed session state: {0}")]
    MalformedState(String),
}

impl From<RoundError> for ApiError {
    fn from(e: RoundError) -> Self {
        match e {
            RoundError::MalformedAnswer(s) => ApiError::MalformedAnswer(s),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::MalformedState(e.to_string())
    }
}

#[derive(Serialize)]
struct ErrorOut {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(target: "mathdrill_backend", error = %self, "Rejecting request");
        let body = ErrorOut { message: self.to_string() };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_error_maps_to_malformed_answer() {
        let api: ApiError = RoundError::MalformedAnswer("abc".into()).into();
        assert!(matches!(api, ApiError::MalformedAnswer(ref s) if s == "abc"));
    }

    #[test]
    fn messages_are_descriptive() {
        assert_eq!(
            ApiError::InvalidLevel(7).to_string(),
            "level 7 is not in the configured levels"
        );
    }
}
