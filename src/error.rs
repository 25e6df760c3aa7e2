//! Error conditions of the encounter pipeline.
//!
//! Progression transitions are total and never produce these; everything
//! here comes from the question source or from mapping a question.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum GameError {
  /// The question source was unreachable or answered with a non-success
  /// status. No automatic retry; the player can ask for a new encounter.
  #[error("question source fetch failed: {0}")]
  SourceFetch(String),

  /// The source answered, but with nothing usable: not an array, an empty
  /// array, or no record survived sanitization.
  #[error("question source has no usable questions")]
  EmptySource,

  /// A question passed sanitization but cannot be mapped (no options, or
  /// the correct label matches none of them). Recoverable by skipping to
  /// another question.
  #[error("malformed question {id}: {reason}")]
  MalformedQuestion { id: String, reason: String },
}

impl GameError {
  fn status(&self) -> StatusCode {
    match self {
      GameError::SourceFetch(_) => StatusCode::BAD_GATEWAY,
      GameError::EmptySource => StatusCode::SERVICE_UNAVAILABLE,
      GameError::MalformedQuestion { .. } => StatusCode::BAD_GATEWAY,
    }
  }
}

impl IntoResponse for GameError {
  fn into_response(self) -> Response {
    let body = serde_json::json!({ "error": self.to_string() });
    (self.status(), Json(body)).into_response()
  }
}
