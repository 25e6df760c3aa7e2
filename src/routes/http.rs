//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs include parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{State, Query}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::GameError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state), fields(category = %q.category.clone().unwrap_or_else(|| "random".into())))]
pub async fn http_get_encounter(
  State(state): State<Arc<AppState>>,
  Query(q): Query<EncounterQuery>,
) -> Result<Json<EncounterOut>, GameError> {
  let out = request_encounter(&state, q.category).await?;
  info!(target: "encounter", id = %out.id, label = %out.label, "HTTP encounter served");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, body), fields(%body.question_id, %body.correct))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> impl IntoResponse {
  let out = resolve_answer(&state, &body.question_id, &body.category, body.correct).await;
  info!(target: "encounter", id = %body.question_id, correct = body.correct, leveled_up = out.leveled_up, defeated = out.defeated, "HTTP answer resolved");
  Json(out)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_difficulty(
  State(state): State<Arc<AppState>>,
  Json(body): Json<DifficultyIn>,
) -> impl IntoResponse {
  Json(select_difficulty(&state, body.difficulty).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_reset(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(reset_progress(&state).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_progress(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(progress_snapshot(&state).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(history_snapshot(&state).await)
}
