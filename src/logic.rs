//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Requesting an encounter for an optional category selector
//!   - Resolving an answer (progression transition + battle record + save)
//!   - Difficulty selection, reset, and read-only snapshots

use tracing::{info, instrument, warn};

use crate::domain::Category;
use crate::error::GameError;
use crate::progress::{AnswerOutcome, GameDifficulty};
use crate::protocol::{self, AnswerOut, EncounterOut, HistoryOut, ProgressOut};
use crate::state::AppState;

/// Parse a lobby category selector. Absent or "random" means no filter;
/// unknown strings are logged and treated the same.
fn parse_category(raw: Option<&str>) -> Option<Category> {
  let raw = raw?;
  if raw.eq_ignore_ascii_case("random") {
    return None;
  }
  match Category::parse(raw) {
    Some(cat) => Some(cat),
    None => {
      warn!(target: "encounter", %raw, "Unknown category selector; serving unfiltered");
      None
    }
  }
}

#[instrument(level = "info", skip(state))]
pub async fn request_encounter(
  state: &AppState,
  category: Option<String>,
) -> Result<EncounterOut, GameError> {
  let cat = parse_category(category.as_deref());
  let (encounter, origin) = state.choose_encounter(cat).await?;
  info!(target: "encounter", id = %encounter.id, %origin, "Encounter served");
  Ok(protocol::to_out(&encounter))
}

/// Apply an answer outcome to the session: progression transition, battle
/// record, save write. Total; never fails the request.
#[instrument(level = "info", skip(state), fields(%question_id, %correct))]
pub async fn resolve_answer(
  state: &AppState,
  question_id: &str,
  category: &str,
  correct: bool,
) -> AnswerOut {
  let out = {
    let mut session = state.session.write().await;
    let outcome = if correct {
      session.progress.register_correct()
    } else {
      session.progress.register_incorrect();
      AnswerOutcome::default()
    };
    let record = session.history.append(question_id, category, correct);
    AnswerOut {
      correct,
      leveled_up: outcome.leveled_up,
      healed: outcome.healed,
      defeated: session.progress.is_defeated(),
      record,
      progress: protocol::progress_out(&session.progress),
    }
  };

  if out.defeated {
    info!(target: "encounter", %question_id, "Player is out of hit points; the run ends here");
  }
  state.persist_session().await;
  out
}

#[instrument(level = "info", skip(state))]
pub async fn select_difficulty(state: &AppState, difficulty: GameDifficulty) -> ProgressOut {
  let out = {
    let mut session = state.session.write().await;
    session.progress.select_difficulty(difficulty);
    protocol::progress_out(&session.progress)
  };
  state.persist_session().await;
  out
}

#[instrument(level = "info", skip(state))]
pub async fn reset_progress(state: &AppState) -> ProgressOut {
  let out = {
    let mut session = state.session.write().await;
    session.progress.reset();
    protocol::progress_out(&session.progress)
  };
  state.persist_session().await;
  out
}

pub async fn progress_snapshot(state: &AppState) -> ProgressOut {
  let session = state.session.read().await;
  protocol::progress_out(&session.progress)
}

pub async fn history_snapshot(state: &AppState) -> HistoryOut {
  let session = state.session.read().await;
  protocol::history_out(
    session.history.stats(),
    session.history.records().cloned().collect(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;
  use tokio::sync::RwLock;

  use crate::domain::{Question, QuestionOption};
  use crate::state::Session;

  fn state_with_bank(bank: Vec<Question>) -> AppState {
    AppState {
      local_bank: Arc::new(bank),
      remote_bank: Arc::new(RwLock::new(None)),
      session: Arc::new(RwLock::new(Session::default())),
      last_served: Arc::new(RwLock::new(None)),
      source: None,
      save_path: std::env::temp_dir().join("dungeon-backend-logic-test.json"),
    }
  }

  fn bank_question(id: &str, subject: &str) -> Question {
    Question {
      id: id.into(),
      subject: Some(subject.into()),
      prompt: Some("a prompt comfortably past the minimum length".into()),
      image_url: None,
      correct_answer_label: 'A',
      options: vec![
        QuestionOption { label: 'A', text: "yes".into() },
        QuestionOption { label: 'B', text: "no".into() },
      ],
    }
  }

  #[tokio::test]
  async fn resolving_answers_updates_progress_and_history() {
    let state = state_with_bank(Vec::new());
    let out = resolve_answer(&state, "q1", "Tower of Logic", true).await;
    assert!(out.correct);
    // The first correct answer on medium crosses the 300 xp threshold.
    assert!(out.leveled_up);
    assert!(!out.defeated);
    assert_eq!(out.progress.level, 2);
    assert_eq!(out.record.question_id, "q1");
    assert_eq!(out.record.category, "Tower of Logic");

    let history = history_snapshot(&state).await;
    assert_eq!(history.total, 1);
    assert_eq!(history.wins, 1);
    assert_eq!(history.win_rate, 100);
  }

  #[tokio::test]
  async fn a_hard_run_ends_after_one_mistake() {
    let state = state_with_bank(Vec::new());
    select_difficulty(&state, GameDifficulty::Hard).await;
    let out = resolve_answer(&state, "q9", "Alchemical Swamp", false).await;
    assert!(out.defeated);
    assert_eq!(out.progress.hit_points, 0);
    assert_eq!(out.progress.streak, 0);
  }

  #[tokio::test]
  async fn reset_keeps_the_chosen_difficulty() {
    let state = state_with_bank(Vec::new());
    select_difficulty(&state, GameDifficulty::Easy).await;
    resolve_answer(&state, "q1", "Forgotten Library", false).await;
    let progress = reset_progress(&state).await;
    assert_eq!(progress.difficulty, GameDifficulty::Easy);
    assert_eq!(progress.hit_points, 5);
    assert_eq!(progress.level, 1);
    assert_eq!(progress.experience, 0);
  }

  #[tokio::test]
  async fn unknown_category_selectors_serve_unfiltered() {
    let state = state_with_bank(vec![bank_question("q1", "Mathematics")]);
    let out = request_encounter(&state, Some("dragons".into())).await.unwrap();
    assert_eq!(out.id, "q1");
    let out = request_encounter(&state, Some("random".into())).await.unwrap();
    assert_eq!(out.id, "q1");
  }
}
