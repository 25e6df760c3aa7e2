//! Client for the remotely hosted question bank.
//!
//! The bank is a static JSON array of question records. We fetch it in one
//! GET, check the status, and parse tolerantly: records that do not match
//! the schema are skipped with a log instead of failing the whole bank.

use std::time::Duration;

use reqwest::header::USER_AGENT;
use tracing::{info, instrument, warn};

use crate::config::SourceConfig;
use crate::domain::Question;
use crate::error::GameError;
use crate::util::trunc_for_log;

/// Published bank of cleaned exam questions; override with QUESTION_BANK_URL.
const DEFAULT_BANK_URL: &str =
  "https://raw.githubusercontent.com/exam-dungeon/question-bank/main/questions_clean.json";

#[derive(Clone)]
pub struct QuestionBankClient {
  client: reqwest::Client,
  pub url: String,
}

impl QuestionBankClient {
  /// Build the client. QUESTION_BANK_URL beats the config url; an empty
  /// value disables remote fetching entirely.
  pub fn from_env(cfg: &SourceConfig) -> Option<Self> {
    let url = std::env::var("QUESTION_BANK_URL")
      .ok()
      .or_else(|| cfg.url.clone())
      .unwrap_or_else(|| DEFAULT_BANK_URL.to_string());
    if url.trim().is_empty() {
      return None;
    }

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(cfg.timeout_secs))
      .build()
      .ok()?;

    Some(Self { client, url })
  }

  /// Fetch and parse the whole bank.
  #[instrument(level = "info", skip(self), fields(url = %self.url))]
  pub async fn fetch_bank(&self) -> Result<Vec<Question>, GameError> {
    let res = self
      .client
      .get(&self.url)
      .header(USER_AGENT, "dungeon-backend/0.1")
      .send()
      .await
      .map_err(|e| GameError::SourceFetch(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      return Err(GameError::SourceFetch(format!(
        "HTTP {}: {}",
        status,
        trunc_for_log(&body, 200)
      )));
    }

    let body: serde_json::Value = res
      .json()
      .await
      .map_err(|e| GameError::SourceFetch(format!("invalid JSON body: {e}")))?;

    let questions = parse_bank(body)?;
    info!(target: "dungeon_backend", count = questions.len(), "Question bank fetched");
    Ok(questions)
  }
}

/// Extract question records from a bank payload. A payload that is not an
/// array, or an empty one, counts as an empty source; individual bad records
/// are skipped.
pub fn parse_bank(body: serde_json::Value) -> Result<Vec<Question>, GameError> {
  let Some(items) = body.as_array() else {
    return Err(GameError::EmptySource);
  };
  if items.is_empty() {
    return Err(GameError::EmptySource);
  }

  let mut questions = Vec::with_capacity(items.len());
  for (index, item) in items.iter().enumerate() {
    match serde_json::from_value::<Question>(item.clone()) {
      Ok(q) => questions.push(q),
      Err(e) => {
        warn!(target: "dungeon_backend", index, error = %e, "Skipping unparsable question record");
      }
    }
  }

  if questions.is_empty() {
    return Err(GameError::EmptySource);
  }
  Ok(questions)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn non_array_payload_is_an_empty_source() {
    assert!(matches!(
      parse_bank(json!({"error": "nope"})),
      Err(GameError::EmptySource)
    ));
  }

  #[test]
  fn empty_array_is_an_empty_source() {
    assert!(matches!(parse_bank(json!([])), Err(GameError::EmptySource)));
  }

  #[test]
  fn bad_records_are_skipped_not_fatal() {
    let body = json!([
      {
        "id": "q1",
        "subject": "Mathematics",
        "prompt": "what is two plus two, really?",
        "correctAnswerLabel": "A",
        "options": [
          {"label": "A", "text": "four"},
          {"label": "B", "text": "five"}
        ]
      },
      {"this": "is not a question"}
    ]);
    let bank = parse_bank(body).unwrap();
    assert_eq!(bank.len(), 1);
    assert_eq!(bank[0].id, "q1");
    assert_eq!(bank[0].correct_answer_label, 'A');
    assert_eq!(bank[0].options.len(), 2);
  }

  #[test]
  fn entirely_bad_records_are_an_empty_source() {
    assert!(matches!(
      parse_bank(json!([{"nope": 1}, {"also": "nope"}])),
      Err(GameError::EmptySource)
    ));
  }

  #[test]
  fn nullable_fields_deserialize_leniently() {
    let body = json!([
      {
        "id": "q2",
        "subject": null,
        "prompt": "a prompt that is long enough",
        "imageUrl": null,
        "correctAnswerLabel": "B",
        "options": [{"label": "B", "text": "only"}]
      }
    ]);
    let bank = parse_bank(body).unwrap();
    assert!(bank[0].subject.is_none());
    assert!(bank[0].image_url.is_none());
  }
}
