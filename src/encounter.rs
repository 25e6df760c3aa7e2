//! Turning a sanitized question into the encounter the front-end renders.

use crate::domain::{realm_for_subject, Encounter, EncounterOption, EncounterTier, Question};
use crate::error::GameError;

/// Map a valid question to its encounter. Pure; no randomness.
///
/// Longer prompts spawn tougher encounters, the subject picks the realm, and
/// each option carries its correctness flag in input order. Questions that
/// slipped through sanitization with no options, or whose correct label
/// matches none of them, come back as `MalformedQuestion` so the caller can
/// skip to another question.
pub fn map_to_encounter(q: &Question) -> Result<Encounter, GameError> {
  if q.options.is_empty() {
    return Err(GameError::MalformedQuestion {
      id: q.id.clone(),
      reason: "question has no options".into(),
    });
  }
  if !q.options.iter().any(|o| o.label == q.correct_answer_label) {
    return Err(GameError::MalformedQuestion {
      id: q.id.clone(),
      reason: format!("correct label '{}' not among options", q.correct_answer_label),
    });
  }

  let full_text = q.prompt.clone().unwrap_or_default();
  let tier = EncounterTier::from_prompt_chars(full_text.chars().count());
  let theme = realm_for_subject(q.subject.as_deref().unwrap_or(""));
  let health = tier.health();

  Ok(Encounter {
    id: q.id.clone(),
    label: format!("{} - {}", theme, tier.label_word()),
    theme: theme.to_string(),
    tier,
    health,
    max_health: health,
    full_text,
    image_url: q.image_url.clone(),
    options: q
      .options
      .iter()
      .map(|o| EncounterOption {
        label: o.label,
        text: o.text.clone(),
        is_correct: o.label == q.correct_answer_label,
      })
      .collect(),
  })
}
