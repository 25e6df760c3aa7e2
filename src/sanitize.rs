//! Filtering the raw question bank down to playable questions.
//!
//! Validity first (prompt length, placeholder markers, blank options), then
//! an optional category filter. A category filter that would empty the
//! result is abandoned rather than surfaced: serving something off-category
//! beats serving nothing.

use tracing::warn;

use crate::domain::{Category, Question, MIN_PROMPT_CHARS, PLACEHOLDER_MARKER};

/// True if the question satisfies the validity invariant: a prompt of at
/// least `MIN_PROMPT_CHARS` chars, and no option that is blank or still
/// carries the placeholder marker.
pub fn is_valid(q: &Question) -> bool {
  let prompt_ok = q
    .prompt
    .as_deref()
    .map(|p| p.chars().count() >= MIN_PROMPT_CHARS)
    .unwrap_or(false);
  if !prompt_ok {
    return false;
  }
  q.options
    .iter()
    .all(|opt| !opt.text.trim().is_empty() && !opt.text.contains(PLACEHOLDER_MARKER))
}

/// Validity-filter `questions`, then narrow to `category` when one is given.
///
/// Output is empty only when the input had no valid questions at all; the
/// caller must treat that as an exhausted source.
pub fn sanitize(questions: &[Question], category: Option<Category>) -> Vec<Question> {
  let valid: Vec<Question> = questions.iter().filter(|q| is_valid(q)).cloned().collect();

  let Some(cat) = category else { return valid };

  let narrowed: Vec<Question> = valid
    .iter()
    .filter(|q| q.subject.as_deref().map(|s| cat.matches_subject(s)).unwrap_or(false))
    .cloned()
    .collect();

  if narrowed.is_empty() {
    warn!(target: "encounter", category = ?cat, pool = valid.len(), "Category filter matched nothing; falling back to the full pool");
    return valid;
  }
  narrowed
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::QuestionOption;

  fn opt(label: char, text: &str) -> QuestionOption {
    QuestionOption { label, text: text.into() }
  }

  fn question(id: &str, subject: Option<&str>, prompt: &str) -> Question {
    Question {
      id: id.into(),
      subject: subject.map(|s| s.to_string()),
      prompt: Some(prompt.into()),
      image_url: None,
      correct_answer_label: 'A',
      options: vec![opt('A', "first"), opt('B', "second")],
    }
  }

  #[test]
  fn rejects_short_or_missing_prompts() {
    let mut q = question("q1", None, "long enough prompt");
    assert!(is_valid(&q));
    q.prompt = Some("too short".into());
    assert!(!is_valid(&q));
    q.prompt = None;
    assert!(!is_valid(&q));
  }

  #[test]
  fn rejects_placeholder_and_blank_options() {
    let mut q = question("q1", None, "a prompt long enough");
    q.options[1].text = "   ".into();
    assert!(!is_valid(&q));
    q.options[1].text = "see [[placeholder]] here".into();
    assert!(!is_valid(&q));
  }

  #[test]
  fn a_question_without_options_is_not_the_sanitizers_problem() {
    let mut q = question("q1", None, "a prompt long enough");
    q.options.clear();
    // The mapper rejects these; the validity invariant only covers option text.
    assert!(is_valid(&q));
  }

  #[test]
  fn output_is_a_valid_subset_of_the_input() {
    let good = question("good", Some("Mathematics"), "what is two plus two?");
    let mut bad = question("bad", None, "prompt long enough too");
    bad.options[0].text = String::new();
    let out = sanitize(&[good, bad], None);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "good");
    assert!(out.iter().all(is_valid));
  }

  #[test]
  fn category_filter_narrows_by_subject_keyword() {
    let math = question("m", Some("Mathematics"), "a prompt long enough");
    let hist = question("h", Some("World History"), "a prompt long enough");
    let out = sanitize(&[math, hist], Some(Category::Humanities));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "h");
  }

  #[test]
  fn empty_category_match_falls_back_to_the_full_pool() {
    let math = question("m", Some("Mathematics"), "a prompt long enough");
    let out = sanitize(&[math], Some(Category::Science));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "m");
  }

  #[test]
  fn questions_without_a_subject_never_match_a_category() {
    let anon = question("anon", None, "a prompt long enough");
    let math = question("m", Some("Mathematics"), "a prompt long enough");
    let out = sanitize(&[anon, math], Some(Category::Math));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "m");
  }

  #[test]
  fn entirely_invalid_input_yields_an_empty_output() {
    let mut q = question("q1", None, "a prompt long enough");
    q.options[0].text = PLACEHOLDER_MARKER.into();
    assert!(sanitize(&[q], None).is_empty());
  }
}
