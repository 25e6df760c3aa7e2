//! Domain models used by the backend: raw bank questions, subject categories,
//! encounter tiers, and the encounter shape the front-end renders.

use serde::{Deserialize, Serialize};

/// Minimum prompt length (in chars) for a question to be playable.
pub const MIN_PROMPT_CHARS: usize = 10;

/// Sentinel the upstream data-cleaning step leaves behind when it could not
/// recover an option's text. Any option still carrying it is unusable.
pub const PLACEHOLDER_MARKER: &str = "[[placeholder]]";

/// One answer option as stored in the question bank.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionOption {
  pub label: char,
  pub text: String,
}

/// Raw question record from the remote bank or the local config bank.
/// Field names follow the bank's JSON (camelCase where it differs).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
  pub id: String,
  #[serde(default)] pub subject: Option<String>,
  #[serde(default)] pub prompt: Option<String>,
  #[serde(default, rename = "imageUrl")] pub image_url: Option<String>,
  #[serde(rename = "correctAnswerLabel")] pub correct_answer_label: char,
  #[serde(default)] pub options: Vec<QuestionOption>,
}

/// Subject categories the lobby can ask for.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  Math,
  Science,
  Humanities,
  Languages,
}

impl Category {
  pub const ALL: [Category; 4] = [
    Category::Math,
    Category::Science,
    Category::Humanities,
    Category::Languages,
  ];

  /// Keywords matched case-insensitively, as substrings, against a
  /// question's subject. The first category in `ALL` order to match wins.
  pub fn keywords(self) -> &'static [&'static str] {
    match self {
      // Stem, so "math", "mathematics" and "matemática" all land here.
      Category::Math => &["mat"],
      Category::Science => &["nature", "physics", "chemistry", "biology"],
      Category::Humanities => &["humanities", "history", "geography", "philosophy", "sociology"],
      Category::Languages => &["languages", "portuguese", "arts", "english", "spanish"],
    }
  }

  /// Realm the category maps to in the dungeon skin.
  pub fn realm(self) -> &'static str {
    match self {
      Category::Math => "Tower of Logic",
      Category::Science => "Alchemical Swamp",
      Category::Humanities => "Ruins of History",
      Category::Languages => "Forgotten Library",
    }
  }

  pub fn matches_subject(self, subject: &str) -> bool {
    let lower = subject.to_lowercase();
    self.keywords().iter().any(|kw| lower.contains(kw))
  }

  /// Parse a lobby selector; anything outside the fixed set yields None.
  pub fn parse(raw: &str) -> Option<Category> {
    match raw.to_lowercase().as_str() {
      "math" => Some(Category::Math),
      "science" => Some(Category::Science),
      "humanities" => Some(Category::Humanities),
      "languages" => Some(Category::Languages),
      _ => None,
    }
  }
}

/// Realm label for a raw subject string; subjects matching no category fall
/// through to the unknown realm.
pub fn realm_for_subject(subject: &str) -> &'static str {
  Category::ALL
    .into_iter()
    .find(|c| c.matches_subject(subject))
    .map(|c| c.realm())
    .unwrap_or("Limbo of the Unknown")
}

/// Prompt-length threshold (chars) above which an encounter is mid tier.
pub const MID_PROMPT_CHARS: usize = 400;
/// Prompt-length threshold (chars) above which an encounter is high tier.
pub const HIGH_PROMPT_CHARS: usize = 800;

/// Encounter difficulty, derived from prompt length. Distinct from the
/// player's chosen game difficulty.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EncounterTier {
  Low,
  Mid,
  High,
}

impl EncounterTier {
  pub fn from_prompt_chars(len: usize) -> Self {
    if len > HIGH_PROMPT_CHARS {
      EncounterTier::High
    } else if len > MID_PROMPT_CHARS {
      EncounterTier::Mid
    } else {
      EncounterTier::Low
    }
  }

  /// Health an encounter of this tier spawns with.
  pub fn health(self) -> u32 {
    match self {
      EncounterTier::Low => 1,
      EncounterTier::Mid => 2,
      EncounterTier::High => 3,
    }
  }

  /// Uppercase word used in encounter labels.
  pub fn label_word(self) -> &'static str {
    match self {
      EncounterTier::Low => "LOW",
      EncounterTier::Mid => "MID",
      EncounterTier::High => "HIGH",
    }
  }
}

/// Presentation-ready encounter. Produced by the mapper and handed to the
/// caller; the core keeps no reference to it.
#[derive(Clone, Debug, Serialize)]
pub struct Encounter {
  pub id: String,
  pub label: String,
  pub theme: String,
  pub tier: EncounterTier,
  pub health: u32,
  pub max_health: u32,
  pub full_text: String,
  pub image_url: Option<String>,
  pub options: Vec<EncounterOption>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct EncounterOption {
  pub label: char,
  pub text: String,
  pub is_correct: bool,
}
