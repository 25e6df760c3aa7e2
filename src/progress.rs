//! The player's progression state and its transition rules.
//!
//! All transitions are total: they mutate in place and report what changed.
//! Running out of hit points does not stop the engine; the caller decides
//! when zero hearts ends the run and stops requesting encounters.

use serde::{Deserialize, Serialize};

/// Game difficulty chosen in the lobby. Distinct from an encounter's tier.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameDifficulty {
  Easy,
  #[default]
  Medium,
  Hard,
}

/// Per-difficulty constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyConfig {
  pub max_health: u32,
  pub xp_base: u32,
}

impl GameDifficulty {
  pub const fn config(self) -> DifficultyConfig {
    match self {
      GameDifficulty::Easy => DifficultyConfig { max_health: 5, xp_base: 50 },
      GameDifficulty::Medium => DifficultyConfig { max_health: 3, xp_base: 300 },
      GameDifficulty::Hard => DifficultyConfig { max_health: 1, xp_base: 1000 },
    }
  }
}

/// Every third consecutive correct answer restores one hit point.
const STREAK_HEAL_EVERY: u32 = 3;

/// What a correct answer did beyond the base bookkeeping.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct AnswerOutcome {
  pub leveled_up: bool,
  pub healed: bool,
}

/// Mutable play-session state. Mutated only through the named transitions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerProgress {
  pub hit_points: u32,
  pub max_hit_points: u32,
  pub experience: u32,
  pub level: u32,
  pub difficulty: GameDifficulty,
  pub streak: u32,
}

impl Default for PlayerProgress {
  fn default() -> Self {
    let cfg = GameDifficulty::Medium.config();
    Self {
      hit_points: cfg.max_health,
      max_hit_points: cfg.max_health,
      experience: 0,
      level: 1,
      difficulty: GameDifficulty::Medium,
      streak: 0,
    }
  }
}

impl PlayerProgress {
  /// Switch difficulty: health resets to the tier's maximum and the streak
  /// restarts. Experience and level are untouched.
  pub fn select_difficulty(&mut self, difficulty: GameDifficulty) {
    self.difficulty = difficulty;
    self.max_hit_points = difficulty.config().max_health;
    self.hit_points = self.max_hit_points;
    self.streak = 0;
  }

  /// A wrong answer: lose one hit point (floored at zero) and the whole
  /// streak. Experience is unaffected.
  pub fn register_incorrect(&mut self) {
    self.hit_points = self.hit_points.saturating_sub(1);
    self.streak = 0;
  }

  /// A correct answer: extend the streak, award experience, and apply at
  /// most one heal.
  ///
  /// The level check runs once per call against the threshold of the level
  /// held before the increment; surplus experience carries over and
  /// resolves on later correct answers. A level-up restores full health,
  /// which makes the streak heal moot for that call.
  pub fn register_correct(&mut self) -> AnswerOutcome {
    self.streak += 1;
    let xp_base = self.difficulty.config().xp_base;
    self.experience += xp_base;

    let xp_to_next = self.level * xp_base;
    if self.experience >= xp_to_next {
      self.experience -= xp_to_next;
      self.level += 1;
      self.hit_points = self.max_hit_points;
      return AnswerOutcome { leveled_up: true, healed: true };
    }

    if self.streak % STREAK_HEAL_EVERY == 0 && self.hit_points < self.max_hit_points {
      self.hit_points += 1;
      return AnswerOutcome { leveled_up: false, healed: true };
    }

    AnswerOutcome::default()
  }

  /// Back to a fresh run on the current difficulty.
  pub fn reset(&mut self) {
    let cfg = self.difficulty.config();
    self.hit_points = cfg.max_health;
    self.max_hit_points = cfg.max_health;
    self.experience = 0;
    self.level = 1;
    self.streak = 0;
  }

  /// Experience required to clear the current level.
  pub fn xp_to_next_level(&self) -> u32 {
    self.level * self.difficulty.config().xp_base
  }

  pub fn is_defeated(&self) -> bool {
    self.hit_points == 0
  }
}
