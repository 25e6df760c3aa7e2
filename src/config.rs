//! Loading game configuration (question source + optional local bank) from TOML.
//!
//! See `GameConfig` and `SourceConfig` for the expected schema.

use serde::Deserialize;
use tracing::{info, error};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GameConfig {
  #[serde(default)]
  pub source: SourceConfig,
  #[serde(default)]
  pub questions: Vec<QuestionCfg>,
}

/// Where the remote question bank lives and how long we wait for it.
/// The QUESTION_BANK_URL env variable beats the TOML url.
#[derive(Clone, Debug, Deserialize)]
pub struct SourceConfig {
  #[serde(default)] pub url: Option<String>,
  #[serde(default = "default_timeout_secs")] pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 20 }

impl Default for SourceConfig {
  fn default() -> Self {
    Self { url: None, timeout_secs: default_timeout_secs() }
  }
}

/// Question entry accepted in TOML configuration. Entries failing the
/// sanitizer's validity check are skipped at startup.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionCfg {
  #[serde(default)] pub id: Option<String>,
  #[serde(default)] pub subject: Option<String>,
  pub prompt: String,
  #[serde(default)] pub image_url: Option<String>,
  pub correct_answer_label: char,
  #[serde(default)] pub options: Vec<OptionCfg>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OptionCfg {
  pub label: char,
  pub text: String,
}

/// Attempt to load `GameConfig` from GAME_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_game_config_from_env() -> Option<GameConfig> {
  let path = std::env::var("GAME_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<GameConfig>(&s) {
      Ok(cfg) => {
        info!(target: "dungeon_backend", %path, "Loaded game config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "dungeon_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "dungeon_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
