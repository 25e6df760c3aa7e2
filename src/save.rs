//! Persisted player state: a single JSON blob holding progress and history.
//!
//! Read once, synchronously, at startup; written after every mutating
//! operation. IO failures are logged and swallowed: losing a save write must
//! never fail the request that triggered it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::history::{BattleRecord, HISTORY_CAP};
use crate::progress::PlayerProgress;

/// Default location of the save blob; override with SAVE_PATH.
const DEFAULT_SAVE_PATH: &str = "./data/progress.json";

/// On-disk schema: the full progression state plus the battle history,
/// newest first.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlayerSave {
  pub progress: PlayerProgress,
  pub history: Vec<BattleRecord>,
}

pub fn save_path_from_env() -> PathBuf {
  std::env::var("SAVE_PATH")
    .ok()
    .filter(|p| !p.trim().is_empty())
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH))
}

/// Load the save blob, clamping out-of-range values that may have been
/// hand-edited or written by an older build.
pub fn load(path: &Path) -> Option<PlayerSave> {
  let raw = match std::fs::read_to_string(path) {
    Ok(raw) => raw,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
    Err(e) => {
      warn!(target: "dungeon_backend", path = %path.display(), error = %e, "Failed to read save file; starting fresh");
      return None;
    }
  };

  match serde_json::from_str::<PlayerSave>(&raw) {
    Ok(mut save) => {
      clamp(&mut save);
      info!(target: "dungeon_backend", path = %path.display(), level = save.progress.level, battles = save.history.len(), "Loaded player save");
      Some(save)
    }
    Err(e) => {
      warn!(target: "dungeon_backend", path = %path.display(), error = %e, "Save file is not valid JSON; starting fresh");
      None
    }
  }
}

fn clamp(save: &mut PlayerSave) {
  let p = &mut save.progress;
  let max = p.difficulty.config().max_health;
  p.max_hit_points = max;
  if p.hit_points > max {
    p.hit_points = max;
  }
  if p.level == 0 {
    p.level = 1;
  }
  save.history.truncate(HISTORY_CAP);
}

/// Write the blob; parent directories are created on demand.
pub async fn persist(path: &Path, save: &PlayerSave) {
  let body = match serde_json::to_string_pretty(save) {
    Ok(body) => body,
    Err(e) => {
      error!(target: "dungeon_backend", error = %e, "Failed to serialize player save");
      return;
    }
  };

  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      if let Err(e) = tokio::fs::create_dir_all(parent).await {
        error!(target: "dungeon_backend", path = %path.display(), error = %e, "Failed to create save directory");
        return;
      }
    }
  }
  if let Err(e) = tokio::fs::write(path, body).await {
    error!(target: "dungeon_backend", path = %path.display(), error = %e, "Failed to write player save");
  }
}
