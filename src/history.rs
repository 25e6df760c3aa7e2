//! Append-only, bounded battle history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The log keeps this many most-recent battles.
pub const HISTORY_CAP: usize = 50;

/// One resolved encounter.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BattleRecord {
  pub id: String,
  pub question_id: String,
  pub category: String,
  pub is_correct: bool,
  pub timestamp: DateTime<Utc>,
}

/// Newest-first bounded log of battle outcomes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
  records: VecDeque<BattleRecord>,
}

/// Derived statistics for the history view.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct HistoryStats {
  pub total: usize,
  pub wins: usize,
  pub win_rate: u32,
}

impl HistoryLog {
  /// Rebuild from persisted records (already newest first), enforcing the cap.
  pub fn from_records(records: Vec<BattleRecord>) -> Self {
    let mut log = Self { records: records.into() };
    log.records.truncate(HISTORY_CAP);
    log
  }

  /// Record an outcome; the id and timestamp are generated here. The oldest
  /// entry falls off once the cap is reached.
  pub fn append(&mut self, question_id: &str, category: &str, is_correct: bool) -> BattleRecord {
    let record = BattleRecord {
      id: Uuid::new_v4().to_string(),
      question_id: question_id.to_string(),
      category: category.to_string(),
      is_correct,
      timestamp: Utc::now(),
    };
    self.records.push_front(record.clone());
    self.records.truncate(HISTORY_CAP);
    record
  }

  pub fn records(&self) -> impl Iterator<Item = &BattleRecord> {
    self.records.iter()
  }

  #[allow(dead_code)]
  pub fn len(&self) -> usize {
    self.records.len()
  }

  #[allow(dead_code)]
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn stats(&self) -> HistoryStats {
    let total = self.records.len();
    let wins = self.records.iter().filter(|r| r.is_correct).count();
    let win_rate = if total == 0 {
      0
    } else {
      ((wins as f32 / total as f32) * 100.0).round() as u32
    };
    HistoryStats { total, wins, win_rate }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn append_caps_at_fifty_newest_first() {
    let mut log = HistoryLog::default();
    for i in 0..51 {
      log.append(&format!("q{i}"), "Tower of Logic", i % 2 == 0);
    }
    assert_eq!(log.len(), HISTORY_CAP);
    assert_eq!(log.records().next().unwrap().question_id, "q50");
    // The oldest entry is the one evicted.
    assert!(log.records().all(|r| r.question_id != "q0"));
    assert!(log.records().any(|r| r.question_id == "q1"));
  }

  #[test]
  fn records_get_unique_ids() {
    let mut log = HistoryLog::default();
    let a = log.append("q1", "Ruins of History", true);
    let b = log.append("q1", "Ruins of History", true);
    assert_ne!(a.id, b.id);
  }

  #[test]
  fn stats_round_the_win_rate() {
    let mut log = HistoryLog::default();
    assert_eq!(log.stats(), HistoryStats { total: 0, wins: 0, win_rate: 0 });
    log.append("q1", "c", true);
    log.append("q2", "c", true);
    log.append("q3", "c", false);
    let stats = log.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.wins, 2);
    assert_eq!(stats.win_rate, 67);
  }

  #[test]
  fn from_records_enforces_the_cap() {
    let records: Vec<BattleRecord> = (0..60)
      .map(|i| BattleRecord {
        id: format!("r{i}"),
        question_id: format!("q{i}"),
        category: "c".into(),
        is_correct: true,
        timestamp: Utc::now(),
      })
      .collect();
    let log = HistoryLog::from_records(records);
    assert_eq!(log.len(), HISTORY_CAP);
    assert_eq!(log.records().next().unwrap().id, "r0");
  }
}
