//! Application state: question stores, the play session, and encounter
//! selection.
//!
//! This module owns:
//!   - the local bank (config questions + built-in seeds)
//!   - the cached remote bank (fetched lazily, once)
//!   - the play session (progress + battle history), restored from disk
//!   - the selection policy that turns a category into one encounter

use std::path::PathBuf;
use std::sync::Arc;

use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::{GameConfig, QuestionCfg};
use crate::domain::{Category, Encounter, Question, QuestionOption};
use crate::encounter::map_to_encounter;
use crate::error::GameError;
use crate::history::HistoryLog;
use crate::progress::PlayerProgress;
use crate::sanitize::{is_valid, sanitize};
use crate::save::{self, PlayerSave};
use crate::seeds::seed_questions;
use crate::source::QuestionBankClient;

/// Progress and history of the single play session this process serves.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub progress: PlayerProgress,
    pub history: HistoryLog,
}

#[derive(Clone)]
pub struct AppState {
    pub local_bank: Arc<Vec<Question>>,
    pub remote_bank: Arc<RwLock<Option<Vec<Question>>>>,
    pub session: Arc<RwLock<Session>>,
    pub last_served: Arc<RwLock<Option<String>>>,
    pub source: Option<QuestionBankClient>,
    pub save_path: PathBuf,
}

impl AppState {
    /// Build state: convert the config bank (skipping invalid entries),
    /// append built-in seeds, restore the saved session, init the source
    /// client.
    #[instrument(level = "info", skip_all)]
    pub fn new(cfg: GameConfig) -> Self {
        let mut bank: Vec<Question> = Vec::new();

        for qc in &cfg.questions {
            let q = question_from_cfg(qc);
            if !is_valid(&q) {
                error!(target: "encounter", id = %q.id, "Skipping bank item: fails the validity check.");
                continue;
            }
            bank.push(q);
        }

        // Always append built-in seeds, but don't shadow configured ids.
        for q in seed_questions() {
            if bank.iter().all(|existing| existing.id != q.id) {
                bank.push(q);
            }
        }
        info!(target: "encounter", configured = cfg.questions.len(), total = bank.len(), "Startup question inventory");

        let save_path = save::save_path_from_env();
        let session = match save::load(&save_path) {
            Some(PlayerSave { progress, history }) => Session {
                progress,
                history: HistoryLog::from_records(history),
            },
            None => Session::default(),
        };

        let source = QuestionBankClient::from_env(&cfg.source);
        match &source {
            Some(s) => info!(target: "dungeon_backend", url = %s.url, "Remote question bank enabled"),
            None => info!(target: "dungeon_backend", "Remote question bank disabled; local bank only"),
        }

        Self {
            local_bank: Arc::new(bank),
            remote_bank: Arc::new(RwLock::new(None)),
            session: Arc::new(RwLock::new(session)),
            last_served: Arc::new(RwLock::new(None)),
            source,
            save_path,
        }
    }

    /// Selection policy:
    /// fetch the remote bank once if configured, pool it with the local
    /// bank, sanitize for the requested category, then serve a random
    /// candidate that maps cleanly, avoiding the previously served id.
    #[instrument(level = "info", skip(self), fields(category = ?category))]
    pub async fn choose_encounter(
        &self,
        category: Option<Category>,
    ) -> Result<(Encounter, &'static str), GameError> {
        if let Some(src) = &self.source {
            let cached = self.remote_bank.read().await.is_some();
            if !cached {
                match src.fetch_bank().await {
                    Ok(list) => {
                        *self.remote_bank.write().await = Some(list);
                    }
                    Err(e) => {
                        error!(target: "encounter", error = %e, "Question bank fetch failed; serving from the local pool");
                        if self.local_bank.is_empty() {
                            return Err(e);
                        }
                    }
                }
            }
        }

        let mut origin = "local_pool";
        let mut pool: Vec<Question> = Vec::new();
        if let Some(remote) = self.remote_bank.read().await.as_ref() {
            pool.extend(remote.iter().cloned());
            origin = "remote_pool";
        }
        pool.extend(self.local_bank.iter().cloned());

        let mut candidates = sanitize(&pool, category);
        if candidates.is_empty() {
            warn!(target: "encounter", pool = pool.len(), "No valid questions left after sanitization");
            return Err(GameError::EmptySource);
        }

        let last = self.last_served.read().await.clone();
        {
            let mut rng = rand::thread_rng();
            candidates.shuffle(&mut rng);
        }
        // Push a would-be repeat to the back so it is only served when it is
        // the sole candidate left.
        if candidates.len() > 1 {
            if let Some(last_id) = &last {
                if let Some(pos) = candidates.iter().position(|q| &q.id == last_id) {
                    let repeat = candidates.remove(pos);
                    candidates.push(repeat);
                }
            }
        }

        let mut last_err: Option<GameError> = None;
        for q in &candidates {
            match map_to_encounter(q) {
                Ok(encounter) => {
                    *self.last_served.write().await = Some(q.id.clone());
                    info!(target: "encounter", id = %encounter.id, tier = ?encounter.tier, theme = %encounter.theme, %origin, "Encounter chosen");
                    return Ok((encounter, origin));
                }
                Err(e) => {
                    warn!(target: "encounter", id = %q.id, error = %e, "Skipping malformed question");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or(GameError::EmptySource))
    }

    /// Snapshot the session and write it to disk. Failures are logged inside.
    pub async fn persist_session(&self) {
        let snapshot = {
            let session = self.session.read().await;
            PlayerSave {
                progress: session.progress.clone(),
                history: session.history.records().cloned().collect(),
            }
        };
        save::persist(&self.save_path, &snapshot).await;
    }
}

fn question_from_cfg(qc: &QuestionCfg) -> Question {
    Question {
        id: qc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string()),
        subject: qc.subject.clone(),
        prompt: Some(qc.prompt.clone()),
        image_url: qc.image_url.clone(),
        correct_answer_label: qc.correct_answer_label,
        options: qc
            .options
            .iter()
            .map(|o| QuestionOption { label: o.label, text: o.text.clone() })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptionCfg;

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

    fn state_with_bank(bank: Vec<Question>) -> AppState {
        AppState {
            local_bank: Arc::new(bank),
            remote_bank: Arc::new(RwLock::new(None)),
            session: Arc::new(RwLock::new(Session::default())),
            last_served: Arc::new(RwLock::new(None)),
            source: None,
            save_path: std::env::temp_dir().join("dungeon-backend-state-test.json"),
        }
    }

    #[tokio::test]
    async fn serves_an_encounter_from_the_local_bank() {
        let state = state_with_bank(vec![bank_question("q1", "Mathematics")]);
        let (encounter, origin) = state.choose_encounter(None).await.unwrap();
        assert_eq!(encounter.id, "q1");
        assert_eq!(origin, "local_pool");
        assert_eq!(encounter.theme, "Tower of Logic");
    }

    #[tokio::test]
    async fn avoids_repeating_the_previous_question() {
        let state = state_with_bank(vec![
            bank_question("q1", "Physics"),
            bank_question("q2", "Physics"),
        ]);
        let (first, _) = state.choose_encounter(None).await.unwrap();
        let (second, _) = state.choose_encounter(None).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn category_filter_falls_back_when_unmatched() {
        let state = state_with_bank(vec![bank_question("q1", "Mathematics")]);
        let (encounter, _) = state.choose_encounter(Some(Category::Science)).await.unwrap();
        assert_eq!(encounter.id, "q1");
    }

    #[tokio::test]
    async fn category_filter_narrows_when_matched() {
        let state = state_with_bank(vec![
            bank_question("math", "Mathematics"),
            bank_question("hist", "World History"),
        ]);
        for _ in 0..5 {
            let (encounter, _) = state
                .choose_encounter(Some(Category::Humanities))
                .await
                .unwrap();
            assert_eq!(encounter.id, "hist");
        }
    }

    #[tokio::test]
    async fn empty_bank_is_an_empty_source() {
        let state = state_with_bank(Vec::new());
        assert!(matches!(
            state.choose_encounter(None).await,
            Err(GameError::EmptySource)
        ));
    }

    #[tokio::test]
    async fn malformed_questions_surface_after_skipping() {
        let mut q = bank_question("q1", "Mathematics");
        q.correct_answer_label = 'Z';
        let state = state_with_bank(vec![q]);
        assert!(matches!(
            state.choose_encounter(None).await,
            Err(GameError::MalformedQuestion { .. })
        ));
    }

    #[tokio::test]
    async fn malformed_candidates_are_skipped_in_favor_of_clean_ones() {
        let mut broken = bank_question("broken", "Physics");
        broken.options.clear();
        let state = state_with_bank(vec![broken, bank_question("clean", "Physics")]);
        for _ in 0..5 {
            state.last_served.write().await.take();
            let (encounter, _) = state.choose_encounter(None).await.unwrap();
            assert_eq!(encounter.id, "clean");
        }
    }

    #[test]
    fn config_entries_failing_validity_are_skipped() {
        let cfg = GameConfig {
            source: Default::default(),
            questions: vec![
                QuestionCfg {
                    id: Some("good".into()),
                    subject: Some("Biology".into()),
                    prompt: "Which organelle produces most of a cell's ATP?".into(),
                    image_url: None,
                    correct_answer_label: 'C',
                    options: vec![
                        OptionCfg { label: 'A', text: "Ribosome".into() },
                        OptionCfg { label: 'B', text: "Nucleus".into() },
                        OptionCfg { label: 'C', text: "Mitochondrion".into() },
                    ],
                },
                QuestionCfg {
                    id: Some("bad".into()),
                    subject: None,
                    prompt: "short".into(),
                    image_url: None,
                    correct_answer_label: 'A',
                    options: vec![OptionCfg { label: 'A', text: "x".into() }],
                },
            ],
        };
        let state = AppState::new(cfg);
        assert!(state.local_bank.iter().any(|q| q.id == "good"));
        assert!(state.local_bank.iter().all(|q| q.id != "bad"));
        // Seeds ride along.
        assert!(state.local_bank.iter().any(|q| q.id.starts_with("seed-")));
    }
}
