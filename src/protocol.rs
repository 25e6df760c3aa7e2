//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Encounter, EncounterOption, EncounterTier};
use crate::history::{BattleRecord, HistoryStats};
use crate::progress::{GameDifficulty, PlayerProgress};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewEncounter {
        category: Option<String>,
    },
    SubmitAnswer {
        #[serde(rename = "questionId")]
        question_id: String,
        category: String,
        correct: bool,
    },
    SelectDifficulty {
        difficulty: GameDifficulty,
    },
    ResetProgress,
    GetProgress,
    GetHistory,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Encounter {
        encounter: EncounterOut,
    },
    AnswerResult {
        result: AnswerOut,
    },
    Progress {
        progress: ProgressOut,
    },
    History {
        history: HistoryOut,
    },
    Error {
        message: String,
    },
}

/// DTO used by both WS and HTTP for encounter delivery.
#[derive(Debug, Serialize)]
pub struct EncounterOut {
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

/// Convert the internal `Encounter` to the public DTO.
pub fn to_out(e: &Encounter) -> EncounterOut {
    EncounterOut {
        id: e.id.clone(),
        label: e.label.clone(),
        theme: e.theme.clone(),
        tier: e.tier,
        health: e.health,
        max_health: e.max_health,
        full_text: e.full_text.clone(),
        image_url: e.image_url.clone(),
        options: e.options.clone(),
    }
}

/// Progression snapshot for the HUD.
#[derive(Debug, Serialize)]
pub struct ProgressOut {
    pub hit_points: u32,
    pub max_hit_points: u32,
    pub experience: u32,
    pub level: u32,
    pub xp_to_next_level: u32,
    pub difficulty: GameDifficulty,
    pub streak: u32,
    pub defeated: bool,
}

pub fn progress_out(p: &PlayerProgress) -> ProgressOut {
    ProgressOut {
        hit_points: p.hit_points,
        max_hit_points: p.max_hit_points,
        experience: p.experience,
        level: p.level,
        xp_to_next_level: p.xp_to_next_level(),
        difficulty: p.difficulty,
        streak: p.streak,
        defeated: p.is_defeated(),
    }
}

/// History view: stats up front, then the records, newest first.
#[derive(Debug, Serialize)]
pub struct HistoryOut {
    pub total: usize,
    pub wins: usize,
    pub win_rate: u32,
    pub records: Vec<BattleRecord>,
}

pub fn history_out(stats: HistoryStats, records: Vec<BattleRecord>) -> HistoryOut {
    HistoryOut {
        total: stats.total,
        wins: stats.wins,
        win_rate: stats.win_rate,
        records,
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct EncounterQuery {
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub category: String,
    pub correct: bool,
}

/// Everything one answer changed, for the battle screen to animate.
#[derive(Debug, Serialize)]
pub struct AnswerOut {
    pub correct: bool,
    pub leveled_up: bool,
    pub healed: bool,
    pub defeated: bool,
    pub record: BattleRecord,
    pub progress: ProgressOut,
}

#[derive(Debug, Deserialize)]
pub struct DifficultyIn {
    pub difficulty: GameDifficulty,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
