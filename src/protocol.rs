//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.
//!
//! Wire names are camelCase; the history and solved-set collections travel
//! as opaque encoded strings (see `codec`) because the client simply round
//! trips them between requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::domain::{GameMode, GameSession, Operator, Question, SolvedSet};
use crate::error::ApiError;
use crate::progression::{elapsed_seconds, RoundInput};

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    pub level: u32,
    #[serde(default)]
    pub solved: Option<String>,
}

/// DTO for question delivery; `{a: 0, b: 0}` is the exhaustion sentinel.
#[derive(Serialize)]
pub struct QuestionOut {
    pub a: u32,
    pub b: u32,
    pub level: u32,
}

impl From<Question> for QuestionOut {
    fn from(q: Question) -> Self {
        Self { a: q.a, b: q.b, level: q.level }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerIn {
    pub a: u32,
    pub b: u32,
    pub user_answer: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOut {
    pub is_correct: bool,
    pub correct: i64,
}

/// The combined "play a round" request: the full client-carried session
/// plus this round's submission. Unknown games start with `a = b = 0`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundIn {
    pub level: u32,
    #[serde(default)]
    pub mode: GameMode,
    #[serde(default)]
    pub a: u32,
    #[serde(default)]
    pub b: u32,
    #[serde(default)]
    pub operator: Option<Operator>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub perfect_streak: u32,
    #[serde(default)]
    pub attempts_left: u32,
    /// Encoded solved-set string (see `codec::parse_solved`).
    #[serde(default)]
    pub solved: String,
    /// Encoded history string (see `codec::parse_history`).
    #[serde(default)]
    pub history: String,
    #[serde(default)]
    pub answer_checked: bool,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub correct_answer: f64,
    #[serde(default)]
    pub game_won: bool,
    #[serde(default)]
    pub game_lost: bool,
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub game_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_answer: String,
    #[serde(default)]
    pub next_question: bool,
}

impl RoundIn {
    /// Rebuild the session from the wire fields. Decoding failures of the
    /// opaque collections are client faults.
    pub fn into_session(self, now: DateTime<Utc>) -> Result<(GameSession, RoundInput), ApiError> {
        let solved: SolvedSet = codec::parse_solved(&self.solved)?;
        let history = codec::parse_history(&self.history)?;
        let session = GameSession {
            game_id: self.game_id.unwrap_or_default(),
            level: self.level,
            mode: self.mode,
            question: Question::new(self.a, self.b, self.level),
            operator: self.operator,
            streak: self.streak,
            perfect_streak: self.perfect_streak,
            attempts_left: self.attempts_left,
            solved,
            history,
            game_won: self.game_won,
            game_lost: self.game_lost,
            bonus_awarded: false,
            game_start: self.game_start.unwrap_or(now),
            answer_checked: self.answer_checked,
            is_correct: self.is_correct,
            correct_answer: self.correct_answer,
            user_answer: self.user_answer.clone(),
        };
        let input = RoundInput {
            user_answer: self.user_answer,
            next_question: self.next_question,
        };
        Ok((session, input))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundOut {
    pub game_id: String,
    pub level: u32,
    pub mode: GameMode,
    pub a: u32,
    pub b: u32,
    pub operator: Option<Operator>,
    pub question_text: String,
    pub streak: u32,
    pub perfect_streak: u32,
    pub attempts_left: u32,
    pub solved: String,
    pub history: String,
    pub answer_checked: bool,
    pub is_correct: bool,
    pub correct_answer: f64,
    pub user_answer: String,
    pub game_won: bool,
    pub game_lost: bool,
    pub bonus_awarded: bool,
    pub game_start: DateTime<Utc>,
    /// Informational only; never gates a transition.
    pub elapsed_seconds: i64,
}

/// Flatten the updated session back into the wire shape.
pub fn to_round_out(session: &GameSession, now: DateTime<Utc>) -> RoundOut {
    RoundOut {
        game_id: session.game_id.clone(),
        level: session.level,
        mode: session.mode,
        a: session.question.a,
        b: session.question.b,
        operator: session.operator,
        question_text: session.question_text(),
        streak: session.streak,
        perfect_streak: session.perfect_streak,
        attempts_left: session.attempts_left,
        solved: codec::serialize_solved(&session.solved),
        history: codec::serialize_history(&session.history),
        answer_checked: session.answer_checked,
        is_correct: session.is_correct,
        correct_answer: session.correct_answer,
        user_answer: session.user_answer.clone(),
        game_won: session.game_won,
        game_lost: session.game_lost,
        bonus_awarded: session.bonus_awarded,
        game_start: session.game_start,
        elapsed_seconds: elapsed_seconds(session, now),
    }
}

/// Read-only diagnostics dump of the active settings.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOut {
    pub levels: Vec<u32>,
    pub default_max_multiplier: u32,
    pub low_probability_factors: Vec<u32>,
    pub low_factor_chance_percent: u32,
    pub required_correct_answers: u32,
    pub initial_attempts: u32,
    pub bonus_attempts_threshold: u32,
}

impl From<&crate::config::GameSettings> for SettingsOut {
    fn from(s: &crate::config::GameSettings) -> Self {
        Self {
            levels: s.levels.clone(),
            default_max_multiplier: s.default_max_multiplier,
            low_probability_factors: s.low_probability_factors.clone(),
            low_factor_chance_percent: s.low_factor_chance_percent,
            required_correct_answers: s.required_correct_answers,
            initial_attempts: s.initial_attempts,
            bonus_attempts_threshold: s.bonus_attempts_threshold,
        }
    }
}
