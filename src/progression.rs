//! Game progression: the per-round state machine over the client-carried
//! session.
//!
//! Transition precedence on every submission:
//!   1. start a new game (no question yet, or a finished game plus the
//!      next-question signal) — no grading happens that round
//!   2. terminal sessions that don't restart are a no-op
//!   3. grade, then apply the correct/incorrect bookkeeping
//!
//! Everything here is a pure function of (incoming session, settings,
//! random draw, now); no global state.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

use crate::codec::update_solved;
use crate::config::GameSettings;
use crate::domain::{GameMode, GameSession, HistoryEntry, Question};
use crate::equation::generate_equation;
use crate::error::RoundError;
use crate::grade::{grade_equation, grade_multiplication, Graded};
use crate::pool::generate_pool;
use crate::select::select_question;
use crate::util::{parse_float_answer, parse_int_answer};

/// What the client sent for this round besides the session itself.
#[derive(Clone, Debug, Default)]
pub struct RoundInput {
  pub user_answer: String,
  /// Client pressed "next" after seeing a graded result.
  pub next_question: bool,
}

/// Advance the session by one round. On `Err` nothing was mutated.
pub fn play_round<R: Rng + ?Sized>(
  session: &mut GameSession,
  input: &RoundInput,
  settings: &GameSettings,
  rng: &mut R,
  now: DateTime<Utc>,
) -> Result<(), RoundError> {
  if wants_new_game(session, input, settings) {
    start_new_game(session, settings, rng, now);
    return Ok(());
  }
  if session.is_over() {
    // won/lost stays frozen until the client asks for a new game
    debug!(target: "game", game = %session.game_id, "Terminal session; ignoring submission");
    return Ok(());
  }

  let graded = grade_submission(session, input)?;

  session.answer_checked = true;
  session.is_correct = graded.is_correct;
  session.correct_answer = graded.correct_answer;
  session.user_answer = input.user_answer.trim().to_string();
  session.bonus_awarded = false;

  let entry = HistoryEntry {
    question_text: session.question_text(),
    correct_answer: graded.correct_answer,
    user_answer: session.user_answer.clone(),
    is_correct: graded.is_correct,
  };

  if graded.is_correct {
    on_correct(session, entry, settings, rng);
  } else {
    on_incorrect(session, entry, settings);
  }
  Ok(())
}

/// Elapsed play time, informational only (never gates a transition).
pub fn elapsed_seconds(session: &GameSession, now: DateTime<Utc>) -> i64 {
  (now - session.game_start).num_seconds().max(0)
}

fn wants_new_game(session: &GameSession, input: &RoundInput, settings: &GameSettings) -> bool {
  if session.question.is_exhausted() {
    return true; // no question yet (or a served exhaustion sentinel)
  }
  if session.answer_checked && input.next_question {
    if session.is_correct {
      return true;
    }
    if settings.initial_attempts > 0 && session.attempts_left == 0 {
      return true;
    }
  }
  false
}

fn start_new_game<R: Rng + ?Sized>(
  session: &mut GameSession,
  settings: &GameSettings,
  rng: &mut R,
  now: DateTime<Utc>,
) {
  session.game_id = Uuid::new_v4().to_string();
  session.streak = 0;
  session.perfect_streak = 0;
  session.attempts_left = settings.initial_attempts;
  session.solved.clear();
  session.history.clear();
  session.game_won = false;
  session.game_lost = false;
  session.bonus_awarded = false;
  session.game_start = now;
  reset_question_flags(session);
  fetch_question(session, settings, rng);
  info!(
    target: "game",
    game = %session.game_id,
    level = session.level,
    mode = ?session.mode,
    question = %session.question.key(),
    "New game started"
  );
}

fn grade_submission(session: &GameSession, input: &RoundInput) -> Result<Graded, RoundError> {
  let malformed = || RoundError::MalformedAnswer(input.user_answer.clone());
  match (session.mode, session.operator) {
    (GameMode::Equations, Some(op)) => {
      let value = parse_float_answer(&input.user_answer).ok_or_else(malformed)?;
      Ok(grade_equation(value, session.question.a, session.question.b, op))
    }
    _ => {
      let value = parse_int_answer(&input.user_answer).ok_or_else(malformed)?;
      Ok(grade_multiplication(value, session.question.a, session.question.b))
    }
  }
}

fn on_correct<R: Rng + ?Sized>(
  session: &mut GameSession,
  entry: HistoryEntry,
  settings: &GameSettings,
  rng: &mut R,
) {
  session.streak += 1;
  session.perfect_streak += 1;
  if session.mode == GameMode::Multiplication {
    update_solved(&mut session.solved, session.question.a, session.question.b);
  }
  session.history.push(entry);

  let bonus_enabled = settings.initial_attempts > 0 && settings.bonus_attempts_threshold > 0;
  if bonus_enabled && session.perfect_streak >= settings.bonus_attempts_threshold {
    // uncapped on purpose: attempts may exceed the initial allotment
    session.attempts_left += 1;
    session.bonus_awarded = true;
    session.perfect_streak = 0;
    info!(target: "game", game = %session.game_id, attempts_left = session.attempts_left, "Bonus attempt awarded");
  }

  if session.streak >= settings.required_correct_answers {
    // terminal: keep the grading flags so the next-question signal
    // starts a fresh game
    session.game_won = true;
    info!(target: "game", game = %session.game_id, streak = session.streak, "Game won");
    return;
  }

  reset_question_flags(session);
  fetch_question(session, settings, rng);
}

fn on_incorrect(session: &mut GameSession, entry: HistoryEntry, settings: &GameSettings) {
  session.perfect_streak = 0;
  if settings.initial_attempts > 0 {
    session.attempts_left = session.attempts_left.saturating_sub(1);
  }
  session.history.push(entry);

  if settings.initial_attempts > 0 && session.attempts_left == 0 {
    session.streak = 0;
    session.solved.clear();
    session.game_lost = true;
    info!(target: "game", game = %session.game_id, "Game lost");
  }
  // the failed question stays on screen either way so the client can
  // show the correct answer before the user proceeds
}

fn reset_question_flags(session: &mut GameSession) {
  session.answer_checked = false;
  session.is_correct = false;
  session.correct_answer = 0.0;
  session.user_answer.clear();
}

fn fetch_question<R: Rng + ?Sized>(session: &mut GameSession, settings: &GameSettings, rng: &mut R) {
  match session.mode {
    GameMode::Multiplication => {
      let pool = generate_pool(session.level, settings.default_max_multiplier);
      let mut question = select_question(
        &pool,
        &session.solved,
        session.level,
        &settings.low_probability_factors,
        settings.low_factor_chance_percent,
        rng,
      );
      if question.is_exhausted() && !pool.is_empty() && !session.solved.is_empty() {
        // curriculum lapped mid-attempt: clear the solved set and redraw
        info!(target: "game", game = %session.game_id, level = session.level, "Pool exhausted mid-attempt; clearing solved set");
        session.solved.clear();
        question = select_question(
          &pool,
          &session.solved,
          session.level,
          &settings.low_probability_factors,
          settings.low_factor_chance_percent,
          rng,
        );
      }
      session.question = question;
      session.operator = None;
    }
    GameMode::Equations => {
      let eq = generate_equation(settings.default_max_multiplier, rng);
      session.question = Question::new(eq.a, eq.b, session.level);
      session.operator = Some(eq.op);
    }
  }
}
