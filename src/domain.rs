//! Domain models used by the backend: questions, the solved set, history
//! entries and the client-carried game session.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which drill is the user playing?
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
  /// Classic times-table practice (exact integer grading).
  #[default]
  Multiplication,
  /// Four-operator equations (tolerance grading for division results).
  Equations,
}

/// Operator of an equation-mode question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
  Add,
  Sub,
  Mul,
  Div,
}

impl Operator {
  pub fn apply(self, a: f64, b: f64) -> f64 {
    match self {
      Operator::Add => a + b,
      Operator::Sub => a - b,
      Operator::Mul => a * b,
      Operator::Div => a / b,
    }
  }

  pub fn symbol(self) -> char {
    match self {
      Operator::Add => '+',
      Operator::Sub => '−',
      Operator::Mul => '×',
      Operator::Div => '÷',
    }
  }
}

/// Directional key used by the solved set. (3,4) and (4,3) are tracked
/// as distinct facts on purpose.
pub fn pair_key(a: u32, b: u32) -> String {
  format!("{}-{}", a, b)
}

/// A single question. Invariant: `a * b <= level`, except the exhausted
/// sentinel `{0, 0, level}` which means "no unsolved pair left".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub a: u32,
  pub b: u32,
  pub level: u32,
}

impl Question {
  pub fn new(a: u32, b: u32, level: u32) -> Self {
    Self { a, b, level }
  }

  /// Sentinel returned when the pool has no unsolved pair left.
  pub fn exhausted(level: u32) -> Self {
    Self { a: 0, b: 0, level }
  }

  pub fn is_exhausted(&self) -> bool {
    self.a == 0 && self.b == 0
  }

  pub fn key(&self) -> String {
    pair_key(self.a, self.b)
  }

  pub fn answer(&self) -> u32 {
    self.a * self.b
  }

  pub fn display(&self) -> String {
    format!("{} × {} = ?", self.a, self.b)
  }
}

/// Pairs answered correctly in the current attempt, keyed "a-b".
/// Grows monotonically within an attempt; cleared on loss or new game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvedSet(BTreeSet<String>);

impl SolvedSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contains(&self, key: &str) -> bool {
    self.0.contains(key)
  }

  /// Idempotent: inserting an existing key is a no-op.
  pub fn insert(&mut self, key: String) {
    self.0.insert(key);
  }

  pub fn clear(&mut self) {
    self.0.clear();
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }
}

impl FromIterator<String> for SolvedSet {
  fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

/// One graded answer, append-only for the life of a game attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
  pub question_text: String,
  pub correct_answer: f64,
  pub user_answer: String,
  pub is_correct: bool,
}

/// The whole session state reconstructed from client-supplied fields on
/// every request and handed back in the response. The server keeps no
/// memory of it between requests.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
  /// Correlation id for logs; regenerated on every new game.
  pub game_id: String,
  pub level: u32,
  pub mode: GameMode,
  pub question: Question,
  /// Operator of the current question in equation mode.
  pub operator: Option<Operator>,
  pub streak: u32,
  /// Consecutive correct answers since the last miss or bonus award.
  pub perfect_streak: u32,
  pub attempts_left: u32,
  pub solved: SolvedSet,
  pub history: Vec<HistoryEntry>,
  pub game_won: bool,
  pub game_lost: bool,
  /// True when a bonus attempt was awarded by the last graded round.
  pub bonus_awarded: bool,
  pub game_start: DateTime<Utc>,

  // Per-question grading flags, reset when a new question is fetched.
  pub answer_checked: bool,
  pub is_correct: bool,
  pub correct_answer: f64,
  pub user_answer: String,
}

impl GameSession {
  /// True when either terminal flag is set.
  pub fn is_over(&self) -> bool {
    self.game_won || self.game_lost
  }

  /// Question text for history entries and responses.
  pub fn question_text(&self) -> String {
    match self.operator {
      Some(op) => format!("{} {} {} = ?", self.question.a, op.symbol(), self.question.b),
      None => self.question.display(),
    }
  }
}
