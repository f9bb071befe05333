//! Weighted question selection: filter solved pairs, then bias the draw
//! away from low-probability factors without ever fully excluding them.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{pair_key, Question, SolvedSet};

/// Pick one unsolved pair from the pool.
///
/// - Empty remainder -> exhausted sentinel `{0, 0, level}`; the caller
///   decides what that means (the selector never resets anything).
/// - If either partition (low-factor vs regular) is empty, the draw is
///   uniform over everything still available.
/// - Otherwise a percent roll in [0, 100) decides which partition to
///   sample uniformly from.
pub fn select_question<R: Rng + ?Sized>(
  pool: &[(u32, u32)],
  solved: &SolvedSet,
  level: u32,
  low_factors: &[u32],
  low_factor_chance_percent: u32,
  rng: &mut R,
) -> Question {
  let available: Vec<(u32, u32)> = pool
    .iter()
    .copied()
    .filter(|&(a, b)| !solved.contains(&pair_key(a, b)))
    .collect();

  if available.is_empty() {
    return Question::exhausted(level);
  }

  let touches_low = |a: u32, b: u32| low_factors.contains(&a) || low_factors.contains(&b);
  let (undesired, desired): (Vec<(u32, u32)>, Vec<(u32, u32)>) =
    available.iter().copied().partition(|&(a, b)| touches_low(a, b));

  let candidates: &[(u32, u32)] = if undesired.is_empty() || desired.is_empty() {
    &available
  } else if rng.gen_range(0..100) < low_factor_chance_percent {
    &undesired
  } else {
    &desired
  };

  match candidates.choose(rng) {
    Some(&(a, b)) => Question::new(a, b, level),
    // unreachable: candidates is non-empty by construction
    None => Question::exhausted(level),
  }
}
