//! Question pool generation: every valid (a, b) factor pair for a level.

/// The special level whose factor range is 1..=1000 instead of the
/// configured max multiplier.
pub const FULL_RANGE_LEVEL: u32 = 1000;

/// Enumerate all pairs with `1 <= a,b <= max` and `a * b <= level`.
/// Pure and deterministic; callers consume the result as a set.
pub fn generate_pool(level: u32, max_multiplier: u32) -> Vec<(u32, u32)> {
  let max = if level == FULL_RANGE_LEVEL { FULL_RANGE_LEVEL } else { max_multiplier };
  let mut pairs = Vec::new();
  for a in 1..=max {
    if a > level {
      break; // a * 1 already exceeds the level
    }
    for b in 1..=max {
      if a * b > level {
        break;
      }
      pairs.push((a, b));
    }
  }
  pairs
}
