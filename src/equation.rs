//! Equation-mode question generation (four operators).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::Operator;

const OPERATORS: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

/// A freshly generated equation question. Operands start at 1, so a zero
/// divisor can never be produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Equation {
  pub a: u32,
  pub b: u32,
  pub op: Operator,
}

/// Draw operands uniformly from `1..=max_multiplier` and a uniform
/// operator. Equation questions are not tracked by the solved set; each
/// round gets a fresh draw.
pub fn generate_equation<R: Rng + ?Sized>(max_multiplier: u32, rng: &mut R) -> Equation {
  let max = max_multiplier.max(1);
  let a = rng.gen_range(1..=max);
  let b = rng.gen_range(1..=max);
  let op = *OPERATORS.choose(rng).unwrap_or(&Operator::Mul);
  Equation { a, b, op }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn operands_stay_in_range_and_divisor_is_never_zero() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..2000 {
      let eq = generate_equation(10, &mut rng);
      assert!((1..=10).contains(&eq.a));
      assert!((1..=10).contains(&eq.b));
      if eq.op == Operator::Div {
        assert!(eq.b >= 1);
      }
    }
  }

  #[test]
  fn all_operators_eventually_appear() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut seen = [false; 4];
    for _ in 0..200 {
      let eq = generate_equation(10, &mut rng);
      let idx = OPERATORS.iter().position(|&o| o == eq.op).unwrap();
      seen[idx] = true;
    }
    assert!(seen.iter().all(|&s| s), "operators seen: {seen:?}");
  }

  #[test]
  fn zero_multiplier_is_coerced_to_one() {
    let mut rng = StdRng::seed_from_u64(9);
    let eq = generate_equation(0, &mut rng);
    assert_eq!((eq.a, eq.b), (1, 1));
  }
}
