//! Pure answer grading for both drill modes.

use crate::domain::Operator;

/// Absolute tolerance for equation-mode grading. Division produces
/// non-terminating decimals; the client rounds, so we compare loosely.
pub const EQUATION_TOLERANCE: f64 = 1e-4;

/// Result of grading one submission.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Graded {
  pub is_correct: bool,
  pub correct_answer: f64,
}

/// Exact integer grading for multiplication questions.
pub fn grade_multiplication(user_answer: i64, a: u32, b: u32) -> Graded {
  let correct = i64::from(a) * i64::from(b);
  Graded {
    is_correct: user_answer == correct,
    correct_answer: correct as f64,
  }
}

/// Tolerance grading for equation questions. The generator never emits a
/// zero divisor, so `correct_answer` is always finite.
pub fn grade_equation(user_answer: f64, a: u32, b: u32, op: Operator) -> Graded {
  let correct = op.apply(f64::from(a), f64::from(b));
  Graded {
    is_correct: (user_answer - correct).abs() < EQUATION_TOLERANCE,
    correct_answer: correct,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn multiplication_is_exact() {
    for a in 1..=12u32 {
      for b in 1..=12u32 {
        let product = i64::from(a) * i64::from(b);
        assert!(grade_multiplication(product, a, b).is_correct);
        assert!(!grade_multiplication(product + 1, a, b).is_correct);
        assert!(!grade_multiplication(product - 1, a, b).is_correct);
      }
    }
  }

  #[test]
  fn multiplication_reports_correct_answer() {
    let g = grade_multiplication(0, 7, 8);
    assert!(!g.is_correct);
    assert_eq!(g.correct_answer, 56.0);
  }

  #[test]
  fn division_accepts_rounded_input() {
    // 1 / 3 entered with four decimals
    let g = grade_equation(0.3333, 1, 3, Operator::Div);
    assert!(g.is_correct);
    let g = grade_equation(0.33, 1, 3, Operator::Div);
    assert!(!g.is_correct);
  }

  #[test]
  fn tolerance_is_absolute() {
    let g = grade_equation(12.00009, 3, 4, Operator::Mul);
    assert!(g.is_correct);
    let g = grade_equation(12.001, 3, 4, Operator::Mul);
    assert!(!g.is_correct);
  }

  #[test]
  fn subtraction_can_go_negative() {
    let g = grade_equation(-5.0, 3, 8, Operator::Sub);
    assert!(g.is_correct);
    assert_eq!(g.correct_answer, -5.0);
  }
}
