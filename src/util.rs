//! Small utility helpers used across modules.

/// Parse an integer answer. Tolerates surrounding whitespace; anything
/// else is a malformed submission the caller must reject before grading.
pub fn parse_int_answer(s: &str) -> Option<i64> {
  s.trim().parse::<i64>().ok()
}

/// Parse a real-number answer. Both shipped locales are accepted: a
/// decimal comma ("0,25") is treated as a decimal point.
pub fn parse_float_answer(s: &str) -> Option<f64> {
  let t = s.trim().replace(',', ".");
  if t.is_empty() {
    return None;
  }
  t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads. The cut is
/// floored to a char boundary; the input is client-supplied UTF-8.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let cut = s
    .char_indices()
    .map(|(i, _)| i)
    .take_while(|&i| i <= max)
    .last()
    .unwrap_or(0);
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn int_answers_tolerate_whitespace_only() {
    assert_eq!(parse_int_answer(" 56 "), Some(56));
    assert_eq!(parse_int_answer("-3"), Some(-3));
    assert_eq!(parse_int_answer("56.0"), None);
    assert_eq!(parse_int_answer("fifty six"), None);
    assert_eq!(parse_int_answer(""), None);
  }

  #[test]
  fn float_answers_accept_decimal_comma() {
    assert_eq!(parse_float_answer("0,25"), Some(0.25));
    assert_eq!(parse_float_answer(" 12.5 "), Some(12.5));
    assert_eq!(parse_float_answer("-4"), Some(-4.0));
    assert_eq!(parse_float_answer("NaN"), None);
    assert_eq!(parse_float_answer("abc"), None);
    assert_eq!(parse_float_answer(""), None);
  }

  #[test]
  fn trunc_for_log_keeps_short_strings() {
    assert_eq!(trunc_for_log("short", 16), "short");
    assert!(trunc_for_log(&"x".repeat(100), 16).contains("100 bytes total"));
  }

  #[test]
  fn trunc_for_log_cuts_on_char_boundaries() {
    // twelve 3-byte chars = 36 bytes; a byte-offset slice at 32 would panic
    let s = "€".repeat(12);
    let out = trunc_for_log(&s, 32);
    assert!(out.starts_with(&"€".repeat(10)));
    assert!(out.contains("36 bytes total"));

    let s = "ü".repeat(3); // 6 bytes, boundary falls mid-char at 3
    let out = trunc_for_log(&s, 3);
    assert!(out.starts_with('ü'));
    assert!(out.contains("6 bytes total"));
  }
}
