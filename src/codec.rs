//! Codec for the opaque session collections the client carries between
//! requests: the history log and the solved-pair set.
//!
//! The wire format is a JSON array in a string field. The earlier ad hoc
//! `||` / `;` delimited encoding collided with user-typed answer text;
//! JSON escaping makes the round trip lossless for arbitrary entries.

use crate::domain::{pair_key, HistoryEntry, SolvedSet};

/// Serialize the history log for the response payload.
pub fn serialize_history(entries: &[HistoryEntry]) -> String {
  serde_json::to_string(entries).unwrap_or_else(|_| "[]".into())
}

/// Parse a client-supplied history string. Empty input means "no history
/// yet"; anything else must be a valid JSON array of entries.
pub fn parse_history(raw: &str) -> Result<Vec<HistoryEntry>, serde_json::Error> {
  if raw.trim().is_empty() {
    return Ok(Vec::new());
  }
  serde_json::from_str(raw)
}

/// Serialize the solved set for the response payload.
pub fn serialize_solved(solved: &SolvedSet) -> String {
  let keys: Vec<&str> = solved.keys().collect();
  serde_json::to_string(&keys).unwrap_or_else(|_| "[]".into())
}

/// Parse a client-supplied solved-set string (JSON array of "a-b" keys).
pub fn parse_solved(raw: &str) -> Result<SolvedSet, serde_json::Error> {
  if raw.trim().is_empty() {
    return Ok(SolvedSet::new());
  }
  let keys: Vec<String> = serde_json::from_str(raw)?;
  Ok(keys.into_iter().collect())
}

/// Add the directional "a-b" key to the set. Idempotent.
pub fn update_solved(solved: &mut SolvedSet, a: u32, b: u32) {
  solved.insert(pair_key(a, b));
}
