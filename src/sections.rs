pub mod clients;
pub mod companies;
pub mod events;
pub mod gallery;

use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;

/// Split into groups of `size`, preserving order; the last group may be short.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return Vec::new();
    }
    items.chunks(size).map(|c| c.to_vec()).collect()
}

/// Fill exactly `rows` slots by cycling through `items` with
/// `index = (row * 3 + seed) % len`. Same seed, same sequence.
pub fn sample_rows<T: Clone>(items: &[T], rows: usize, seed: usize) -> Vec<T> {
    if items.is_empty() {
        return Vec::new();
    }
    (0..rows)
        .map(|row| items[(row * 3 + seed) % items.len()].clone())
        .collect()
}

/// Shuffled copy, cut to at most `limit` entries.
pub fn shuffle_take<T: Clone, R: Rng + ?Sized>(items: &[T], limit: usize, rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out.truncate(limit);
    out
}

/// Non-empty string field, numbers stringified.
pub(crate) fn text_field(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Server id when present, else the positional index.
pub(crate) fn record_id(record: &Value, index: usize) -> String {
    text_field(record, "id").unwrap_or_else(|| index.to_string())
}
