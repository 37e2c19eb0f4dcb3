use chrono::Utc;
use pagetree_ast::BlockKind;
use serde_json::{Number, Value};
use uuid::Uuid;

/// Return `candidate` as a usable id string, or `fallback` when it has none.
///
/// Non-empty strings pass through unchanged and numbers are rendered in their
/// canonical decimal form. Everything else (absent, null, empty string,
/// booleans, objects, arrays) yields the fallback.
pub fn ensure_string_id(candidate: Option<&Value>, fallback: &str) -> String {
    match candidate {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => number_to_id(n),
        _ => fallback.to_string(),
    }
}

fn number_to_id(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }

    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Generate an id for a node that has none.
///
/// Combines the type name, the node's position, a millisecond timestamp and
/// a random suffix; only uniqueness and non-emptiness are guaranteed.
pub fn generate_safe_id(type_name: &str, index: usize) -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}-{}", type_name, index, to_base36(millis), &random[..8])
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Sequential key generator for one rekeying pass
///
/// Every key issued by one generator is distinct, so siblings never collide.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        Self::from_seed(uuid[..12].to_string())
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential key for a block of `kind`
    pub fn new_key(&mut self, kind: &BlockKind) -> String {
        self.count += 1;
        format!("{}-{}-{}", kind, self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn issued(&self) -> u64 {
        self.count
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_ensure_keeps_non_empty_string() {
        assert_eq!(ensure_string_id(Some(&json!("hero-1")), "fb"), "hero-1");
    }

    #[test]
    fn test_ensure_formats_numbers() {
        assert_eq!(ensure_string_id(Some(&json!(42)), "fb"), "42");
        assert_eq!(ensure_string_id(Some(&json!(-7)), "fb"), "-7");
        assert_eq!(ensure_string_id(Some(&json!(3.0)), "fb"), "3");
        assert_eq!(ensure_string_id(Some(&json!(1.5)), "fb"), "1.5");
        assert_eq!(ensure_string_id(Some(&json!(-0.0)), "fb"), "0");
    }

    #[test]
    fn test_ensure_falls_back() {
        assert_eq!(ensure_string_id(None, "fb"), "fb");
        assert_eq!(ensure_string_id(Some(&json!("")), "fb"), "fb");
        assert_eq!(ensure_string_id(Some(&Value::Null), "fb"), "fb");
        assert_eq!(ensure_string_id(Some(&json!(true)), "fb"), "fb");
        assert_eq!(ensure_string_id(Some(&json!({ "id": "x" })), "fb"), "fb");
        assert_eq!(ensure_string_id(Some(&json!(["x"])), "fb"), "fb");
    }

    #[test]
    fn test_safe_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_safe_id("Text", 0)).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_safe_id_carries_type_and_index() {
        let id = generate_safe_id("Hero", 4);
        assert!(id.starts_with("Hero-4-"));
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn test_sequential_keys() {
        let mut generator = IdGenerator::from_seed("abc");

        let k1 = generator.new_key(&BlockKind::Text);
        let k2 = generator.new_key(&BlockKind::Text);

        assert_eq!(k1, "Text-abc-1");
        assert_eq!(k2, "Text-abc-2");
        assert_eq!(generator.seed(), "abc");
        assert_eq!(generator.issued(), 2);
    }

    #[test]
    fn test_generators_use_distinct_seeds() {
        assert_ne!(IdGenerator::new().seed(), IdGenerator::new().seed());
    }
}
