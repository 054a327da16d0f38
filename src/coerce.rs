use serde_json::Value;

const TRUTHY_TOKENS: [&str; 6] = ["1", "true", "yes", "y", "on", "t"];

/// Returns true iff the trimmed, lowercased token is one of the accepted truthy spellings.
pub fn parse_flag(raw: &str) -> bool {
    let token = raw.trim().to_lowercase();
    TRUTHY_TOKENS.contains(&token.as_str())
}

/// Coerces a loosely typed request value (form string, JSON bool, number) into a strict bool.
/// Absent and `null` values are false.
pub fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => parse_flag(s),
        Some(other) => parse_flag(&other.to_string()),
    }
}
