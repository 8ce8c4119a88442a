use serde_json::Value;

/// Canonical string form of an event identifier.
///
/// The live API emits integer ids while the CSV archive emits strings, often
/// with a trailing ".0" from a spreadsheet round-trip. This is the single
/// source of truth for identifier equality across the two sources, and is
/// idempotent: feeding its output back in returns the same string.
pub fn normalize_id(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(|f| {
                    if f.is_finite() && f.fract() == 0.0 {
                        format!("{}", f as i64)
                    } else {
                        f.to_string()
                    }
                })
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            Some(canonical_numeric(s).unwrap_or_else(|| s.to_string()))
        }
        other => Some(other.to_string()),
    }
}

/// "123", "123.0", "0123.000" -> "123". Anything else is not numeric.
fn canonical_numeric(s: &str) -> Option<String> {
    let (digits, fraction) = match s.split_once('.') {
        Some((d, f)) => (d, Some(f)),
        None => (s, None),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b == b'0') {
            return None;
        }
    }
    let trimmed = digits.trim_start_matches('0');
    Some(if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    })
}

/// Tolerant integer coercion: integer numbers, floats (truncated), and
/// numeric strings all parse; anything else is `None`.
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f as i64),
        _ => None,
    }
}
