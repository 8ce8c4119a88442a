use serde_json::Value;

use crate::normalize::coerce_i64;

// Field aliases shared by the room-list and profile payloads. The API has
// renamed these over the years; candidates are listed most-recent first.
pub(crate) const RANK_LABEL_KEYS: &[&str] = &[
    "show_rank_subdivided",
    "show_rank",
    "show_rank_sub",
    "show_rank_name",
];
pub(crate) const LEVEL_KEYS: &[&str] = &["room_level", "level", "lv"];
pub(crate) const FOLLOWER_KEYS: &[&str] = &["follower_num", "follower_count", "followers"];
pub(crate) const LIVE_DAYS_KEYS: &[&str] = &["live_continuous_days", "live_continuous"];

/// First value among `keys` that is present and non-empty.
///
/// Records from the API and the CSV archive spell the same logical attribute
/// under several legacy names; callers list the candidates in priority order.
/// `null`, empty strings, and empty arrays count as absent.
pub(crate) fn first_of<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(key))
        .find(|value| !is_absent(value))
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// First present value among `keys`, rendered as a trimmed display string.
pub(crate) fn text_of(record: &Value, keys: &[&str]) -> Option<String> {
    first_of(record, keys).map(|value| match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    })
}

/// First present value among `keys`, coerced to an integer; coercion failure
/// counts as absent.
pub(crate) fn int_of(record: &Value, keys: &[&str]) -> Option<i64> {
    first_of(record, keys).and_then(coerce_i64)
}

/// Boolean-ish flags arrive as booleans, numbers, or strings.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.to_string() == "1",
        Value::String(s) => {
            matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
        }
        _ => false,
    }
}
