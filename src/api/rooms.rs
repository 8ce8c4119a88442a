use serde_json::Value;
use tracing::{debug, instrument};

use crate::api;
use crate::config::Config;
use crate::error::ShowroomError;
use crate::normalize::coerce_i64;
use crate::record::first_of;

const ROOM_ARRAY_KEYS: &[&str] = &["list", "data", "event_list", "ranking"];
/// Rows per room_list page; a shorter page is the last one.
const PAGE_SIZE: usize = 30;

/// Raw participation records for one event's room list.
///
/// Pages through the room_list endpoint until a missing/short page, a 404,
/// any other failure, or the page cap; whatever was accumulated is returned.
#[instrument(skip(client, config))]
pub(crate) async fn get_event_rooms(
    client: &reqwest::Client,
    config: &Config,
    event_id: &str,
) -> Vec<Value> {
    let url = config.room_list_url();
    let mut rooms = Vec::new();

    for page in 1..=config.room_list_page_cap {
        let query = [
            ("event_id", event_id.to_string()),
            ("page", page.to_string()),
        ];
        let body = match api::get_json(client, &url, &query, config.room_list_timeout).await {
            Ok(body) => body,
            Err(e) => {
                debug!(event_id, page, error = %e, "room list page failed");
                break;
            }
        };
        let Some(page_rooms) = room_array(&body) else {
            break;
        };
        let len = page_rooms.len();
        rooms.extend(page_rooms.iter().cloned());
        if len < PAGE_SIZE {
            break;
        }
    }
    rooms
}

/// The room_list payload is either a bare array or an object with the array
/// under one of several legacy keys.
fn room_array(body: &Value) -> Option<&Vec<Value>> {
    match body {
        Value::Array(rooms) if !rooms.is_empty() => Some(rooms),
        Value::Object(_) => first_of(body, ROOM_ARRAY_KEYS).and_then(Value::as_array),
        _ => None,
    }
}

/// Best-effort participant count for an event; `None` means unknown.
///
/// A 404 is a real answer (the event has no room list), reported as zero.
#[instrument(skip(client, config))]
pub(crate) async fn get_total_entries(
    client: &reqwest::Client,
    config: &Config,
    event_id: &str,
) -> Option<u64> {
    let url = config.room_list_url();
    let query = [
        ("event_id", event_id.to_string()),
        ("page", "1".to_string()),
    ];
    match api::get_json(client, &url, &query, config.room_list_timeout).await {
        Ok(body) => parse_total_entries(&body),
        Err(ShowroomError::UnexpectedStatus { status, .. })
            if status == reqwest::StatusCode::NOT_FOUND =>
        {
            Some(0)
        }
        Err(e) => {
            debug!(event_id, error = %e, "participant count unavailable");
            None
        }
    }
}

fn parse_total_entries(body: &Value) -> Option<u64> {
    match body {
        Value::Array(rooms) => Some(rooms.len() as u64),
        Value::Object(map) => {
            for key in ["total_entries", "total"] {
                if let Some(value) = map.get(key) {
                    return coerce_i64(value).map(|n| n.max(0) as u64);
                }
            }
            // No total on this shape; the first page's length is the best guess.
            map.get("list")
                .and_then(Value::as_array)
                .map(|rooms| rooms.len() as u64)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn room_array_handles_every_observed_shape() {
        let body = json!({"list": [{"room_id": 1}]});
        assert_eq!(room_array(&body).map(Vec::len), Some(1));

        let body = json!({"ranking": [{"room_id": 1}, {"room_id": 2}]});
        assert_eq!(room_array(&body).map(Vec::len), Some(2));

        let body = json!([{"room_id": 1}]);
        assert_eq!(room_array(&body).map(Vec::len), Some(1));

        assert!(room_array(&json!({"list": []})).is_none());
        assert!(room_array(&json!([])).is_none());
        assert!(room_array(&json!("nope")).is_none());
    }

    #[test]
    fn total_entries_prefers_explicit_totals() {
        assert_eq!(
            parse_total_entries(&json!({"total_entries": 120, "list": [1, 2]})),
            Some(120)
        );
        assert_eq!(parse_total_entries(&json!({"total": "55"})), Some(55));
        assert_eq!(parse_total_entries(&json!({"total_entries": 0})), Some(0));
    }

    #[test]
    fn total_entries_falls_back_to_list_length() {
        assert_eq!(
            parse_total_entries(&json!({"list": [{}, {}, {}]})),
            Some(3)
        );
        assert_eq!(parse_total_entries(&json!([{}, {}])), Some(2));
        assert_eq!(parse_total_entries(&json!({"something": "else"})), None);
        assert_eq!(parse_total_entries(&json!({"total": "N/A"})), None);
    }
}
