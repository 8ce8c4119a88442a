use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::model::{EntryScope, EventRecord, EventSource};
use crate::normalize::normalize_id;
use crate::record::{first_of, int_of, text_of, truthy};

const ID_KEYS: &[&str] = &["event_id", "id"];
const NAME_KEYS: &[&str] = &["event_name", "event_name_jp", "name", "eventTitle"];
const URL_KEY_KEYS: &[&str] = &["event_url_key", "event_url"];
const START_KEYS: &[&str] = &["started_at", "start_at", "startedAt", "start"];
const END_KEYS: &[&str] = &["ended_at", "end_at", "endedAt", "end"];
const ENTRY_SCOPE_KEYS: &[&str] = &["is_entry_scope_inner"];

/// Union the two event sources into one deduplicated, time-filtered list,
/// most recent first.
///
/// API records always win over backup records sharing the same normalized
/// id. Records without a usable id, or whose start time is unparseable or
/// precedes `cutoff_epoch` (the boundary itself is included), are dropped.
/// The sort by start time is stable, so equal timestamps keep their
/// API-then-backup insertion order.
pub fn merge_events(api: Vec<Value>, backup: Vec<Value>, cutoff_epoch: i64) -> Vec<EventRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut by_id: HashMap<String, (Value, EventSource)> = HashMap::new();

    for raw in api {
        let Some(id) = first_of(&raw, ID_KEYS).and_then(normalize_id) else {
            continue;
        };
        if !by_id.contains_key(&id) {
            order.push(id.clone());
        }
        by_id.insert(id, (raw, EventSource::Api));
    }
    for raw in backup {
        let Some(id) = first_of(&raw, ID_KEYS).and_then(normalize_id) else {
            continue;
        };
        if by_id.contains_key(&id) {
            continue;
        }
        order.push(id.clone());
        by_id.insert(id, (raw, EventSource::Backup));
    }

    let total = order.len();
    let mut events: Vec<EventRecord> = Vec::with_capacity(total);
    for id in order {
        let Some((raw, source)) = by_id.remove(&id) else {
            continue;
        };
        let Some(started_at) = int_of(&raw, START_KEYS) else {
            continue;
        };
        if started_at < cutoff_epoch {
            continue;
        }
        let restricted = first_of(&raw, ENTRY_SCOPE_KEYS).is_some_and(truthy);
        events.push(EventRecord {
            event_id: id,
            event_name: text_of(&raw, NAME_KEYS).unwrap_or_else(|| "(no title)".to_string()),
            started_at,
            ended_at: int_of(&raw, END_KEYS),
            event_url_key: text_of(&raw, URL_KEY_KEYS).unwrap_or_default(),
            entry_scope: EntryScope::from(restricted),
            source,
        });
    }

    events.sort_by(|a, b| b.started_at.cmp(&a.started_at));
    debug!(merged = events.len(), total, "merged event sources");
    events
}
