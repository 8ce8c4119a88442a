use std::time::Duration;

use serde_json::Value;
use tracing::{instrument, warn};

use crate::api;
use crate::config::Config;
use crate::merge::merge_events;
use crate::model::{EventRecord, EventStatus};
use crate::record::first_of;

const EVENT_ARRAY_KEYS: &[&str] = &["events", "event_list"];
const PAGE_THROTTLE: Duration = Duration::from_millis(80);

/// Page through the event-search endpoint for each requested status.
///
/// Paging stops on an empty page, any request/decode failure, or the safety
/// cap. A failure only ends that status's loop; the other statuses still
/// run, and whatever was accumulated so far is kept. Never fails.
#[instrument(skip(client, config))]
pub(crate) async fn get_api_events(
    client: &reqwest::Client,
    config: &Config,
    statuses: &[EventStatus],
) -> Vec<Value> {
    let url = config.event_search_url();
    let mut all_events = Vec::new();

    for status in statuses {
        for page in 1..=config.event_page_cap {
            let query = [
                ("status", status.code().to_string()),
                ("page", page.to_string()),
            ];
            let body = match api::get_json(client, &url, &query, config.search_timeout).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(%status, page, error = %e, "event search failed, skipping status");
                    break;
                }
            };
            let Some(events) = page_events(&body) else {
                break;
            };
            all_events.extend(events.iter().cloned());
            tokio::time::sleep(PAGE_THROTTLE).await;
        }
    }
    all_events
}

fn page_events(body: &Value) -> Option<&Vec<Value>> {
    first_of(body, EVENT_ARRAY_KEYS).and_then(Value::as_array)
}

/// Raw rows from the backup CSV archive; empty on any failure.
#[instrument(skip(client, config))]
pub(crate) async fn get_backup_events(client: &reqwest::Client, config: &Config) -> Vec<Value> {
    match api::get_csv_rows(client, &config.backup_csv_url, config.search_timeout).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "backup archive unavailable");
            Vec::new()
        }
    }
}

/// Combined event list from both sources, merged and time-filtered.
pub(crate) async fn get_events(client: &reqwest::Client, config: &Config) -> Vec<EventRecord> {
    let api_events = get_api_events(client, config, &EventStatus::ALL).await;
    let backup_events = get_backup_events(client, config).await;
    merge_events(api_events, backup_events, config.cutoff_epoch)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_events_tries_both_spellings() {
        let body = json!({"events": [{"event_id": 1}]});
        assert_eq!(page_events(&body).map(Vec::len), Some(1));

        let body = json!({"event_list": [{"event_id": 1}, {"event_id": 2}]});
        assert_eq!(page_events(&body).map(Vec::len), Some(2));

        // An empty primary array falls through to the legacy key.
        let body = json!({"events": [], "event_list": [{"event_id": 3}]});
        assert_eq!(page_events(&body).map(Vec::len), Some(1));
    }

    #[test]
    fn page_without_events_ends_paging() {
        assert!(page_events(&json!({"events": []})).is_none());
        assert!(page_events(&json!({"ok": true})).is_none());
        assert!(page_events(&json!({"events": "unexpected"})).is_none());
    }
}
