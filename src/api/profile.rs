use std::collections::HashMap;

use futures::StreamExt;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::api;
use crate::config::Config;
use crate::model::RoomProfile;
use crate::record::{int_of, text_of, FOLLOWER_KEYS, LEVEL_KEYS, LIVE_DAYS_KEYS, RANK_LABEL_KEYS};

const NAME_KEYS: &[&str] = &["room_name", "name", "performer_name"];

/// Fetch one room profile. Total: any fetch or parse failure degrades to
/// [`RoomProfile::fallback`] so the caller always gets a renderable row.
#[instrument(skip(client, config))]
pub(crate) async fn get_room_profile(
    client: &reqwest::Client,
    config: &Config,
    room_id: &str,
) -> RoomProfile {
    let url = config.profile_api_url(room_id);
    match api::get_json(client, &url, &[], config.profile_timeout).await {
        Ok(body) => parse_profile(&body, room_id),
        Err(e) => {
            debug!(room_id, error = %e, "profile lookup failed, using fallback");
            RoomProfile::fallback(room_id)
        }
    }
}

fn parse_profile(body: &Value, room_id: &str) -> RoomProfile {
    RoomProfile {
        room_id: room_id.to_string(),
        room_name: text_of(body, NAME_KEYS).unwrap_or_default(),
        room_level: int_of(body, LEVEL_KEYS),
        rank_label: text_of(body, RANK_LABEL_KEYS),
        follower_num: int_of(body, FOLLOWER_KEYS),
        live_continuous_days: int_of(body, LIVE_DAYS_KEYS),
    }
}

/// Fetch profiles for many rooms with a bounded fan-out.
///
/// Completions land in a map keyed by room id and are re-emitted in input
/// order, so the output is deterministic regardless of fetch latency.
#[instrument(skip(client, config), fields(rooms = room_ids.len()))]
pub(crate) async fn get_room_profiles(
    client: &reqwest::Client,
    config: &Config,
    room_ids: &[String],
) -> Vec<RoomProfile> {
    let mut by_id: HashMap<String, RoomProfile> = futures::stream::iter(room_ids)
        .map(|room_id| async move {
            (
                room_id.clone(),
                get_room_profile(client, config, room_id).await,
            )
        })
        .buffer_unordered(config.profile_concurrency.max(1))
        .collect()
        .await;

    room_ids
        .iter()
        .filter_map(|room_id| by_id.remove(room_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_the_current_field_names() {
        let body = json!({
            "room_id": 4721,
            "room_name": "morning show",
            "room_level": 87,
            "show_rank_subdivided": "S4",
            "follower_num": 12345,
            "live_continuous_days": 200,
        });
        let profile = parse_profile(&body, "4721");
        assert_eq!(profile.room_name, "morning show");
        assert_eq!(profile.room_level, Some(87));
        assert_eq!(profile.rank_label.as_deref(), Some("S4"));
        assert_eq!(profile.follower_num, Some(12345));
        assert_eq!(profile.live_continuous_days, Some(200));
    }

    #[test]
    fn parses_legacy_aliases() {
        let body = json!({
            "performer_name": "old payload",
            "lv": "12",
            "show_rank_name": "B2",
            "followers": "900",
            "live_continuous": 3,
        });
        let profile = parse_profile(&body, "1");
        assert_eq!(profile.room_name, "old payload");
        assert_eq!(profile.room_level, Some(12));
        assert_eq!(profile.rank_label.as_deref(), Some("B2"));
        assert_eq!(profile.follower_num, Some(900));
        assert_eq!(profile.live_continuous_days, Some(3));
    }

    #[test]
    fn bad_numerics_become_unknown_not_errors() {
        let body = json!({
            "room_name": "odd payload",
            "room_level": "??",
            "follower_num": null,
        });
        let profile = parse_profile(&body, "1");
        assert_eq!(profile.room_level, None);
        assert_eq!(profile.follower_num, None);
        assert_eq!(profile.rank_label, None);
    }
}
