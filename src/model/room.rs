use serde::Serialize;

use crate::config::Config;

/// A broadcaster profile, fully populated even when the lookup fails.
///
/// Numeric fields are `None` when the API omitted them or sent something
/// unparseable; that is "unknown", never an error.
#[derive(Debug, Clone, Serialize)]
pub struct RoomProfile {
    pub room_id: String,
    pub room_name: String,
    pub room_level: Option<i64>,
    /// Platform rank label, e.g. "S4"; opaque and not uniformly formatted.
    pub rank_label: Option<String>,
    pub follower_num: Option<i64>,
    pub live_continuous_days: Option<i64>,
}

impl RoomProfile {
    /// Fallback row for a room whose profile lookup failed.
    ///
    /// Keeps the id and a synthetic display name so the caller can always
    /// render one row per requested room.
    pub fn fallback(room_id: &str) -> Self {
        Self {
            room_id: room_id.to_string(),
            room_name: format!("room_{room_id}"),
            room_level: None,
            rank_label: None,
            follower_num: None,
            live_continuous_days: None,
        }
    }

    /// Public profile page for this room.
    pub fn profile_url(&self, config: &Config) -> String {
        format!(
            "https://{}/room/profile?room_id={}",
            config.host, self.room_id
        )
    }
}
