use tracing::instrument;

use crate::api;
use crate::config::Config;
use crate::model::*;
use crate::rank;

/// The main entry point for talking to SHOWROOM.
///
/// `ShowroomClient` wraps a [`reqwest::Client`] and exposes the event and
/// participant pipeline: merged event discovery, room listing, ranking, and
/// profile enrichment. Failures on the aggregate operations degrade to
/// empty or fallback values rather than errors; the only user-visible
/// failure states are an empty event list and an empty room list.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// use showroom_scraper::ShowroomClient;
///
/// let client = ShowroomClient::new();
/// let events = client.get_events().await;
/// println!("Found {} events", events.len());
/// # }
/// ```
pub struct ShowroomClient {
    http: reqwest::Client,
    config: Config,
}

impl ShowroomClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new client with a custom [`Config`].
    pub fn with_config(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, default headers, etc.
    pub fn with_client(client: reqwest::Client, config: Config) -> Self {
        Self {
            http: client,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The combined event list: live API plus backup archive, deduplicated
    /// (API wins), filtered to the cutoff date, most recent first.
    #[instrument(skip(self))]
    pub async fn get_events(&self) -> Vec<EventRecord> {
        api::events::get_events(&self.http, &self.config).await
    }

    /// Raw event records from the search API for the given statuses.
    #[instrument(skip(self))]
    pub async fn get_api_events(&self, statuses: &[EventStatus]) -> Vec<serde_json::Value> {
        api::events::get_api_events(&self.http, &self.config, statuses).await
    }

    /// Raw event rows from the backup CSV archive; empty on any failure.
    #[instrument(skip(self))]
    pub async fn get_backup_events(&self) -> Vec<serde_json::Value> {
        api::events::get_backup_events(&self.http, &self.config).await
    }

    /// Raw participation records from one event's room list.
    #[instrument(skip(self))]
    pub async fn get_event_rooms(&self, event_id: &str) -> Vec<serde_json::Value> {
        api::rooms::get_event_rooms(&self.http, &self.config, event_id).await
    }

    /// Participant count for an event; `None` when the API gave no answer.
    #[instrument(skip(self))]
    pub async fn get_total_entries(&self, event_id: &str) -> Option<u64> {
        api::rooms::get_total_entries(&self.http, &self.config, event_id).await
    }

    /// One room profile; falls back to a synthetic record on failure.
    #[instrument(skip(self))]
    pub async fn get_room_profile(&self, room_id: &str) -> RoomProfile {
        api::profile::get_room_profile(&self.http, &self.config, room_id).await
    }

    /// Profiles for many rooms, fetched with a bounded fan-out; output order
    /// matches input order.
    #[instrument(skip(self, room_ids))]
    pub async fn get_room_profiles(&self, room_ids: &[String]) -> Vec<RoomProfile> {
        api::profile::get_room_profiles(&self.http, &self.config, room_ids).await
    }

    /// Full pipeline for one event: fetch its room list, rank by
    /// (rank label, room level, follower count) descending, and enrich the
    /// strongest `top_n` rooms. Output is in ranked order.
    #[instrument(skip(self))]
    pub async fn get_top_rooms(&self, event_id: &str, top_n: usize) -> Vec<RoomProfile> {
        let rooms = self.get_event_rooms(event_id).await;
        let room_ids: Vec<String> = rank::rank_rooms(&rooms, top_n)
            .into_iter()
            .map(|room| room.room_id)
            .collect();
        self.get_room_profiles(&room_ids).await
    }
}

impl Default for ShowroomClient {
    fn default() -> Self {
        Self::new()
    }
}
