use std::time::Duration;

use chrono_tz::Tz;

/// Display/formatting time zone used by the platform.
pub const JST: Tz = chrono_tz::Asia::Tokyo;

/// Earliest eligible event start: 2023-09-01 00:00 JST.
pub const CUTOFF_EPOCH: i64 = 1_693_494_000;

/// Process-wide constants: endpoints, the cutoff instant, paging caps, and
/// outbound timeouts.
///
/// Built once and passed explicitly into the pipeline rather than read from
/// ambient globals; the fields are fixed platform facts, but tests and forks
/// can override them one by one.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host serving both the public API and the display pages.
    pub host: String,
    /// Backup CSV archive of past events.
    pub backup_csv_url: String,
    /// Earliest event start (epoch seconds) the merge step retains.
    pub cutoff_epoch: i64,
    /// Safety cap on event-search pages per status.
    pub event_page_cap: u32,
    /// Cap on room_list pages; the endpoint serves at most ~30 rows per page.
    pub room_list_page_cap: u32,
    /// Width of the parallel profile fan-out.
    pub profile_concurrency: usize,
    pub search_timeout: Duration,
    pub room_list_timeout: Duration,
    pub profile_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "www.showroom-live.com".to_string(),
            backup_csv_url: "https://mksoul-pro.com/showroom/file/sr-event-archive.csv"
                .to_string(),
            cutoff_epoch: CUTOFF_EPOCH,
            event_page_cap: 50,
            room_list_page_cap: 3,
            profile_concurrency: 8,
            search_timeout: Duration::from_secs(10),
            room_list_timeout: Duration::from_secs(8),
            profile_timeout: Duration::from_secs(6),
        }
    }
}

impl Config {
    pub(crate) fn event_search_url(&self) -> String {
        format!("https://{}/api/event/search", self.host)
    }

    pub(crate) fn room_list_url(&self) -> String {
        format!("https://{}/api/event/room_list", self.host)
    }

    pub(crate) fn profile_api_url(&self, room_id: &str) -> String {
        format!("https://{}/api/room/profile?room_id={}", self.host, room_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn cutoff_matches_calendar_date() {
        let cutoff = JST.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).single().unwrap();
        assert_eq!(cutoff.timestamp(), CUTOFF_EPOCH);
    }

    #[test]
    fn urls_use_configured_host() {
        let config = Config::default();
        assert_eq!(
            config.event_search_url(),
            "https://www.showroom-live.com/api/event/search"
        );
        assert_eq!(
            config.profile_api_url("42"),
            "https://www.showroom-live.com/api/room/profile?room_id=42"
        );
    }
}
