use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::config::{Config, JST};

/// Which source produced a merged event record.
///
/// Provenance only matters for merge precedence: the live API always wins
/// over the CSV archive when both carry the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum EventSource {
    Api,
    Backup,
}

/// Event-search status filter understood by the API.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::FromRepr,
)]
#[repr(u8)]
pub enum EventStatus {
    Ongoing = 1,
    Scheduled = 3,
    Finished = 4,
}

impl EventStatus {
    /// Every status the search endpoint serves.
    pub const ALL: [EventStatus; 3] = [Self::Ongoing, Self::Scheduled, Self::Finished];

    pub(crate) fn code(self) -> u8 {
        self as u8
    }
}

/// Whether an event is open to every performer or restricted to invited
/// entrants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum EntryScope {
    Restricted,
    #[default]
    Open,
}

impl From<bool> for EntryScope {
    fn from(restricted: bool) -> Self {
        if restricted {
            Self::Restricted
        } else {
            Self::Open
        }
    }
}

/// A single campaign event, merged from the live API and the CSV archive.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    /// Normalized identifier, unique within a merged event set.
    pub event_id: String,
    pub event_name: String,
    /// Start time, epoch seconds. Events without a parseable start are
    /// dropped during the merge, so this is always present.
    pub started_at: i64,
    pub ended_at: Option<i64>,
    /// URL key for the public event page; may be empty.
    pub event_url_key: String,
    pub entry_scope: EntryScope,
    pub source: EventSource,
}

impl EventRecord {
    /// Public event page, when the event has a URL key.
    pub fn event_url(&self, config: &Config) -> Option<String> {
        (!self.event_url_key.is_empty())
            .then(|| format!("https://{}/event/{}", config.host, self.event_url_key))
    }

    /// Start time formatted for display in JST, e.g. "2023/09/01 00:00".
    pub fn started_str(&self) -> String {
        format_jst(Some(self.started_at))
    }

    /// End time formatted for display in JST; empty when unknown.
    pub fn ended_str(&self) -> String {
        format_jst(self.ended_at)
    }
}

pub(crate) fn format_jst(epoch: Option<i64>) -> String {
    epoch
        .and_then(|ts| JST.timestamp_opt(ts, 0).single())
        .map(|dt| dt.format("%Y/%m/%d %H:%M").to_string())
        .unwrap_or_default()
}
