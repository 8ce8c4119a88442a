pub use client::ShowroomClient;
pub use config::{Config, CUTOFF_EPOCH, JST};
pub use error::{Result, ShowroomError};
pub use merge::merge_events;
pub use normalize::normalize_id;
pub use rank::{rank_key, rank_rooms, RankKey, RankedRoom, DEFAULT_TOP_N};

mod api;
mod client;
pub mod config;
pub mod error;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod rank;
pub(crate) mod record;
