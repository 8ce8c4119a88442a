use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;

use crate::normalize::normalize_id;
use crate::record::{first_of, int_of, text_of, FOLLOWER_KEYS, LEVEL_KEYS, LIVE_DAYS_KEYS, RANK_LABEL_KEYS};

const ROOM_ID_KEYS: &[&str] = &["room_id", "id"];

/// Default number of rooms kept by [`rank_rooms`].
pub const DEFAULT_TOP_N: usize = 10;

/// Parsed, totally-ordered sort key for a platform rank label.
///
/// Ordering is (tier, division) lexicographic, bigger = stronger. An absent
/// label sorts below everything; an unparseable one sits just above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RankKey {
    tier: i32,
    division: u64,
}

impl RankKey {
    const ABSENT: RankKey = RankKey {
        tier: -1,
        division: 0,
    };
    const UNPARSED: RankKey = RankKey {
        tier: 0,
        division: 0,
    };
}

fn tier_of(letters: &str) -> i32 {
    match letters.to_ascii_uppercase().as_str() {
        "SS" => 12,
        "S" => 11,
        "A" => 10,
        "B" => 9,
        "C" => 8,
        "D" => 7,
        "E" => 6,
        _ => 5,
    }
}

fn parse_digits(digits: &str) -> u64 {
    // Saturating fold instead of str::parse, so a pathological digit run
    // still totals rather than overflows.
    digits
        .bytes()
        .fold(0u64, |acc, b| acc.saturating_mul(10).saturating_add(u64::from(b - b'0')))
}

fn first_digit_run(label: &str) -> Option<u64> {
    let start = label.find(|c: char| c.is_ascii_digit())?;
    let run: String = label[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    Some(parse_digits(&run))
}

/// Map a rank label like "S4" or "A1" onto a total order; never fails.
///
/// The leading alphabetic run decides the tier ("SS" strongest, unknown
/// letters mid-ladder) and the digit run right after it breaks ties. Labels
/// with no leading letters fall back to their first digit run; any other
/// non-empty label orders just above "no label at all".
pub fn rank_key(label: Option<&str>) -> RankKey {
    let Some(label) = label.map(str::trim).filter(|s| !s.is_empty()) else {
        return RankKey::ABSENT;
    };
    let letters: String = label
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    if !letters.is_empty() {
        let digits: String = label[letters.len()..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        return RankKey {
            tier: tier_of(&letters),
            division: parse_digits(&digits),
        };
    }
    match first_digit_run(label) {
        Some(division) => RankKey { tier: 5, division },
        None => RankKey::UNPARSED,
    }
}

/// One room's position in the ranked output, with the parsed sort keys kept
/// for display and debugging.
#[derive(Debug, Clone, Serialize)]
pub struct RankedRoom {
    pub room_id: String,
    pub rank_label: Option<String>,
    pub rank_key: RankKey,
    pub room_level: Option<i64>,
    pub follower_num: Option<i64>,
    pub live_continuous_days: Option<i64>,
}

/// Rank an event's raw participation records and keep the strongest `top_n`.
///
/// Pure function of its input: extracts room ids defensively (direct fields
/// or one level down in a nested `room` object; records without an id are
/// skipped), deduplicates keeping the first occurrence, then stable-sorts
/// descending by (rank label, room level, follower count) with unknown
/// numerics treated as -1.
pub fn rank_rooms(records: &[Value], top_n: usize) -> Vec<RankedRoom> {
    let mut rooms: Vec<RankedRoom> = records
        .iter()
        .filter_map(parse_participation)
        .unique_by(|room| room.room_id.clone())
        .collect();

    rooms.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
    rooms.truncate(top_n);
    rooms
}

fn sort_key(room: &RankedRoom) -> (RankKey, i64, i64) {
    (
        room.rank_key,
        room.room_level.unwrap_or(-1),
        room.follower_num.unwrap_or(-1),
    )
}

fn parse_participation(record: &Value) -> Option<RankedRoom> {
    let room_id = extract_room_id(record)?;
    let rank_label = text_of(record, RANK_LABEL_KEYS);
    Some(RankedRoom {
        room_id,
        rank_key: rank_key(rank_label.as_deref()),
        rank_label,
        room_level: int_of(record, LEVEL_KEYS),
        follower_num: int_of(record, FOLLOWER_KEYS),
        live_continuous_days: int_of(record, LIVE_DAYS_KEYS),
    })
}

fn extract_room_id(record: &Value) -> Option<String> {
    first_of(record, ROOM_ID_KEYS)
        .or_else(|| record.get("room").and_then(|room| first_of(room, ROOM_ID_KEYS)))
        .and_then(normalize_id)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn labels_order_by_tier_then_division() {
        assert!(rank_key(Some("S4")) > rank_key(Some("S1")));
        assert!(rank_key(Some("S1")) > rank_key(Some("A10")));
        assert!(rank_key(Some("A10")) > rank_key(Some("B1")));
        assert!(rank_key(Some("B1")) > rank_key(Some("")));
        assert!(rank_key(Some("SS1")) > rank_key(Some("S99")));
    }

    #[test]
    fn odd_labels_still_get_a_total_order() {
        // Unknown letters land mid-ladder, below E.
        assert!(rank_key(Some("E1")) > rank_key(Some("X9")));
        // No leading letters: first digit run, same tier as unknown letters.
        assert_eq!(rank_key(Some("#12")), rank_key(Some("X12")));
        assert_eq!(rank_key(Some("12")), rank_key(Some("X12")));
        // Letters only count the digit run immediately after them.
        assert_eq!(rank_key(Some("rank 12th")), rank_key(Some("rank")));
        // No letters, no digits: above absent, below everything parsed.
        assert!(rank_key(Some("--")) > rank_key(None));
        assert!(rank_key(Some("X0")) > rank_key(Some("--")));
        // Case-insensitive letters.
        assert_eq!(rank_key(Some("s4")), rank_key(Some("S4")));
    }

    #[test]
    fn absent_and_blank_sort_last() {
        assert_eq!(rank_key(None), rank_key(Some("  ")));
        assert!(rank_key(Some("E0")) > rank_key(None));
    }

    #[test]
    fn ranks_by_label_then_level_then_followers() {
        let records = vec![
            json!({"room_id": 1, "show_rank": "A1", "room_level": 80, "follower_num": 10}),
            json!({"room_id": 2, "show_rank": "S1", "room_level": 10, "follower_num": 10}),
            json!({"room_id": 3, "show_rank": "A1", "room_level": 80, "follower_num": 99}),
            json!({"room_id": 4, "show_rank": "A1", "room_level": 90, "follower_num": 1}),
        ];
        let ranked = rank_rooms(&records, DEFAULT_TOP_N);
        let ids: Vec<&str> = ranked.iter().map(|r| r.room_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4", "3", "1"]);
    }

    #[test]
    fn missing_numerics_sort_below_zero() {
        let records = vec![
            json!({"room_id": 1, "show_rank": "B1"}),
            json!({"room_id": 2, "show_rank": "B1", "room_level": 0}),
        ];
        let ranked = rank_rooms(&records, DEFAULT_TOP_N);
        let ids: Vec<&str> = ranked.iter().map(|r| r.room_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn fully_tied_rooms_keep_first_seen_order() {
        let records = vec![
            json!({"room_id": "a", "show_rank": "S1", "room_level": 5, "follower_num": 5}),
            json!({"room_id": "b", "show_rank": "S1", "room_level": 5, "follower_num": 5}),
        ];
        let ranked = rank_rooms(&records, DEFAULT_TOP_N);
        let ids: Vec<&str> = ranked.iter().map(|r| r.room_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn duplicates_keep_the_first_occurrence() {
        let records = vec![
            json!({"room_id": 7, "show_rank": "C1"}),
            json!({"room": {"id": 7}, "show_rank": "S1"}),
            json!({"room_id": 8, "show_rank": "B1"}),
        ];
        let ranked = rank_rooms(&records, DEFAULT_TOP_N);
        let ids: Vec<&str> = ranked.iter().map(|r| r.room_id.as_str()).collect();
        // The nested duplicate of room 7 (and its stronger label) is ignored.
        assert_eq!(ids, vec!["8", "7"]);
        assert_eq!(ranked[1].rank_label.as_deref(), Some("C1"));
    }

    #[test]
    fn nested_and_direct_ids_both_work() {
        let records = vec![
            json!({"room": {"room_id": 1}}),
            json!({"room": {"id": "2"}}),
            json!({"id": 3}),
            json!({"note": "no id here"}),
            json!("not even an object"),
        ];
        let ranked = rank_rooms(&records, DEFAULT_TOP_N);
        let ids: Vec<&str> = ranked.iter().map(|r| r.room_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn truncates_to_top_n() {
        let records: Vec<Value> = (0..20)
            .map(|i| json!({"room_id": i, "follower_num": i}))
            .collect();
        let ranked = rank_rooms(&records, 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].room_id, "19");
        assert_eq!(ranked[0].follower_num, Some(19));
    }
}
