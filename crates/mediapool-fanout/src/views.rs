//! Cross-server convenience views: fixed policy and ordering per media
//! endpoint, all built on the fan-out coordinator.

use crate::aggregate::{AggregatedResult, AggregationPolicy};
use crate::pool::ConnectionPool;
use mediapool_core::PoolError;
use mediapool_rpc::Operation;
use serde_json::{json, Value};
use std::cmp::Ordering;

impl ConnectionPool {
    /// Cross-server library listing, sorted by display name.
    pub async fn user_views(&self) -> Result<AggregatedResult, PoolError> {
        let operation = Operation::new("getUserViews").user_arg();
        let policy = AggregationPolicy::merge_paged().sorted_by(by_name);
        self.execute_all(&operation, &policy).await
    }

    /// Cross-server continue-watching row: most recently played first.
    pub async fn resume_items(&self, limit: usize) -> Result<AggregatedResult, PoolError> {
        let operation = Operation::new("getResumableItems")
            .user_arg()
            .arg(json!({ "Limit": limit, "Recursive": true, "MediaTypes": "Video" }));
        let policy = AggregationPolicy::merge_paged()
            .sorted_by(by_last_played_desc)
            .limit(limit);
        self.execute_all(&operation, &policy).await
    }

    /// Cross-server next-up queue, in series/season/episode order.
    pub async fn next_up(&self, limit: usize) -> Result<AggregatedResult, PoolError> {
        let operation = Operation::new("getNextUpEpisodes")
            .user_arg()
            .arg(json!({ "Limit": limit }));
        let policy = AggregationPolicy::merge_paged()
            .sorted_by(by_episode_order)
            .limit(limit);
        self.execute_all(&operation, &policy).await
    }

    /// Cross-server search, ranked by type then name.
    pub async fn search(&self, term: &str, limit: usize) -> Result<AggregatedResult, PoolError> {
        let operation = Operation::new("getSearchHints")
            .user_arg()
            .arg(json!({ "SearchTerm": term, "Limit": limit }));
        let policy = AggregationPolicy::concatenate()
            .sorted_by(by_search_rank)
            .limit(limit);
        self.execute_all(&operation, &policy).await
    }
}

/// Case-insensitive ordering on the item's display name.
pub fn by_name(a: &Value, b: &Value) -> Ordering {
    let left = str_field(a, "Name").to_lowercase();
    let right = str_field(b, "Name").to_lowercase();
    left.cmp(&right)
}

/// Most recent play date first. Dates are ISO-8601 strings, so the
/// lexicographic order is the chronological one; unplayed items sort last.
pub fn by_last_played_desc(a: &Value, b: &Value) -> Ordering {
    last_played(b).cmp(last_played(a))
}

/// Series name, then season index, then episode index, ascending.
pub fn by_episode_order(a: &Value, b: &Value) -> Ordering {
    str_field(a, "SeriesName")
        .cmp(str_field(b, "SeriesName"))
        .then_with(|| num_field(a, "ParentIndexNumber").cmp(&num_field(b, "ParentIndexNumber")))
        .then_with(|| num_field(a, "IndexNumber").cmp(&num_field(b, "IndexNumber")))
}

/// Fixed type-priority ranking for search results, then name.
pub fn by_search_rank(a: &Value, b: &Value) -> Ordering {
    type_rank(a).cmp(&type_rank(b)).then_with(|| by_name(a, b))
}

fn type_rank(item: &Value) -> u8 {
    match str_field(item, "Type") {
        "Movie" => 0,
        "Series" => 1,
        "Episode" => 2,
        "Audio" => 3,
        _ => 4,
    }
}

fn str_field<'a>(item: &'a Value, key: &str) -> &'a str {
    item.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Missing indices sort after everything that has one.
fn num_field(item: &Value, key: &str) -> i64 {
    item.get(key).and_then(Value::as_i64).unwrap_or(i64::MAX)
}

fn last_played(item: &Value) -> &str {
    item.get("UserData")
        .and_then(|user_data| user_data.get("LastPlayedDate"))
        .and_then(Value::as_str)
        .unwrap_or("")
}
