//! Aggregation strategies: pure functions that fold per-server payloads
//! into one logical result under a selectable policy.

use mediapool_rpc::payload::{into_items, total_of};
use mediapool_rpc::{OutcomeFailure, Paged};
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

/// How successful per-server payloads are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateMode {
    /// Concatenate item collections and sum reported totals.
    MergePaged,
    /// Flatten item collections into one list, no count tracking.
    Concatenate,
    /// Keep the first payload in snapshot order, ignore the rest.
    FirstSuccess,
}

/// Caller-supplied ordering over combined items.
pub type ItemComparator = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// Per-call aggregation policy. Never persisted.
#[derive(Clone)]
pub struct AggregationPolicy {
    pub mode: AggregateMode,
    /// Applied to the combined item list after merging.
    pub sort: Option<ItemComparator>,
    /// Truncates the combined list; for merge-paged the reported total is
    /// clamped to the same cap.
    pub limit: Option<usize>,
    /// When true (the default), per-server failures are dropped once the
    /// aggregate is computed; when false they are attached to the result.
    pub ignore_errors: bool,
}

impl AggregationPolicy {
    fn with_mode(mode: AggregateMode) -> Self {
        Self {
            mode,
            sort: None,
            limit: None,
            ignore_errors: true,
        }
    }

    pub fn merge_paged() -> Self {
        Self::with_mode(AggregateMode::MergePaged)
    }

    pub fn concatenate() -> Self {
        Self::with_mode(AggregateMode::Concatenate)
    }

    pub fn first_success() -> Self {
        Self::with_mode(AggregateMode::FirstSuccess)
    }

    pub fn sorted_by(
        mut self,
        cmp: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.sort = Some(Arc::new(cmp));
        self
    }

    pub fn limit(mut self, cap: usize) -> Self {
        self.limit = Some(cap);
        self
    }

    /// Attach per-server failures to the result instead of dropping them.
    pub fn surface_errors(mut self) -> Self {
        self.ignore_errors = false;
        self
    }
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self::merge_paged()
    }
}

/// The combined payload of one fan-out.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregated {
    /// Unified paged collection (merge-paged).
    Paged(Paged),
    /// Flat item list (concatenate).
    List(Vec<Value>),
    /// Bare payload of one server (first-success).
    Single(Value),
}

impl Aggregated {
    /// The combined item list, where one exists.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Aggregated::Paged(paged) => Some(&paged.items),
            Aggregated::List(items) => Some(items),
            Aggregated::Single(_) => None,
        }
    }
}

/// A computed aggregate plus the failures that occurred alongside it.
/// `errors` is populated only when the policy surfaces them.
#[derive(Debug, Clone)]
pub struct AggregatedResult {
    pub payload: Aggregated,
    pub errors: Vec<OutcomeFailure>,
}

/// Concatenates each payload's item collection and sums reported totals,
/// falling back to the collection length where no total is present.
pub fn merge_paged(payloads: Vec<Value>) -> Paged {
    let mut items = Vec::new();
    let mut total_record_count: u64 = 0;
    for payload in payloads {
        let reported = total_of(&payload);
        let page = into_items(payload);
        total_record_count += reported.unwrap_or(page.len() as u64);
        items.extend(page);
    }
    Paged {
        items,
        total_record_count,
    }
}

/// Flattens every payload's item collection into one list.
pub fn concatenate(payloads: Vec<Value>) -> Vec<Value> {
    payloads.into_iter().flat_map(into_items).collect()
}

/// The first payload in snapshot order, untouched.
pub fn first_success(mut payloads: Vec<Value>) -> Option<Value> {
    if payloads.is_empty() {
        None
    } else {
        Some(payloads.swap_remove(0))
    }
}

/// Runs the policy's strategy over the successful payloads, then the
/// ordering and cap post-pass. Sort and cap act on the combined item list,
/// so first-success payloads pass through untouched.
pub fn combine(payloads: Vec<Value>, policy: &AggregationPolicy) -> Aggregated {
    match policy.mode {
        AggregateMode::MergePaged => {
            let mut paged = merge_paged(payloads);
            finish(&mut paged.items, policy);
            if let Some(cap) = policy.limit {
                paged.total_record_count = paged.total_record_count.min(cap as u64);
            }
            Aggregated::Paged(paged)
        }
        AggregateMode::Concatenate => {
            let mut items = concatenate(payloads);
            finish(&mut items, policy);
            Aggregated::List(items)
        }
        AggregateMode::FirstSuccess => {
            Aggregated::Single(first_success(payloads).unwrap_or(Value::Null))
        }
    }
}

fn finish(items: &mut Vec<Value>, policy: &AggregationPolicy) {
    if let Some(cmp) = &policy.sort {
        items.sort_by(|a, b| cmp(a, b));
    }
    if let Some(cap) = policy.limit {
        items.truncate(cap);
    }
}
