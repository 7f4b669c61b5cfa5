//! Stream building: merge all sources and rank them.
//!
//! Items are concatenated source by source (project tree, groceries,
//! purchases, goals) and then stably sorted:
//!
//! 1. Dated items first, earliest due date first.
//! 2. Two undated items compare by priority rank
//!    (critical < high < medium < low, absent = medium).
//! 3. Anything still equal keeps concatenation order.

use chrono::NaiveDateTime;
use std::cmp::Ordering;
use tracing::debug;

use super::flatten::flatten;
use super::item::StreamItem;
use super::normalize::{normalize, Record};
use crate::records::{Goal, GroceryItem, ProjectNode, PurchaseItem};

/// Ordering used by the stream. Total, and intended for a stable sort.
pub fn compare_items(a: &StreamItem<'_>, b: &StreamItem<'_>) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.priority_rank().cmp(&b.priority_rank()),
    }
}

/// Build the ranked attention stream from one consistent snapshot.
pub fn build_stream<'a>(
    projects: &'a [ProjectNode],
    groceries: &'a [GroceryItem],
    purchases: &'a [PurchaseItem],
    goals: &'a [Goal],
    now: NaiveDateTime,
) -> Vec<StreamItem<'a>> {
    let mut items = flatten(projects, &[], now);
    let from_projects = items.len();

    items.extend(
        groceries
            .iter()
            .filter_map(|item| normalize(Record::Grocery(item), now)),
    );
    items.extend(
        purchases
            .iter()
            .filter_map(|item| normalize(Record::Purchase(item), now)),
    );
    items.extend(
        goals
            .iter()
            .filter_map(|goal| normalize(Record::Goal(goal), now)),
    );

    // Vec::sort_by is stable, which the tie-break rule relies on.
    items.sort_by(compare_items);

    debug!(
        total = items.len(),
        from_projects,
        groceries = groceries.len(),
        purchases = purchases.len(),
        goals = goals.len(),
        "built attention stream"
    );
    items
}
