//! View-selector counters.
//!
//! Counts are always taken over the full stream, whatever view is active,
//! and reuse the exact view predicates so counters and lists cannot drift.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::item::{StreamItem, UserIdentity};
use super::view::{is_due_this_week, is_due_today, is_overdue, StreamView};

/// Summary counters for a built stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamStats {
    pub total: usize,
    pub overdue: usize,
    pub due_today: usize,
    pub due_this_week: usize,
    pub assigned: usize,
}

impl StreamStats {
    pub fn compute(stream: &[StreamItem<'_>], user: &UserIdentity, today: NaiveDate) -> Self {
        stream.iter().fold(Self::default(), |mut stats, item| {
            stats.total += 1;
            stats.overdue += usize::from(is_overdue(item, today));
            stats.due_today += usize::from(is_due_today(item, today));
            stats.due_this_week += usize::from(is_due_this_week(item, today));
            stats.assigned += usize::from(item.is_assigned_to(user));
            stats
        })
    }

    /// Counter shown next to `view` in a view selector.
    pub fn count_for(&self, view: StreamView) -> usize {
        match view {
            StreamView::All => self.total,
            StreamView::Overdue => self.overdue,
            StreamView::Today => self.due_today,
            StreamView::Week => self.due_this_week,
            StreamView::Assigned => self.assigned,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{GroceryItem, Priority, ProjectNode};
    use crate::stream::builder::build_stream;
    use crate::stream::view::filter_stream;
    use crate::urgency::Urgency;
    use chrono::{Duration, NaiveDateTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap().and_hms_opt(18, 0, 0).unwrap()
    }

    #[test]
    fn empty_stream_counts_zero() {
        let stats = StreamStats::compute(&[], &UserIdentity::default(), now().date());
        assert_eq!(stats, StreamStats::default());
        assert!(stats.is_empty());
    }

    #[test]
    fn counts_match_filtered_lengths() {
        let projects = vec![
            ProjectNode::new("late", "Late")
                .with_due_date(now() - Duration::days(3))
                .with_assignee("me"),
            ProjectNode::new("now", "Now").with_due_date(now()),
            ProjectNode::new("later", "Later").with_priority(Priority::Critical),
        ];
        let mut milk = GroceryItem::new("milk", "Milk");
        milk.urgency = Some(Urgency::Today);
        milk.assigned_to = Some("Me Myself".into());

        let groceries = [milk];
        let stream = build_stream(&projects, &groceries, &[], &[], now());
        let user = UserIdentity::new(Some("me".into()), Some("Me Myself".into()));
        let today = now().date();
        let stats = StreamStats::compute(&stream, &user, today);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.due_today, 2);
        assert_eq!(stats.assigned, 2);
        for view in StreamView::ALL {
            let shown = filter_stream(&stream, view, &user, today, usize::MAX).len();
            assert_eq!(shown, stats.count_for(view), "view {view}");
        }
    }
}
