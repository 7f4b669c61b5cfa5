//! Named views over a built stream.
//!
//! A view is a predicate plus a cap on the number of items. Filtering keeps
//! the stream's order; it never re-sorts.

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::item::{StreamItem, UserIdentity};
use crate::urgency::{Urgency, LEGACY_WEEK_TOKEN};

/// Days after today still counted as "this week".
pub const WEEK_SPAN_DAYS: u64 = 7;

/// Selectable stream view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamView {
    #[default]
    All,
    Overdue,
    Today,
    Week,
    Assigned,
}

impl StreamView {
    pub const ALL: [StreamView; 5] = [
        Self::All,
        Self::Overdue,
        Self::Today,
        Self::Week,
        Self::Assigned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Overdue => "overdue",
            Self::Today => "today",
            Self::Week => "week",
            Self::Assigned => "assigned",
        }
    }

    /// Whether `item` belongs in this view.
    pub fn matches(&self, item: &StreamItem<'_>, user: &UserIdentity, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Overdue => is_overdue(item, today),
            Self::Today => is_due_today(item, today),
            Self::Week => is_due_this_week(item, today),
            Self::Assigned => item.is_assigned_to(user),
        }
    }
}

impl fmt::Display for StreamView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == name)
            .ok_or_else(|| {
                format!("unknown view '{s}' (expected all, overdue, today, week or assigned)")
            })
    }
}

/// Due strictly before today's midnight.
pub fn is_overdue(item: &StreamItem<'_>, today: NaiveDate) -> bool {
    item.due_date
        .is_some_and(|due| due < today.and_time(NaiveTime::MIN))
}

/// Due on today's calendar day, or undated with the `today` token.
pub fn is_due_today(item: &StreamItem<'_>, today: NaiveDate) -> bool {
    match item.due_date {
        Some(due) => due.date() == today,
        None => item.urgency == Some(Urgency::Today),
    }
}

/// Due within today through today + 7 days, or undated with a near-term token.
///
/// The undated fallback accepts `today`, `tomorrow` and the legacy
/// `this_week` spelling only; canonical `thisWeek` does not match.
pub fn is_due_this_week(item: &StreamItem<'_>, today: NaiveDate) -> bool {
    match item.due_date {
        Some(due) => {
            let last = today
                .checked_add_days(Days::new(WEEK_SPAN_DAYS))
                .unwrap_or(NaiveDate::MAX);
            (today..=last).contains(&due.date())
        }
        None => match &item.urgency {
            Some(Urgency::Today | Urgency::Tomorrow) => true,
            Some(Urgency::Unrecognized(token)) => token == LEGACY_WEEK_TOKEN,
            _ => false,
        },
    }
}

/// Apply `view` to `stream` and keep at most `max_items` items, in order.
pub fn filter_stream<'s, 'a>(
    stream: &'s [StreamItem<'a>],
    view: StreamView,
    user: &UserIdentity,
    today: NaiveDate,
    max_items: usize,
) -> Vec<&'s StreamItem<'a>> {
    stream
        .iter()
        .filter(|item| view.matches(item, user, today))
        .take(max_items)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{GroceryItem, ProjectNode, Priority};
    use crate::stream::builder::build_stream;
    use chrono::NaiveDateTime;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap().and_hms_opt(10, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        now().date()
    }

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn grocery(id: &str, urgency: Option<&str>, due: Option<NaiveDateTime>) -> GroceryItem {
        let mut item = GroceryItem::new(id, id);
        item.urgency = urgency.map(Urgency::from);
        item.due_date = due;
        item
    }

    fn view_ids(groceries: &[GroceryItem], view: StreamView) -> Vec<String> {
        let stream = build_stream(&[], groceries, &[], &[], now());
        filter_stream(&stream, view, &UserIdentity::default(), today(), usize::MAX)
            .into_iter()
            .map(|i| i.id.clone())
            .collect()
    }

    #[test]
    fn overdue_is_strictly_before_today() {
        let items = vec![
            grocery("yesterday", None, Some(day(9))),
            grocery("today", None, Some(day(10))),
            grocery("late-today", None, Some(now() - chrono::Duration::hours(2))),
        ];
        assert_eq!(view_ids(&items, StreamView::Overdue), vec!["yesterday"]);
    }

    #[test]
    fn today_view_uses_date_then_token() {
        let items = vec![
            grocery("dated", None, Some(day(10))),
            grocery("token", Some("today"), None),
            grocery("token-but-dated", Some("today"), Some(day(12))),
            grocery("tomorrow", Some("tomorrow"), None),
        ];
        assert_eq!(view_ids(&items, StreamView::Today), vec!["dated", "token"]);
    }

    #[test]
    fn week_view_is_inclusive_of_day_seven() {
        let items = vec![
            grocery("d0", None, Some(day(10))),
            grocery("d7", None, Some(day(17))),
            grocery("d8", None, Some(day(18))),
            grocery("past", None, Some(day(9))),
        ];
        assert_eq!(view_ids(&items, StreamView::Week), vec!["d0", "d7"]);
    }

    #[test]
    fn week_view_accepts_legacy_token_only() {
        let items = vec![
            grocery("legacy", Some("this_week"), None),
            grocery("canonical", Some("thisWeek"), None),
            grocery("today", Some("today"), None),
            grocery("tomorrow", Some("tomorrow"), None),
            grocery("later", Some("30days"), None),
        ];
        let mut ids = view_ids(&items, StreamView::Week);
        ids.sort();
        assert_eq!(ids, vec!["legacy", "today", "tomorrow"]);
    }

    #[test]
    fn assigned_matches_id_or_display_name() {
        let projects = vec![
            ProjectNode::new("a", "A").with_priority(Priority::High).with_assignee("u-1"),
            ProjectNode::new("b", "B").with_priority(Priority::High).with_assignee("Robin"),
            ProjectNode::new("c", "C").with_priority(Priority::High).with_assignee("someone"),
            ProjectNode::new("d", "D").with_priority(Priority::High),
        ];
        let stream = build_stream(&projects, &[], &[], &[], now());
        let user = UserIdentity::new(Some("u-1".into()), Some("Robin".into()));
        let ids: Vec<&str> = filter_stream(&stream, StreamView::Assigned, &user, today(), 10)
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn truncates_after_filtering() {
        let items: Vec<GroceryItem> = (11..=25)
            .map(|d| grocery(&format!("g{d}"), None, Some(day(d))))
            .collect();
        let stream = build_stream(&[], &items, &[], &[], now());
        let user = UserIdentity::default();
        let visible = filter_stream(&stream, StreamView::All, &user, today(), 10);
        assert_eq!(visible.len(), 10);
        assert_eq!(visible[0].id, "g11");
        assert_eq!(visible[9].id, "g20");

        let none = filter_stream(&stream, StreamView::All, &UserIdentity::default(), today(), 0);
        assert!(none.is_empty());
    }

    #[test]
    fn view_names_parse() {
        assert_eq!("Overdue".parse::<StreamView>().unwrap(), StreamView::Overdue);
        assert!("later".parse::<StreamView>().is_err());
        assert_eq!(StreamView::Week.to_string(), "week");
    }
}
