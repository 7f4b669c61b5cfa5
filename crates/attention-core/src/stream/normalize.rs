//! Per-kind record normalization.
//!
//! Each source kind has one pure mapping into [`StreamItem`]. A record that
//! fails its kind's inclusion rule maps to `None`; nothing here can fail.
//!
//! Inclusion rules:
//! - Project node: not archived, not completed, and a due date, a reminder or
//!   high/critical priority.
//! - Grocery: not completed, not historical, and an urgency token, a due date
//!   or high priority.
//! - Purchase: not delivered/cancelled, and an urgency token, a due date or
//!   the must-have tier.
//! - Goal: not achieved/abandoned, with a deadline at most 30 days away
//!   (rounded up to whole days from `now`).

use chrono::NaiveDateTime;

use super::item::{ItemPriority, SourceCollection, SourceKind, SourceRecord, StreamItem};
use crate::records::{
    DeliveryStatus, Goal, GroceryItem, Priority, ProjectNode, PurchaseItem, PurchasePriority,
};

/// Goals further away than this are not yet actionable.
pub const GOAL_HORIZON_DAYS: i64 = 30;

const SECONDS_PER_DAY: i64 = 86_400;

/// Breadcrumb separator for nested project nodes.
pub const PATH_SEPARATOR: &str = " > ";

/// Borrowed view of one source record, tagged by kind.
#[derive(Debug, Clone, Copy)]
pub enum Record<'a, 'p> {
    /// A tree node together with the names of its ancestors, root first.
    Project {
        node: &'a ProjectNode,
        ancestors: &'p [String],
    },
    Grocery(&'a GroceryItem),
    Purchase(&'a PurchaseItem),
    Goal(&'a Goal),
}

/// Normalize any record into a stream item, or `None` when it is not actionable.
pub fn normalize<'a>(record: Record<'a, '_>, now: NaiveDateTime) -> Option<StreamItem<'a>> {
    match record {
        Record::Project { node, ancestors } => normalize_project(node, ancestors),
        Record::Grocery(item) => normalize_grocery(item),
        Record::Purchase(item) => normalize_purchase(item),
        Record::Goal(goal) => normalize_goal(goal, now),
    }
}

pub fn project_is_actionable(node: &ProjectNode) -> bool {
    !node.archived
        && !node.is_completed()
        && (node.due_date.is_some()
            || node.has_reminder()
            || node.priority.is_some_and(|p| p.is_elevated()))
}

pub fn normalize_project<'a>(
    node: &'a ProjectNode,
    ancestors: &[String],
) -> Option<StreamItem<'a>> {
    if !project_is_actionable(node) {
        return None;
    }

    let kind = if node.is_quick_note {
        SourceKind::QuickNote
    } else if node.is_project {
        SourceKind::Project
    } else {
        SourceKind::Task
    };
    let subtitle = (!ancestors.is_empty()).then(|| ancestors.join(PATH_SEPARATOR));

    Some(StreamItem {
        id: node.id.clone(),
        title: node.name.clone(),
        subtitle,
        kind,
        due_date: node.due_date,
        urgency: None,
        status: Some(node.status.as_str().to_string()),
        priority: node.priority.map(ItemPriority::Level),
        owner: node.owner.clone(),
        assigned_to: node.assigned_to.clone(),
        completed: node.is_completed(),
        has_reminder: node.has_reminder(),
        source_collection: SourceCollection::Projects,
        source: SourceRecord::Project(node),
    })
}

pub fn grocery_is_actionable(item: &GroceryItem) -> bool {
    !item.completed
        && !item.historical
        && (item.urgency.is_some()
            || item.due_date.is_some()
            || item.priority == Some(Priority::High))
}

pub fn normalize_grocery(item: &GroceryItem) -> Option<StreamItem<'_>> {
    if !grocery_is_actionable(item) {
        return None;
    }

    Some(StreamItem {
        id: item.id.clone(),
        title: item.name.clone(),
        subtitle: item.store.clone().or_else(|| item.category.clone()),
        kind: SourceKind::Grocery,
        due_date: item.due_date,
        urgency: item.urgency.clone(),
        status: None,
        priority: item.priority.map(ItemPriority::Level),
        owner: item.owner.clone(),
        assigned_to: item.assigned_to.clone(),
        completed: item.completed,
        has_reminder: false,
        source_collection: SourceCollection::Groceries,
        source: SourceRecord::Grocery(item),
    })
}

pub fn purchase_is_actionable(item: &PurchaseItem) -> bool {
    !item.status.is_closed()
        && (item.urgency.is_some()
            || item.due_date.is_some()
            || item.priority == Some(PurchasePriority::MustHave))
}

pub fn normalize_purchase(item: &PurchaseItem) -> Option<StreamItem<'_>> {
    if !purchase_is_actionable(item) {
        return None;
    }

    Some(StreamItem {
        id: item.id.clone(),
        title: item.item_name.clone(),
        subtitle: item.store.clone(),
        kind: SourceKind::Purchase,
        due_date: item.due_date,
        urgency: item.urgency.clone(),
        status: Some(item.status.as_str().to_string()),
        priority: item.priority.clone().map(ItemPriority::Purchase),
        owner: item.owner.clone(),
        assigned_to: item.assigned_to.clone(),
        completed: item.status == DeliveryStatus::Delivered,
        has_reminder: false,
        source_collection: SourceCollection::Purchases,
        source: SourceRecord::Purchase(item),
    })
}

/// Whole days until `deadline`, rounded up. Negative once the deadline has passed.
pub fn days_until(deadline: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let seconds = (deadline - now).num_seconds();
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    if seconds.rem_euclid(SECONDS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

pub fn goal_is_actionable(goal: &Goal, now: NaiveDateTime) -> bool {
    !goal.status.is_closed()
        && goal
            .deadline
            .is_some_and(|deadline| days_until(deadline, now) <= GOAL_HORIZON_DAYS)
}

pub fn normalize_goal(goal: &Goal, now: NaiveDateTime) -> Option<StreamItem<'_>> {
    if !goal_is_actionable(goal, now) {
        return None;
    }

    Some(StreamItem {
        id: goal.id.clone(),
        title: goal.name.clone(),
        subtitle: Some(format!("{}% complete", goal.progress)),
        kind: SourceKind::Goal,
        due_date: goal.deadline,
        urgency: None,
        status: Some(goal.status.as_str().to_string()),
        priority: None,
        owner: goal.owner.clone(),
        assigned_to: None,
        completed: false,
        has_reminder: false,
        source_collection: SourceCollection::Goals,
        source: SourceRecord::Goal(goal),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{GoalStatus, NodeStatus};
    use crate::urgency::Urgency;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn grocery_with_only_high_priority_is_included() {
        let mut item = GroceryItem::new("g1", "Coffee");
        item.priority = Some(Priority::High);
        assert!(normalize(Record::Grocery(&item), now()).is_some());
    }

    #[test]
    fn grocery_without_signal_is_excluded() {
        let mut item = GroceryItem::new("g1", "Coffee");
        item.priority = Some(Priority::Medium);
        assert!(normalize_grocery(&item).is_none());
    }

    #[test]
    fn grocery_completed_or_historical_is_excluded() {
        let mut item = GroceryItem::new("g1", "Coffee");
        item.urgency = Some(Urgency::Today);
        item.completed = true;
        assert!(normalize_grocery(&item).is_none());

        item.completed = false;
        item.historical = true;
        assert!(normalize_grocery(&item).is_none());
    }

    #[test]
    fn grocery_subtitle_falls_back_to_category() {
        let mut item = GroceryItem::new("g1", "Coffee");
        item.urgency = Some(Urgency::Tomorrow);
        item.category = Some("Pantry".into());
        assert_eq!(normalize_grocery(&item).unwrap().subtitle.as_deref(), Some("Pantry"));

        item.store = Some("Corner Shop".into());
        assert_eq!(
            normalize_grocery(&item).unwrap().subtitle.as_deref(),
            Some("Corner Shop")
        );
    }

    #[test]
    fn delivered_must_have_purchase_is_excluded() {
        let mut item = PurchaseItem::new("p1", "Monitor");
        item.priority = Some(PurchasePriority::MustHave);
        item.status = DeliveryStatus::Delivered;
        assert!(normalize_purchase(&item).is_none());

        item.status = DeliveryStatus::Cancelled;
        assert!(normalize_purchase(&item).is_none());

        item.status = DeliveryStatus::Shipped;
        let stream_item = normalize_purchase(&item).unwrap();
        assert!(!stream_item.completed);
        assert_eq!(stream_item.status.as_deref(), Some("shipped"));
    }

    #[test]
    fn purchase_without_signal_is_excluded() {
        let mut item = PurchaseItem::new("p1", "Monitor");
        item.priority = Some(PurchasePriority::NiceToHave);
        item.status = DeliveryStatus::Ordered;
        assert!(normalize_purchase(&item).is_none());

        item.due_date = Some(day(20));
        assert!(normalize_purchase(&item).is_some());
    }

    #[test]
    fn goal_horizon_rounds_up() {
        let base = Goal::new("goal-1", "Run 10k").with_progress(40.0);

        let within = base.clone().with_deadline(now() + Duration::days(30));
        assert!(normalize_goal(&within, now()).is_some());

        let just_past = base
            .clone()
            .with_deadline(now() + Duration::days(30) + Duration::minutes(1));
        assert!(normalize_goal(&just_past, now()).is_none());

        let overdue = base.clone().with_deadline(day(1));
        assert!(normalize_goal(&overdue, now()).is_some());

        assert!(normalize_goal(&base, now()).is_none());
    }

    #[test]
    fn goal_subtitle_reports_progress() {
        let goal = Goal::new("goal-1", "Read 12 books")
            .with_progress(40.0)
            .with_deadline(day(20));
        let item = normalize_goal(&goal, now()).unwrap();
        assert_eq!(item.subtitle.as_deref(), Some("40% complete"));
        assert_eq!(item.kind, SourceKind::Goal);
        assert_eq!(item.source_collection, SourceCollection::Goals);
    }

    #[test]
    fn closed_goals_are_excluded() {
        for status in [GoalStatus::Achieved, GoalStatus::Abandoned] {
            let goal = Goal::new("goal-1", "Ship").with_deadline(day(12)).with_status(status);
            assert!(normalize_goal(&goal, now()).is_none());
        }
    }

    #[test]
    fn completed_critical_node_is_excluded() {
        let node = ProjectNode::new("t1", "Taxes")
            .with_status(NodeStatus::Completed)
            .with_priority(Priority::Critical);
        assert!(normalize_project(&node, &[]).is_none());
    }

    #[test]
    fn node_kind_precedence() {
        let note = ProjectNode::new("n1", "Idea")
            .with_reminder("tonight")
            .as_project()
            .as_quick_note();
        assert_eq!(normalize_project(&note, &[]).unwrap().kind, SourceKind::QuickNote);

        let project = ProjectNode::new("p1", "House").with_priority(Priority::High).as_project();
        assert_eq!(normalize_project(&project, &[]).unwrap().kind, SourceKind::Project);

        let task = ProjectNode::new("t1", "Paint").with_due_date(day(11));
        assert_eq!(normalize_project(&task, &[]).unwrap().kind, SourceKind::Task);
    }

    #[test]
    fn days_until_is_ceiling() {
        assert_eq!(days_until(now() + Duration::hours(1), now()), 1);
        assert_eq!(days_until(now() + Duration::days(2), now()), 2);
        assert_eq!(days_until(now() - Duration::hours(1), now()), 0);
        assert_eq!(days_until(now() - Duration::hours(25), now()), -1);
    }
}
