//! Attention stream engine.
//!
//! This module provides:
//! - Normalization of four record kinds into [`StreamItem`]
//! - Project tree flattening with breadcrumb paths
//! - Stream building with a single stable ordering
//! - Named views and the counters that back a view selector
//!
//! Everything here is synchronous and pure over a borrowed snapshot. The
//! current instant is always passed in, never read from a clock.

mod builder;
mod flatten;
mod item;
mod normalize;
mod stats;
mod view;

pub use builder::{build_stream, compare_items};
pub use flatten::flatten;
pub use item::{
    ItemPriority, SourceCollection, SourceKind, SourceRecord, StreamItem, UserIdentity,
};
pub use normalize::{
    days_until, goal_is_actionable, grocery_is_actionable, normalize, normalize_goal,
    normalize_grocery, normalize_project, normalize_purchase, project_is_actionable,
    purchase_is_actionable, Record, GOAL_HORIZON_DAYS, PATH_SEPARATOR,
};
pub use stats::StreamStats;
pub use view::{
    filter_stream, is_due_this_week, is_due_today, is_overdue, StreamView, WEEK_SPAN_DAYS,
};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::Snapshot;

/// Caller-facing display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Display hint only; the engine ignores it.
    #[serde(default = "default_true")]
    pub show_filters: bool,
    #[serde(default)]
    pub default_view: StreamView,
}

fn default_max_items() -> usize {
    10
}
fn default_true() -> bool {
    true
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            show_filters: true,
            default_view: StreamView::All,
        }
    }
}

/// Handlers a presentation layer supplies for user actions on stream items.
///
/// The engine never calls these itself. Both are optional; the defaults do
/// nothing.
pub trait StreamActions {
    /// The user marked `item` as done.
    fn on_complete_task(&mut self, item: &StreamItem<'_>) -> Result<()> {
        let _ = item;
        Ok(())
    }

    /// The user asked to open the record behind a stream item.
    fn on_navigate(&mut self, collection: SourceCollection, id: &str) -> Result<()> {
        let _ = (collection, id);
        Ok(())
    }
}

/// Stream engine bound to one instant and one user.
///
/// # Example
/// ```rust,ignore
/// let engine = StreamEngine::new(now).with_user(user);
/// let stream = engine.build(&snapshot);
/// let stats = engine.stats(&stream);
/// let visible = engine.view(&stream, StreamView::Overdue);
/// ```
#[derive(Debug, Clone)]
pub struct StreamEngine {
    now: NaiveDateTime,
    user: UserIdentity,
    config: StreamConfig,
}

impl StreamEngine {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now,
            user: UserIdentity::default(),
            config: StreamConfig::default(),
        }
    }

    pub fn with_user(mut self, user: UserIdentity) -> Self {
        self.user = user;
        self
    }

    pub fn with_config(mut self, config: StreamConfig) -> Self {
        self.config = config;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    pub fn user(&self) -> &UserIdentity {
        &self.user
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Build the ranked stream from a snapshot.
    pub fn build<'a>(&self, snapshot: &'a Snapshot) -> Vec<StreamItem<'a>> {
        build_stream(
            &snapshot.projects,
            &snapshot.groceries,
            &snapshot.purchases,
            &snapshot.goals,
            self.now,
        )
    }

    /// Items visible under `view`, capped at the configured `max_items`.
    pub fn view<'s, 'a>(
        &self,
        stream: &'s [StreamItem<'a>],
        view: StreamView,
    ) -> Vec<&'s StreamItem<'a>> {
        filter_stream(stream, view, &self.user, self.today(), self.config.max_items)
    }

    /// Counters over the whole stream.
    pub fn stats(&self, stream: &[StreamItem<'_>]) -> StreamStats {
        StreamStats::compute(stream, &self.user, self.today())
    }

    /// Counter for every view, in selector order.
    pub fn view_counts(&self, stream: &[StreamItem<'_>]) -> Vec<(StreamView, usize)> {
        let stats = self.stats(stream);
        StreamView::ALL
            .into_iter()
            .map(|view| (view, stats.count_for(view)))
            .collect()
    }
}
