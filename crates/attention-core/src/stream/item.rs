//! Stream item types and utilities.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SnapshotError;
use crate::records::{
    lenient, Goal, GroceryItem, Priority, ProjectNode, PurchaseItem, PurchasePriority,
};
use crate::urgency::{self, Urgency, UrgencyBucket};

/// Kind of record a stream item was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    Project,
    Task,
    QuickNote,
    Grocery,
    Purchase,
    Goal,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Task => "task",
            Self::QuickNote => "quickNote",
            Self::Grocery => "grocery",
            Self::Purchase => "purchase",
            Self::Goal => "goal",
        }
    }
}

/// External store a record lives in. Half of a stream item's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceCollection {
    Projects,
    Groceries,
    Purchases,
    Goals,
}

impl SourceCollection {
    pub const ALL: [SourceCollection; 4] = [
        Self::Projects,
        Self::Groceries,
        Self::Purchases,
        Self::Goals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Groceries => "groceries",
            Self::Purchases => "purchases",
            Self::Goals => "goals",
        }
    }
}

impl fmt::Display for SourceCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceCollection {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| SnapshotError::UnknownCollection(s.to_string()))
    }
}

/// Priority carried on a stream item.
///
/// Task-style priorities rank directly. Purchase tiers do not belong to the
/// task scale and rank as medium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ItemPriority {
    Level(Priority),
    Purchase(PurchasePriority),
}

impl ItemPriority {
    pub fn rank(&self) -> u8 {
        match self {
            Self::Level(p) => p.rank(),
            Self::Purchase(_) => Priority::Medium.rank(),
        }
    }
}

/// Borrowed reference to the record an item came from.
///
/// Only used to hand the original back to navigation and completion
/// handlers; the engine never inspects it.
#[derive(Debug, Clone, Copy)]
pub enum SourceRecord<'a> {
    Project(&'a ProjectNode),
    Grocery(&'a GroceryItem),
    Purchase(&'a PurchaseItem),
    Goal(&'a Goal),
}

/// A single entry in the attention stream.
///
/// Rebuilt from the current snapshot on every pass and discarded afterwards.
/// `(source_collection, id)` is the primary key; ids alone may collide across
/// collections.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamItem<'a> {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    #[serde(with = "lenient::date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<ItemPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub completed: bool,
    pub has_reminder: bool,
    pub source_collection: SourceCollection,
    #[serde(skip)]
    pub source: SourceRecord<'a>,
}

impl<'a> StreamItem<'a> {
    /// Primary key within one aggregation pass.
    pub fn key(&self) -> (SourceCollection, &str) {
        (self.source_collection, self.id.as_str())
    }

    /// Priority rank for ordering; absent priority ranks as medium.
    pub fn priority_rank(&self) -> u8 {
        self.priority
            .as_ref()
            .map_or(Priority::Medium.rank(), ItemPriority::rank)
    }

    pub fn urgency_bucket(&self, today: NaiveDate) -> UrgencyBucket {
        urgency::classify(self.urgency.as_ref(), self.due_date, today)
    }

    pub fn due_label(&self, today: NaiveDate) -> String {
        urgency::relative_label(self.due_date, today)
    }

    pub fn is_assigned_to(&self, user: &UserIdentity) -> bool {
        self.assigned_to
            .as_deref()
            .is_some_and(|assignee| user.matches(assignee))
    }
}

/// Current user as supplied by the session collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl UserIdentity {
    pub fn new(id: Option<String>, display_name: Option<String>) -> Self {
        Self { id, display_name }
    }

    /// True when `assignee` equals either representation of this identity.
    pub fn matches(&self, assignee: &str) -> bool {
        self.id.as_deref() == Some(assignee) || self.display_name.as_deref() == Some(assignee)
    }
}
