//! Project/task tree nodes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, Priority};

/// Lifecycle status of a project node.
///
/// Parsed case-insensitively. Tokens other than `open` and `completed` are
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeStatus {
    #[default]
    Open,
    Completed,
    Other(String),
}

impl NodeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::Completed => "completed",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for NodeStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "open" | "" => Self::Open,
            "completed" => Self::Completed,
            _ => Self::Other(raw),
        }
    }
}

impl From<NodeStatus> for String {
    fn from(status: NodeStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A node in a project/task hierarchy.
///
/// The same type serves for project containers, leaf tasks and quick notes;
/// `subtasks` holds children of arbitrary depth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectNode {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: NodeStatus,
    #[serde(
        default,
        deserialize_with = "Priority::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
    #[serde(default, with = "lenient::date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    /// Free-form reminder marker, kept as the source wrote it.
    #[serde(
        default,
        deserialize_with = "lenient::marker",
        skip_serializing_if = "Option::is_none"
    )]
    pub reminder: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_to: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub archived: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub is_project: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub is_quick_note: bool,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub subtasks: Vec<ProjectNode>,
}

impl ProjectNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due: NaiveDateTime) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_reminder(mut self, reminder: impl Into<Value>) -> Self {
        self.reminder = Some(reminder.into());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assigned_to = Some(assignee.into());
        self
    }

    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    pub fn as_project(mut self) -> Self {
        self.is_project = true;
        self
    }

    pub fn as_quick_note(mut self) -> Self {
        self.is_quick_note = true;
        self
    }

    pub fn with_subtask(mut self, child: ProjectNode) -> Self {
        self.subtasks.push(child);
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == NodeStatus::Completed
    }

    pub fn has_reminder(&self) -> bool {
        self.reminder.is_some()
    }

    /// Depth-first search of this node and its descendants.
    pub fn find(&self, id: &str) -> Option<&ProjectNode> {
        if self.id == id {
            return Some(self);
        }
        self.subtasks.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ProjectNode> {
        if self.id == id {
            return Some(self);
        }
        self.subtasks.iter_mut().find_map(|child| child.find_mut(id))
    }
}
