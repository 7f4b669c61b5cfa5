//! Goal records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Lifecycle status of a goal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GoalStatus {
    #[default]
    Active,
    Achieved,
    Abandoned,
    Other(String),
}

impl GoalStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Achieved => "achieved",
            Self::Abandoned => "abandoned",
            Self::Other(raw) => raw,
        }
    }

    /// Achieved or abandoned.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Achieved | Self::Abandoned)
    }
}

impl From<String> for GoalStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" | "" => Self::Active,
            "achieved" => Self::Achieved,
            "abandoned" => Self::Abandoned,
            _ => Self::Other(raw),
        }
    }
}

impl From<GoalStatus> for String {
    fn from(status: GoalStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A personal goal with a progress percentage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    /// Percent complete, 0-100.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub progress: f64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: GoalStatus,
    #[serde(default, with = "lenient::date", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDateTime>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner: Option<String>,
}

impl Goal {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress.clamp(0.0, 100.0);
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDateTime) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_status(mut self, status: GoalStatus) -> Self {
        self.status = status;
        self
    }
}
