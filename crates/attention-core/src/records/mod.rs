//! Source record types.
//!
//! Four independently modeled record kinds feed the attention stream. They
//! are owned and persisted by an external store; the engine only reads them.

pub mod lenient;
mod household;
mod goal;
mod project;

pub use goal::{Goal, GoalStatus};
pub use household::{DeliveryStatus, GroceryItem, PurchaseItem, PurchasePriority};
pub use project::{NodeStatus, ProjectNode};

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Priority level shared by project nodes and grocery items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Parse a priority token case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Sort rank, most urgent first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// High or critical.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }

    /// Lenient decoder: unknown tokens become `None`.
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(lenient::optional_token(deserializer)?
            .as_deref()
            .and_then(Self::parse))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
