//! Grocery and purchase records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{lenient, Priority};
use crate::urgency::Urgency;

/// An item on a shared grocery list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: String,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub store: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(default, with = "lenient::date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(
        default,
        deserialize_with = "Urgency::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub urgency: Option<Urgency>,
    #[serde(
        default,
        deserialize_with = "Priority::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
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
    pub completed: bool,
    /// Outside the active shopping list.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub historical: bool,
}

impl GroceryItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Delivery state of a purchase request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    Ordered,
    Shipped,
    Delivered,
    Cancelled,
    Other(String),
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Ordered => "ordered",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Other(raw) => raw,
        }
    }

    /// Delivered or cancelled.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl From<String> for DeliveryStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" | "" => Self::Pending,
            "ordered" => Self::Ordered,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Other(raw),
        }
    }
}

impl From<DeliveryStatus> for String {
    fn from(status: DeliveryStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Purchase priority tiers. `MustHave` is the top tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PurchasePriority {
    MustHave,
    NiceToHave,
    Other(String),
}

impl PurchasePriority {
    pub fn as_str(&self) -> &str {
        match self {
            Self::MustHave => "must-have",
            Self::NiceToHave => "nice-to-have",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for PurchasePriority {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "must-have" => Self::MustHave,
            "nice-to-have" => Self::NiceToHave,
            _ => Self::Other(raw),
        }
    }
}

impl From<PurchasePriority> for String {
    fn from(priority: PurchasePriority) -> Self {
        priority.as_str().to_string()
    }
}

/// A purchase request tracked through delivery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseItem {
    pub id: String,
    pub item_name: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub store: Option<String>,
    #[serde(default, with = "lenient::date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(
        default,
        deserialize_with = "Urgency::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub urgency: Option<Urgency>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: DeliveryStatus,
    #[serde(
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<PurchasePriority>,
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
}

impl PurchaseItem {
    pub fn new(id: impl Into<String>, item_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            item_name: item_name.into(),
            ..Self::default()
        }
    }
}
