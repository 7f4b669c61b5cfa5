//! Urgency classification.
//!
//! Maps a due date and/or an urgency token to a discrete [`UrgencyBucket`]
//! and a human-relative label ("3d overdue", "Today", "In 4 days", "Mar 5").
//!
//! All arithmetic is calendar-day based: an item due at 23:00 today is
//! "Today" at 08:00, never a fraction of a day away.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::records::lenient;

/// Urgency token attached to grocery and purchase records.
///
/// Tokens are matched exactly. `thisWeek` is the canonical week token; the
/// legacy `this_week` spelling is kept as [`Urgency::Unrecognized`] and only
/// the week view gives it meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Urgency {
    Today,
    Tomorrow,
    DayAfter,
    ThisWeek,
    ThirtyDays,
    Date,
    None,
    Unrecognized(String),
}

/// Legacy week token still produced by older clients.
pub const LEGACY_WEEK_TOKEN: &str = "this_week";

impl Urgency {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::DayAfter => "dayAfter",
            Self::ThisWeek => "thisWeek",
            Self::ThirtyDays => "30days",
            Self::Date => "date",
            Self::None => "none",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Bucket used when no due date is available.
    pub fn bucket(&self) -> UrgencyBucket {
        match self {
            Self::Today => UrgencyBucket::Red,
            Self::Tomorrow => UrgencyBucket::Orange,
            Self::DayAfter => UrgencyBucket::Amber,
            Self::ThisWeek => UrgencyBucket::Yellow,
            Self::ThirtyDays => UrgencyBucket::Blue,
            Self::Date => UrgencyBucket::Cyan,
            Self::None | Self::Unrecognized(_) => UrgencyBucket::Gray,
        }
    }

    /// Lenient decoder: blank or non-string values become `None`.
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(lenient::optional_token(deserializer)?.map(Self::from))
    }
}

impl From<String> for Urgency {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "today" => Self::Today,
            "tomorrow" => Self::Tomorrow,
            "dayAfter" => Self::DayAfter,
            "thisWeek" => Self::ThisWeek,
            "30days" => Self::ThirtyDays,
            "date" => Self::Date,
            "none" => Self::None,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<&str> for Urgency {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<Urgency> for String {
    fn from(urgency: Urgency) -> Self {
        urgency.as_str().to_string()
    }
}

/// Discrete severity classification, named by display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyBucket {
    Red,
    Amber,
    Orange,
    Yellow,
    Green,
    Blue,
    Cyan,
    Gray,
}

impl UrgencyBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Amber => "amber",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Cyan => "cyan",
            Self::Gray => "gray",
        }
    }
}

impl fmt::Display for UrgencyBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Whole calendar days from `today` to the due date's day. Negative when overdue.
pub fn diff_days(due: NaiveDateTime, today: NaiveDate) -> i64 {
    (due.date() - today).num_days()
}

/// Classify an item. A due date always wins over the urgency token.
pub fn classify(
    urgency: Option<&Urgency>,
    due: Option<NaiveDateTime>,
    today: NaiveDate,
) -> UrgencyBucket {
    match (due, urgency) {
        (Some(due), _) => match diff_days(due, today) {
            d if d < 0 => UrgencyBucket::Red,
            0 => UrgencyBucket::Amber,
            1..=2 => UrgencyBucket::Orange,
            3..=7 => UrgencyBucket::Yellow,
            _ => UrgencyBucket::Green,
        },
        (None, Some(urgency)) => urgency.bucket(),
        (None, None) => UrgencyBucket::Gray,
    }
}

/// Human-relative due label. Empty when there is no due date.
pub fn relative_label(due: Option<NaiveDateTime>, today: NaiveDate) -> String {
    let Some(due) = due else {
        return String::new();
    };
    match diff_days(due, today) {
        d if d < 0 => format!("{}d overdue", d.abs()),
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d @ 2..=7 => format!("In {d} days"),
        _ => due.format("%b %-d").to_string(),
    }
}
