//! # Attention Stream Core Library
//!
//! This library turns independently modeled personal-productivity records
//! into one ranked "attention stream": the ordered list of things a user
//! should look at next. It follows a CLI-first approach; the `attention`
//! binary is a thin layer over the same library a GUI would use.
//!
//! ## Architecture
//!
//! - **Records**: project/task trees, grocery items, purchase requests and
//!   goals, decoded leniently from an external store
//! - **Urgency**: calendar-day classification into color buckets and
//!   relative labels
//! - **Stream**: normalization, tree flattening, ranking, views and counters
//! - **Storage**: JSON snapshots and TOML configuration
//!
//! ## Key Components
//!
//! - [`StreamEngine`]: Builds, filters and counts a stream for one instant
//! - [`StreamItem`]: Unified item shape shared by all record kinds
//! - [`Snapshot`]: One consistent set of source records
//! - [`Config`]: Application configuration management

pub mod error;
pub mod records;
pub mod storage;
pub mod stream;
pub mod urgency;

pub use error::{ConfigError, CoreError, SnapshotError};
pub use records::{
    DeliveryStatus, Goal, GoalStatus, GroceryItem, NodeStatus, Priority, ProjectNode,
    PurchaseItem, PurchasePriority,
};
pub use storage::{Config, Snapshot, SnapshotStore};
pub use stream::{
    build_stream, filter_stream, SourceCollection, SourceKind, SourceRecord, StreamActions,
    StreamConfig, StreamEngine, StreamItem, StreamStats, StreamView, UserIdentity,
};
pub use urgency::{classify, relative_label, Urgency, UrgencyBucket};
