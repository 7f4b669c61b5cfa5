//! JSON snapshot of the four source collections.
//!
//! The engine reads one consistent snapshot per pass. On disk a snapshot is a
//! single JSON document:
//!
//! ```json
//! { "projects": [...], "groceries": [...], "purchases": [...], "goals": [...] }
//! ```
//!
//! Missing collections decode as empty.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::data_dir;
use crate::error::{Result, SnapshotError};
use crate::records::{
    lenient, DeliveryStatus, Goal, GoalStatus, GroceryItem, NodeStatus, ProjectNode,
    PurchaseItem,
};
use crate::stream::{SourceCollection, SourceRecord, StreamActions, StreamItem};

const SNAPSHOT_FILE: &str = "snapshot.json";

/// All source records at one point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub projects: Vec<ProjectNode>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub groceries: Vec<GroceryItem>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub purchases: Vec<PurchaseItem>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub goals: Vec<Goal>,
}

impl Snapshot {
    /// Read a snapshot file.
    ///
    /// # Errors
    /// Returns [`SnapshotError::LoadFailed`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let snapshot = serde_json::from_str(&content).map_err(|e| SnapshotError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(snapshot)
    }

    /// Write this snapshot as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`SnapshotError::SaveFailed`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| SnapshotError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = serde_json::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
            && self.groceries.is_empty()
            && self.purchases.is_empty()
            && self.goals.is_empty()
    }

    /// Look up a record by its stream key. Project trees are searched at every depth.
    pub fn find(&self, collection: SourceCollection, id: &str) -> Option<SourceRecord<'_>> {
        match collection {
            SourceCollection::Projects => self
                .projects
                .iter()
                .find_map(|node| node.find(id))
                .map(SourceRecord::Project),
            SourceCollection::Groceries => self
                .groceries
                .iter()
                .find(|item| item.id == id)
                .map(SourceRecord::Grocery),
            SourceCollection::Purchases => self
                .purchases
                .iter()
                .find(|item| item.id == id)
                .map(SourceRecord::Purchase),
            SourceCollection::Goals => self
                .goals
                .iter()
                .find(|goal| goal.id == id)
                .map(SourceRecord::Goal),
        }
    }

    /// Mark a record done using its kind's notion of completion.
    ///
    /// - project node: status becomes completed
    /// - grocery: `completed` is set
    /// - purchase: status becomes delivered
    /// - goal: status becomes achieved
    ///
    /// # Errors
    /// Returns [`SnapshotError::RecordNotFound`] when no record has this key.
    pub fn mark_complete(
        &mut self,
        collection: SourceCollection,
        id: &str,
    ) -> Result<(), SnapshotError> {
        let found = match collection {
            SourceCollection::Projects => self
                .projects
                .iter_mut()
                .find_map(|node| node.find_mut(id))
                .map(|node| node.status = NodeStatus::Completed),
            SourceCollection::Groceries => self
                .groceries
                .iter_mut()
                .find(|item| item.id == id)
                .map(|item| item.completed = true),
            SourceCollection::Purchases => self
                .purchases
                .iter_mut()
                .find(|item| item.id == id)
                .map(|item| item.status = DeliveryStatus::Delivered),
            SourceCollection::Goals => self
                .goals
                .iter_mut()
                .find(|goal| goal.id == id)
                .map(|goal| goal.status = GoalStatus::Achieved),
        };
        found.ok_or_else(|| SnapshotError::RecordNotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })
    }
}

/// A snapshot file on disk.
///
/// Completion handlers write through this store; the stream being acted on
/// keeps borrowing its own in-memory snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/snapshot.json`.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(data_dir()?.join(SNAPSHOT_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, or an empty one if the file does not exist yet.
    pub fn load(&self) -> Result<Snapshot> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "snapshot file missing, using empty snapshot");
            return Ok(Snapshot::default());
        }
        Snapshot::load(&self.path)
    }

    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        snapshot.save(&self.path)
    }

    /// Mark one record complete and persist the change.
    pub fn complete(&self, collection: SourceCollection, id: &str) -> Result<()> {
        let mut snapshot = self.load()?;
        snapshot.mark_complete(collection, id)?;
        self.save(&snapshot)?;
        info!(%collection, id, "marked record complete");
        Ok(())
    }
}

impl StreamActions for SnapshotStore {
    fn on_complete_task(&mut self, item: &StreamItem<'_>) -> Result<()> {
        self.complete(item.source_collection, &item.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Priority;

    fn sample() -> Snapshot {
        Snapshot {
            projects: vec![ProjectNode::new("p1", "Home")
                .with_subtask(ProjectNode::new("t1", "Sink").with_priority(Priority::High))],
            groceries: vec![GroceryItem::new("g1", "Milk")],
            purchases: vec![PurchaseItem::new("u1", "Lamp")],
            goals: vec![Goal::new("goal-1", "Run")],
        }
    }

    #[test]
    fn find_searches_nested_projects() {
        let snapshot = sample();
        match snapshot.find(SourceCollection::Projects, "t1") {
            Some(SourceRecord::Project(node)) => assert_eq!(node.name, "Sink"),
            other => panic!("unexpected lookup result: {other:?}"),
        }
        assert!(snapshot.find(SourceCollection::Groceries, "t1").is_none());
    }

    #[test]
    fn mark_complete_per_kind() {
        let mut snapshot = sample();
        snapshot.mark_complete(SourceCollection::Projects, "t1").unwrap();
        snapshot.mark_complete(SourceCollection::Groceries, "g1").unwrap();
        snapshot.mark_complete(SourceCollection::Purchases, "u1").unwrap();
        snapshot.mark_complete(SourceCollection::Goals, "goal-1").unwrap();

        assert!(snapshot.projects[0].subtasks[0].is_completed());
        assert!(!snapshot.projects[0].is_completed());
        assert!(snapshot.groceries[0].completed);
        assert_eq!(snapshot.purchases[0].status, DeliveryStatus::Delivered);
        assert_eq!(snapshot.goals[0].status, GoalStatus::Achieved);
    }

    #[test]
    fn mark_complete_unknown_record() {
        let mut snapshot = sample();
        let err = snapshot
            .mark_complete(SourceCollection::Goals, "missing")
            .unwrap_err();
        assert!(matches!(err, SnapshotError::RecordNotFound { .. }));
    }

    #[test]
    fn partial_document_decodes() {
        let snapshot: Snapshot =
            serde_json::from_str(r#"{"groceries": [{"id": "g", "name": "Tea"}]}"#).unwrap();
        assert_eq!(snapshot.groceries.len(), 1);
        assert!(snapshot.projects.is_empty());
        assert!(!snapshot.is_empty());

        let snapshot: Snapshot =
            serde_json::from_str(r#"{"projects": null, "goals": null}"#).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn store_round_trip_and_complete() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot.json"));
        assert!(store.load().unwrap().is_empty());

        store.save(&sample()).unwrap();
        store.complete(SourceCollection::Groceries, "g1").unwrap();

        let reloaded = store.load().unwrap();
        assert!(reloaded.groceries[0].completed);
        assert_eq!(reloaded.projects[0].subtasks[0].name, "Sink");
    }

    #[test]
    fn load_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Snapshot::load(&path).is_err());
    }
}
