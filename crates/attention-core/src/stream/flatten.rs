//! Project tree flattening.
//!
//! Walks a project/task hierarchy depth-first in input order and emits one
//! stream item per actionable node. Archived nodes prune their whole
//! subtree. Nodes that are not actionable themselves are still descended
//! into, so their children can qualify independently.

use super::item::StreamItem;
use super::normalize::{normalize, Record};
use crate::records::ProjectNode;
use chrono::NaiveDateTime;

/// Flatten `nodes` into stream items.
///
/// `ancestors` holds the names of the structural parents of `nodes`, root
/// first; pass `&[]` for a top-level forest. Each child level receives a new
/// path with the parent's name appended, whether or not the parent itself
/// made it into the stream.
pub fn flatten<'a>(
    nodes: &'a [ProjectNode],
    ancestors: &[String],
    now: NaiveDateTime,
) -> Vec<StreamItem<'a>> {
    let mut items = Vec::new();
    collect(nodes, ancestors, now, &mut items);
    items
}

fn collect<'a>(
    nodes: &'a [ProjectNode],
    ancestors: &[String],
    now: NaiveDateTime,
    out: &mut Vec<StreamItem<'a>>,
) {
    for node in nodes {
        if node.archived {
            continue;
        }

        if let Some(item) = normalize(Record::Project { node, ancestors }, now) {
            out.push(item);
        }

        if !node.subtasks.is_empty() {
            let path = [ancestors, std::slice::from_ref(&node.name)].concat();
            collect(&node.subtasks, &path, now, out);
        }
    }
}
