//! Attention stream commands for CLI.

use chrono::{Local, NaiveDateTime};
use clap::Subcommand;
use std::path::PathBuf;
use tracing::debug;

use attention_core::records::lenient::parse_date;
use attention_core::{
    Config, CoreError, SnapshotError, SnapshotStore, SourceCollection, SourceRecord,
    StreamActions, StreamEngine, StreamItem, StreamView,
};

#[derive(Subcommand)]
pub enum StreamAction {
    /// Show the ranked stream
    Show {
        /// View: all, overdue, today, week or assigned (default: config stream.default_view)
        #[arg(long)]
        view: Option<StreamView>,
        /// Maximum items to show (default: config stream.max_items)
        #[arg(long)]
        max: Option<usize>,
        /// Evaluate as of this date or datetime instead of now
        #[arg(long)]
        now: Option<String>,
        /// Snapshot file to read
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print view counters as JSON
    Stats {
        /// Evaluate as of this date or datetime instead of now
        #[arg(long)]
        now: Option<String>,
        /// Snapshot file to read
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Mark a stream item as done
    Complete {
        /// Source collection: projects, groceries, purchases or goals
        collection: SourceCollection,
        /// Record ID
        id: String,
        /// Evaluate as of this date or datetime instead of now
        #[arg(long)]
        now: Option<String>,
        /// Snapshot file to update
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Print the record behind a stream item
    Open {
        /// Source collection: projects, groceries, purchases or goals
        collection: SourceCollection,
        /// Record ID
        id: String,
        /// Snapshot file to read
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
}

/// Terminal-side handlers for stream actions.
struct TerminalActions {
    store: SnapshotStore,
}

impl StreamActions for TerminalActions {
    fn on_complete_task(&mut self, item: &StreamItem<'_>) -> attention_core::error::Result<()> {
        self.store.on_complete_task(item)?;
        println!("Completed: {} ({}/{})", item.title, item.source_collection, item.id);
        Ok(())
    }

    fn on_navigate(
        &mut self,
        collection: SourceCollection,
        id: &str,
    ) -> attention_core::error::Result<()> {
        let snapshot = self.store.load()?;
        let record = snapshot
            .find(collection, id)
            .ok_or_else(|| SnapshotError::RecordNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        let json = match record {
            SourceRecord::Project(node) => serde_json::to_string_pretty(node)?,
            SourceRecord::Grocery(item) => serde_json::to_string_pretty(item)?,
            SourceRecord::Purchase(item) => serde_json::to_string_pretty(item)?,
            SourceRecord::Goal(goal) => serde_json::to_string_pretty(goal)?,
        };
        println!("{json}");
        Ok(())
    }
}

fn resolve_now(raw: Option<&str>) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    match raw {
        Some(raw) => parse_date(raw)
            .ok_or_else(|| format!("cannot parse '{raw}' as a date").into()),
        None => Ok(Local::now().naive_local()),
    }
}

fn open_store(
    config: &Config,
    snapshot: Option<PathBuf>,
) -> Result<SnapshotStore, Box<dyn std::error::Error>> {
    let path = match snapshot {
        Some(path) => path,
        None => config.snapshot_path()?,
    };
    Ok(SnapshotStore::new(path))
}

fn engine_for(config: &Config, now: NaiveDateTime) -> StreamEngine {
    StreamEngine::new(now)
        .with_user(config.user.clone())
        .with_config(config.stream.clone())
}

fn print_item(item: &StreamItem<'_>, engine: &StreamEngine) {
    let today = engine.today();
    let label = item.due_label(today);
    let context = item
        .subtitle
        .as_deref()
        .map(|s| format!("  ({s})"))
        .unwrap_or_default();
    println!(
        "[{:<6}] {:<12} {}{}  <{}:{}>",
        item.urgency_bucket(today),
        label,
        item.title,
        context,
        item.kind.as_str(),
        item.id
    );
}

pub fn run(action: StreamAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    match action {
        StreamAction::Show {
            view,
            max,
            now,
            snapshot,
            json,
        } => {
            let store = open_store(&config, snapshot)?;
            let data = store.load()?;
            let mut engine_config = config.stream.clone();
            if let Some(max) = max {
                engine_config.max_items = max;
            }
            let engine =
                engine_for(&config, resolve_now(now.as_deref())?).with_config(engine_config);
            let view = view.unwrap_or(engine.config().default_view);

            let stream = engine.build(&data);
            let visible = engine.view(&stream, view);
            debug!(%view, total = stream.len(), visible = visible.len(), "rendering stream");

            if json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
                return Ok(());
            }

            if engine.config().show_filters {
                let counters: Vec<String> = engine
                    .view_counts(&stream)
                    .into_iter()
                    .map(|(v, n)| {
                        if v == view {
                            format!("*{v} {n}*")
                        } else {
                            format!("{v} {n}")
                        }
                    })
                    .collect();
                println!("{}", counters.join(" | "));
            }

            if visible.is_empty() {
                println!("All caught up.");
            }
            for item in visible {
                print_item(item, &engine);
            }
        }
        StreamAction::Stats { now, snapshot } => {
            let store = open_store(&config, snapshot)?;
            let data = store.load()?;
            let engine = engine_for(&config, resolve_now(now.as_deref())?);
            let stream = engine.build(&data);
            println!("{}", serde_json::to_string_pretty(&engine.stats(&stream))?);
        }
        StreamAction::Complete {
            collection,
            id,
            now,
            snapshot,
        } => {
            let store = open_store(&config, snapshot)?;
            let data = store.load()?;
            let engine = engine_for(&config, resolve_now(now.as_deref())?);
            let stream = engine.build(&data);
            let item = stream
                .iter()
                .find(|item| item.key() == (collection, id.as_str()))
                .ok_or_else(|| {
                    CoreError::Custom(format!("{collection}/{id} is not in the attention stream"))
                })?;
            let mut actions = TerminalActions { store };
            actions.on_complete_task(item)?;
        }
        StreamAction::Open {
            collection,
            id,
            snapshot,
        } => {
            let store = open_store(&config, snapshot)?;
            let mut actions = TerminalActions { store };
            actions.on_navigate(collection, &id)?;
        }
    }
    Ok(())
}
