use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, DebouncedEventKind, Debouncer};

use crate::event::AppEvent;

pub type SourceWatcher = Debouncer<notify::RecommendedWatcher>;

/// Watch the immediate children of `root`, posting one `SourceChanged` per
/// debounced batch. Only the event channel crosses the thread boundary.
pub fn start_watcher(
    root: &Path,
    debounce: Duration,
    tx: mpsc::Sender<AppEvent>,
) -> Result<SourceWatcher> {
    let mut debouncer = new_debouncer(
        debounce,
        move |res: Result<Vec<DebouncedEvent>, notify::Error>| {
            let events = match res {
                Ok(events) => events,
                Err(e) => {
                    let _ = tx.send(AppEvent::WatchError(e.to_string()));
                    return;
                }
            };
            if let Some(path) = first_settled(&events) {
                tracing::debug!(path = %path.display(), "source root changed");
                let _ = tx.send(AppEvent::SourceChanged(path));
            }
        },
    )?;

    debouncer
        .watcher()
        .watch(root, notify::RecursiveMode::NonRecursive)?;
    tracing::info!(root = %root.display(), "watching source root");

    Ok(debouncer)
}

/// Path of the first event that has settled. `AnyContinuous` events are
/// still in progress and will be reported again.
fn first_settled(events: &[DebouncedEvent]) -> Option<PathBuf> {
    events
        .iter()
        .find(|e| e.kind == DebouncedEventKind::Any)
        .map(|e| e.path.clone())
}
