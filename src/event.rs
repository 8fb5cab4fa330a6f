use std::path::PathBuf;

/// All events the app loop handles besides terminal input.
#[derive(Debug)]
pub enum AppEvent {
    /// Something was created, removed or renamed directly under the source root.
    SourceChanged(PathBuf),
    /// The watcher itself reported an error.
    WatchError(String),
}
