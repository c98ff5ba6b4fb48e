//! Watches the configuration file for changes.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Quiet period after the last filesystem event before one is reported.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Events emitted by the configuration watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The file was written, created or replaced
    Changed(PathBuf),

    /// The file no longer exists
    Removed(PathBuf),
}

/// Watches a single configuration file.
///
/// The parent directory is watched rather than the file itself, so editors
/// that save by writing a temporary file and renaming it over the original
/// are still seen.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    /// Start watching `path`.
    ///
    /// Returns the watcher and a channel to receive events. Dropping the
    /// watcher closes the channel.
    pub fn new(path: &Path) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let file_name = path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| std::io::Error::other(format!("{} is not a file", path.display())))?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(std::io::Error::other)?;

        let target = path.to_path_buf();
        std::thread::spawn(move || {
            while let Ok(event) = sync_rx.recv() {
                if !concerns(&event, &file_name) {
                    continue;
                }

                // Wait for the burst of events from one save to settle
                loop {
                    match sync_rx.recv_timeout(DEBOUNCE) {
                        Ok(_) => continue,
                        Err(mpsc::RecvTimeoutError::Timeout) => break,
                        Err(mpsc::RecvTimeoutError::Disconnected) => return,
                    }
                }

                let watch_event = if target.exists() {
                    WatchEvent::Changed(target.clone())
                } else {
                    WatchEvent::Removed(target.clone())
                };
                if async_tx.blocking_send(watch_event).is_err() {
                    return;
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Whether a notify event touches the watched file name.
fn concerns(event: &notify::Event, file_name: &OsString) -> bool {
    use notify::EventKind;

    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event
        .paths
        .iter()
        .any(|p| p.file_name() == Some(file_name.as_os_str()))
}
