//! Debounced change notification for a single markdown file.
//!
//! Editors often emit several events per save (truncate, write, rename), so
//! raw `notify` events are coalesced and only delivered once the file has
//! been quiet for the debounce interval.

use std::ffi::OsString;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::CliError;

/// How often the drain thread checks for ready events.
const DRAIN_INTERVAL: Duration = Duration::from_millis(20);

/// Kind of change observed on the watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

/// Pending change waiting to be emitted.
struct PendingChange {
    kind: ChangeKind,
    deadline: Instant,
}

/// Thread-safe debouncer for one file.
pub(crate) struct Debouncer {
    pending: Mutex<Option<PendingChange>>,
    debounce_duration: Duration,
}

impl Debouncer {
    /// Create a new debouncer with the specified debounce duration.
    pub(crate) fn new(debounce_duration: Duration) -> Self {
        Self {
            pending: Mutex::new(None),
            debounce_duration,
        }
    }

    /// Record a change, pushing the deadline back.
    pub(crate) fn record(&self, kind: ChangeKind) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let deadline = Instant::now() + self.debounce_duration;

        let kind = match pending.take() {
            None => Some(kind),
            Some(existing) => Self::coalesce(existing.kind, kind),
        };
        *pending = kind.map(|kind| PendingChange { kind, deadline });
    }

    /// Coalesce two change kinds.
    ///
    /// Returns `None` when both cancel out (created, then removed).
    #[allow(clippy::match_same_arms)]
    fn coalesce(existing: ChangeKind, new: ChangeKind) -> Option<ChangeKind> {
        use ChangeKind::{Created, Modified, Removed};

        match (existing, new) {
            (Created, Created | Modified) => Some(Created),
            (Created, Removed) => None,
            (Modified, Created) => Some(Created),
            (Modified, Modified) => Some(Modified),
            (Modified | Removed, Removed) => Some(Removed),
            // Replaced by an atomic save
            (Removed, Created) => Some(Modified),
            (Removed, Modified) => Some(Removed),
        }
    }

    /// Take the pending change if its deadline has passed.
    pub(crate) fn take_ready(&self) -> Option<ChangeKind> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let ready = pending
            .as_ref()
            .is_some_and(|change| change.deadline <= Instant::now());
        if ready {
            pending.take().map(|change| change.kind)
        } else {
            None
        }
    }
}

/// Watches one file and yields debounced [`ChangeKind`]s.
///
/// The parent directory is watched so that saves which replace the file
/// (write to temp, rename over) are still seen. Dropping the watcher stops
/// the background thread.
pub(crate) struct FileWatcher {
    events: mpsc::Receiver<ChangeKind>,
    _watcher: RecommendedWatcher,
    _shutdown: mpsc::Sender<()>,
}

impl FileWatcher {
    /// Start watching `path`.
    pub(crate) fn new(path: &Path, debounce: Duration) -> Result<Self, CliError> {
        let file_name = path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| CliError::Validation(format!("Not a file: {}", path.display())))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir()?,
        };

        let debouncer = Arc::new(Debouncer::new(debounce));
        let debouncer_for_watcher = Arc::clone(&debouncer);

        let mut watcher =
            notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!(error = %e, "File watcher error");
                        return;
                    }
                };
                let Some(kind) = change_kind(event.kind) else {
                    return;
                };
                if event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(file_name.as_os_str()))
                {
                    tracing::debug!(?kind, "Recorded change");
                    debouncer_for_watcher.record(kind);
                }
            })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        let (event_tx, event_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        std::thread::spawn(move || {
            loop {
                match shutdown_rx.recv_timeout(DRAIN_INTERVAL) {
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                    Err(mpsc::RecvTimeoutError::Timeout) => {}
                }

                if let Some(kind) = debouncer.take_ready()
                    && event_tx.send(kind).is_err()
                {
                    return;
                }
            }
        });

        Ok(Self {
            events: event_rx,
            _watcher: watcher,
            _shutdown: shutdown_tx,
        })
    }

    /// Block until the next change. Returns `None` once the watcher stops.
    pub(crate) fn recv(&self) -> Option<ChangeKind> {
        self.events.recv().ok()
    }
}

/// Map a `notify` event kind to a change kind, ignoring access events.
fn change_kind(kind: notify::EventKind) -> Option<ChangeKind> {
    match kind {
        notify::EventKind::Create(_) => Some(ChangeKind::Created),
        notify::EventKind::Modify(_) => Some(ChangeKind::Modified),
        notify::EventKind::Remove(_) => Some(ChangeKind::Removed),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};

    use super::*;

    #[test]
    fn test_change_emitted_after_deadline() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.record(ChangeKind::Modified);

        assert_eq!(debouncer.take_ready(), None);

        thread::sleep(Duration::from_millis(20));
        assert_eq!(debouncer.take_ready(), Some(ChangeKind::Modified));
        assert_eq!(debouncer.take_ready(), None);
    }

    #[test]
    fn test_repeated_changes_coalesce() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.record(ChangeKind::Modified);
        debouncer.record(ChangeKind::Modified);
        debouncer.record(ChangeKind::Modified);

        thread::sleep(Duration::from_millis(20));
        assert_eq!(debouncer.take_ready(), Some(ChangeKind::Modified));
        assert_eq!(debouncer.take_ready(), None);
    }

    #[test]
    fn test_created_then_removed_discarded() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.record(ChangeKind::Created);
        debouncer.record(ChangeKind::Removed);

        thread::sleep(Duration::from_millis(20));
        assert_eq!(debouncer.take_ready(), None);
    }

    #[test]
    fn test_atomic_save_is_modification() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.record(ChangeKind::Removed);
        debouncer.record(ChangeKind::Created);

        thread::sleep(Duration::from_millis(20));
        assert_eq!(debouncer.take_ready(), Some(ChangeKind::Modified));
    }

    #[test]
    fn test_new_change_extends_deadline() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        debouncer.record(ChangeKind::Modified);
        thread::sleep(Duration::from_millis(30));
        debouncer.record(ChangeKind::Modified);
        thread::sleep(Duration::from_millis(30));

        assert_eq!(debouncer.take_ready(), None);
    }

    #[test]
    fn test_coalesce_matrix() {
        use ChangeKind::{Created, Modified, Removed};

        assert_eq!(Debouncer::coalesce(Created, Modified), Some(Created));
        assert_eq!(Debouncer::coalesce(Modified, Created), Some(Created));
        assert_eq!(Debouncer::coalesce(Modified, Removed), Some(Removed));
        assert_eq!(Debouncer::coalesce(Removed, Modified), Some(Removed));
        assert_eq!(Debouncer::coalesce(Removed, Removed), Some(Removed));
    }

    #[test]
    fn test_change_kind_mapping() {
        assert_eq!(
            change_kind(notify::EventKind::Create(CreateKind::File)),
            Some(ChangeKind::Created)
        );
        assert_eq!(
            change_kind(notify::EventKind::Modify(ModifyKind::Any)),
            Some(ChangeKind::Modified)
        );
        assert_eq!(
            change_kind(notify::EventKind::Remove(RemoveKind::File)),
            Some(ChangeKind::Removed)
        );
        assert_eq!(
            change_kind(notify::EventKind::Access(AccessKind::Any)),
            None
        );
    }

    #[test]
    fn test_watcher_rejects_path_without_file_name() {
        let result = FileWatcher::new(Path::new("/"), Duration::from_millis(10));
        assert!(matches!(result, Err(CliError::Validation(_))));
    }
}
