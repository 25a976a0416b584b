use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::destination::{DestinationOptions, from_destination};
use crate::uploader::Uploader;

/// Write-once slot holding the shared storage backend
///
/// The slot is decided at most once: either by an explicit [`set`](Self::set)
/// or by the first lazy construction from a destination. A construction
/// failure decides it as "no backend". Readers get a cloned `Arc`, so no lock
/// is held while an upload runs.
pub struct UploaderCell {
    slot: OnceLock<Option<Arc<dyn Uploader>>>,
}

impl UploaderCell {
    /// Create an undecided cell
    pub const fn new() -> Self {
        Self { slot: OnceLock::new() }
    }

    /// Install a backend
    ///
    /// Returns `false`, leaving the cell untouched, if it was already decided.
    pub fn set(&self, uploader: Arc<dyn Uploader>) -> bool {
        self.slot.set(Some(uploader)).is_ok()
    }

    /// Decide the cell as "no backend"
    ///
    /// Returns `false` if it was already decided.
    pub fn disable(&self) -> bool {
        self.slot.set(None).is_ok()
    }

    /// Whether a backend or "no backend" has been decided
    pub fn is_decided(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Current backend, without triggering lazy construction
    pub fn get(&self) -> Option<Arc<dyn Uploader>> {
        self.slot.get().cloned().flatten()
    }

    /// Current backend, constructing it from a destination on first use
    ///
    /// `destination` is consulted only while the cell is undecided. When it
    /// yields nothing the cell stays undecided and no backend is returned.
    pub fn get_or_init_with<D, O>(&self, destination: D, options: O) -> Option<Arc<dyn Uploader>>
    where
        D: FnOnce() -> Option<String>,
        O: FnOnce() -> DestinationOptions,
    {
        if let Some(decided) = self.slot.get() {
            return decided.clone();
        }

        let destination = destination()?;

        self.slot
            .get_or_init(|| match from_destination(&destination, &options()) {
                Ok(uploader) => {
                    tracing::debug!(backend = uploader.name(), destination = %destination, "storage backend ready");
                    Some(uploader)
                }
                Err(e) => {
                    tracing::warn!(error = %e, destination = %destination, "failed to create storage backend, content will be discarded");
                    None
                }
            })
            .clone()
    }
}

impl Default for UploaderCell {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UploaderCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.slot.get() {
            None => "undecided",
            Some(None) => "disabled",
            Some(Some(uploader)) => uploader.name(),
        };
        f.debug_struct("UploaderCell").field("state", &state).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::fs::FsUploader;

    #[test]
    fn first_set_wins() {
        let cell = UploaderCell::new();

        assert!(cell.set(Arc::new(FsUploader::new("/first"))));
        assert!(!cell.set(Arc::new(FsUploader::new("/second"))));
        assert!(!cell.disable());
        assert_eq!(cell.get().unwrap().name(), "filesystem");
    }

    #[test]
    fn missing_destination_leaves_cell_undecided() {
        let cell = UploaderCell::new();

        assert!(cell.get_or_init_with(|| None, DestinationOptions::default).is_none());
        assert!(!cell.is_decided());

        assert!(cell.get_or_init_with(|| Some("/tmp/genai".to_owned()), DestinationOptions::default).is_some());
        assert!(cell.is_decided());
    }

    #[test]
    fn construction_failure_decides_no_backend() {
        let cell = UploaderCell::new();

        assert!(cell.get_or_init_with(|| Some("ftp://host/x".to_owned()), DestinationOptions::default).is_none());
        assert!(cell.is_decided());

        // A later valid destination is not consulted
        assert!(cell.get_or_init_with(|| Some("/tmp/genai".to_owned()), DestinationOptions::default).is_none());
    }

    #[test]
    fn destination_is_read_only_while_undecided() {
        let cell = UploaderCell::new();
        let reads = AtomicUsize::new(0);
        let read = || {
            reads.fetch_add(1, Ordering::SeqCst);
            Some("/tmp/genai".to_owned())
        };

        cell.get_or_init_with(read, DestinationOptions::default);
        cell.get_or_init_with(read, DestinationOptions::default);

        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_setters_agree_on_one_winner() {
        const THREADS: usize = 8;

        let root = tempfile::tempdir().unwrap();
        let cell = UploaderCell::new();
        let barrier = Barrier::new(THREADS);
        let wins = AtomicUsize::new(0);
        let winner = AtomicUsize::new(usize::MAX);

        std::thread::scope(|scope| {
            for i in 0..THREADS {
                let (cell, barrier, wins, winner) = (&cell, &barrier, &wins, &winner);
                let base = root.path().join(format!("dest-{i}"));
                scope.spawn(move || {
                    barrier.wait();
                    if cell.set(Arc::new(FsUploader::new(base))) {
                        wins.fetch_add(1, Ordering::SeqCst);
                        winner.store(i, Ordering::SeqCst);
                    }
                    assert!(cell.get().is_some());
                });
            }
        });

        assert_eq!(wins.load(Ordering::SeqCst), 1);

        let winning_base = root.path().join(format!("dest-{}", winner.load(Ordering::SeqCst)));
        for _ in 0..2 {
            let locator = cell.get().unwrap().upload("r_input.json", &json!([])).await.unwrap();
            assert_eq!(locator, winning_base.join("r_input.json").display().to_string());
        }
    }

    #[test]
    fn debug_reports_state() {
        let cell = UploaderCell::new();
        assert!(format!("{cell:?}").contains("undecided"));
        cell.disable();
        assert!(format!("{cell:?}").contains("disabled"));
    }
}
