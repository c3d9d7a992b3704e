//! FileSystem Actor
//!
//! Watches the glob bases and sends settled, classified batches to the
//! TaskRunner.
//!
//! Architecture:
//! ```text
//! Watcher → Debouncer (pure timing) → Classifier (glob → category) → RunnerMsg
//! ```

use std::time::Duration;

use notify::RecommendedWatcher;
use tokio::sync::mpsc;

use super::messages::RunnerMsg;
use crate::asset::SourcePatterns;

// Glob matching of settled changes.
mod classifier;
// Pure timing and deduplication.
mod debouncer;
// Shared fs event types.
mod types;
// Watch root attach/re-attach lifecycle.
mod watch_roots;


use classifier::EventClassifier;
use debouncer::Debouncer;
use types::ClassifiedBatch;
use watch_roots::WatchRoots;

/// Upper bound between checks for watch roots that appeared.
const ROOT_POLL: Duration = Duration::from_secs(1);

/// FileSystem Actor - watches for source changes
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    /// Watch-root consistency layer
    watch_roots: WatchRoots,
    /// Channel to send batches to TaskRunner
    runner_tx: mpsc::Sender<RunnerMsg>,
    /// Debouncer state
    debouncer: Debouncer,
    /// Compiled category globs
    patterns: SourcePatterns,
}

impl FsActor {
    /// Create a new FsActor and start watching immediately.
    pub fn new(patterns: SourcePatterns, runner_tx: mpsc::Sender<RunnerMsg>) -> notify::Result<Self> {
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        // Missing roots are attached once they appear
        let mut watch_roots = WatchRoots::new(patterns.bases());
        watch_roots.attach_existing(&mut watcher)?;

        Ok(Self {
            notify_rx,
            watcher,
            watch_roots,
            runner_tx,
            debouncer: Debouncer::new(),
            patterns,
        })
    }

    /// Run the actor event loop
    pub async fn run(self) {
        let notify_rx = self.notify_rx;
        let runner_tx = self.runner_tx;
        let patterns = self.patterns;
        let mut debouncer = self.debouncer;
        let mut watcher = self.watcher;
        let mut watch_roots = self.watch_roots;

        let (async_tx, mut async_rx) = mpsc::channel::<notify::Event>(64);

        // Bridge notify's sync channel into the async loop
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        loop {
            tokio::select! {
                biased;
                Some(event) = async_rx.recv() => debouncer.add_event(&event),
                _ = tokio::time::sleep(debouncer.sleep_duration().min(ROOT_POLL)) => {
                    watch_roots.maintain(&mut watcher);
                    if process_changes(&mut debouncer, &runner_tx, &patterns).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}

/// Forward a settled batch to the runner.
///
/// Returns `Err(())` if the runner shut down
async fn process_changes(
    debouncer: &mut Debouncer,
    runner_tx: &mpsc::Sender<RunnerMsg>,
    patterns: &SourcePatterns,
) -> Result<(), ()> {
    let Some(raw_events) = debouncer.take_if_ready() else {
        return Ok(());
    };

    let Some(batch) = EventClassifier::classify(raw_events, patterns) else {
        return Ok(());
    };

    log_batch(&batch);
    runner_tx
        .send(RunnerMsg::Changed(batch.categories))
        .await
        .map_err(|_| ())
}

/// Changes listed one per line before the rest is summarised.
const LOGGED_CHANGES: usize = 5;

fn log_batch(batch: &ClassifiedBatch) {
    crate::logger::status_detach();
    for (path, kind) in batch.changes.iter().take(LOGGED_CHANGES) {
        crate::log!("watch"; "{}: {}", kind.label(), path.display());
    }
    let rest = batch.changes.len().saturating_sub(LOGGED_CHANGES);
    if rest > 0 {
        crate::log!("watch"; "... and {} more", rest);
    }
}
