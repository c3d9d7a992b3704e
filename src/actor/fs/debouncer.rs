use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use notify::EventKind;
use notify::event::ModifyKind;
use rustc_hash::FxHashMap;

use super::types::ChangeKind;
use crate::utils::path::normalize_path;

/// Quiet period before a batch counts as settled.
pub(super) const DEBOUNCE_MS: u64 = 200;

/// Sleep used while nothing is pending.
const IDLE: Duration = Duration::from_secs(86400);

/// How a second event on a pending path combines with the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Merge {
    Keep,
    Replace(ChangeKind),
    Discard,
}

/// Combine a pending change with a newer one on the same path.
///
/// | pending  | incoming         | result            |
/// |----------|------------------|-------------------|
/// | removed  | created/modified | incoming (restore)|
/// | modified | removed          | removed           |
/// | created  | removed          | nothing           |
/// | anything | anything else    | pending           |
fn merge(pending: ChangeKind, incoming: ChangeKind) -> Merge {
    use ChangeKind::*;
    match (pending, incoming) {
        (Removed, Created | Modified) => Merge::Replace(incoming),
        (Modified, Removed) => Merge::Replace(Removed),
        (Created, Removed) => Merge::Discard,
        _ => Merge::Keep,
    }
}

/// Pending changes keyed by path, plus the time of the last one.
///
/// Knows nothing about globs; classification happens once a batch settles.
pub(super) struct Debouncer {
    pub(super) changes: FxHashMap<PathBuf, ChangeKind>,
    pub(super) last_event: Option<Instant>,
}

impl Debouncer {
    pub(super) fn new() -> Self {
        Self {
            changes: FxHashMap::default(),
            last_event: None,
        }
    }

    /// Record a notify event. Metadata-only modifications, access events
    /// and editor artifacts are ignored.
    pub(super) fn add_event(&mut self, event: &notify::Event) {
        let Some(kind) = change_kind(event.kind) else {
            return;
        };

        for path in event.paths.iter().filter(|p| !is_temp_file(p)) {
            let path = normalize_path(path);
            let pending = self.changes.get(&path).copied();

            match pending.map_or(Merge::Replace(kind), |pending| merge(pending, kind)) {
                Merge::Keep => continue,
                Merge::Replace(kind) => {
                    crate::debug!("watch"; "{} {}", kind.label(), path.display());
                    self.changes.insert(path, kind);
                }
                Merge::Discard => {
                    crate::debug!("watch"; "transient {}", path.display());
                    self.changes.remove(&path);
                }
            }
            self.last_event = Some(Instant::now());
        }

        // Nothing left to settle
        if self.changes.is_empty() {
            self.last_event = None;
        }
    }

    /// Take the pending batch once the quiet period has passed.
    pub(super) fn take_if_ready(&mut self) -> Option<FxHashMap<PathBuf, ChangeKind>> {
        if !self.is_ready() {
            return None;
        }
        self.last_event = None;
        Some(std::mem::take(&mut self.changes))
    }

    pub(super) fn is_ready(&self) -> bool {
        !self.changes.is_empty()
            && self
                .last_event
                .is_some_and(|last| last.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    /// Time left until the pending batch could settle.
    pub(super) fn sleep_duration(&self) -> Duration {
        self.last_event.map_or(IDLE, |last| {
            Duration::from_millis(DEBOUNCE_MS)
                .saturating_sub(last.elapsed())
                .max(Duration::from_millis(1))
        })
    }
}

fn change_kind(kind: EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Created),
        EventKind::Remove(_) => Some(ChangeKind::Removed),
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(ChangeKind::Modified),
        _ => None,
    }
}

/// Editor swap/backup files and dotfiles.
pub(super) fn is_temp_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();

    name.starts_with('.')
        || name.ends_with('~')
        || name == "4913"
        || matches!(ext, "swp" | "swo" | "swx" | "tmp" | "bak" | "bck" | "backup")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_rules() {
        use ChangeKind::*;
        assert_eq!(merge(Removed, Created), Merge::Replace(Created));
        assert_eq!(merge(Removed, Modified), Merge::Replace(Modified));
        assert_eq!(merge(Modified, Removed), Merge::Replace(Removed));
        assert_eq!(merge(Created, Removed), Merge::Discard);
        assert_eq!(merge(Created, Modified), Merge::Keep);
        assert_eq!(merge(Modified, Modified), Merge::Keep);
    }

    #[test]
    fn test_vim_write_check_file() {
        assert!(is_temp_file(Path::new("/src/js/4913")));
        assert!(is_temp_file(Path::new("/src/js/.app.js.swx")));
        assert!(!is_temp_file(Path::new("/src/js/vendor.bundle.js")));
    }
}
