use std::path::PathBuf;

use notify::{RecursiveMode, Watcher};

/// A glob base and whether the watcher currently covers it.
struct Root {
    path: PathBuf,
    attached: bool,
}

/// Keeps the watcher attached to every glob base.
///
/// Bases may not exist when watching starts (an empty project) or may be
/// deleted and recreated; `maintain` picks them up again.
pub(super) struct WatchRoots {
    roots: Vec<Root>,
}

impl WatchRoots {
    pub(super) fn new(paths: Vec<PathBuf>) -> Self {
        let roots = paths
            .into_iter()
            .map(|path| Root {
                path,
                attached: false,
            })
            .collect();
        Self { roots }
    }

    /// Attach every base that exists now. Failing here is fatal for the
    /// watcher.
    pub(super) fn attach_existing(&mut self, watcher: &mut impl Watcher) -> notify::Result<()> {
        for root in &mut self.roots {
            if root.path.is_dir() {
                watcher.watch(&root.path, RecursiveMode::Recursive)?;
                root.attached = true;
            } else {
                crate::debug!("watch"; "waiting for {}", root.path.display());
            }
        }
        Ok(())
    }

    /// Forget vanished bases and attach the ones that appeared.
    pub(super) fn maintain(&mut self, watcher: &mut impl Watcher) {
        for root in &mut self.roots {
            let exists = root.path.is_dir();
            if root.attached && !exists {
                let _ = watcher.unwatch(&root.path);
                root.attached = false;
                crate::debug!("watch"; "lost {}", root.path.display());
            } else if !root.attached
                && exists
                && watcher.watch(&root.path, RecursiveMode::Recursive).is_ok()
            {
                root.attached = true;
                crate::debug!("watch"; "attached {}", root.path.display());
            }
        }
    }

    #[cfg(test)]
    pub(super) fn attached_count(&self) -> usize {
        self.roots.iter().filter(|r| r.attached).count()
    }
}
