use std::path::PathBuf;

use rustc_hash::FxHashMap;

use super::types::{ChangeKind, ClassifiedBatch};
use crate::asset::SourcePatterns;
use crate::core::Category;
use crate::utils::path::walk_files;

/// Maps settled raw events to pipeline categories.
///
/// Pipeline: correct_by_existence → expand_dirs → categorize
pub(super) struct EventClassifier;

impl EventClassifier {
    /// Main classification pipeline.
    pub(super) fn classify(
        raw: FxHashMap<PathBuf, ChangeKind>,
        patterns: &SourcePatterns,
    ) -> Option<ClassifiedBatch> {
        let mut changes = raw;

        Self::correct_by_existence(&mut changes);
        Self::expand_dirs(&mut changes);

        let mut categories = Vec::new();
        let mut relevant = Vec::new();
        for (path, kind) in changes {
            let matched = Self::categorize(&path, kind, patterns);
            if matched.is_empty() {
                crate::debug!("watch"; "ignored: {}", path.display());
                continue;
            }
            categories.extend(matched);
            relevant.push((path, kind));
        }

        if relevant.is_empty() {
            return None;
        }

        categories.sort();
        categories.dedup();
        relevant.sort_by(|a, b| a.0.cmp(&b.0));
        Some(ClassifiedBatch {
            changes: relevant,
            categories,
        })
    }

    /// Reconcile event kinds with actual filesystem state.
    ///
    /// Atomic saves report Removed for files that still exist; short-lived
    /// files report Created after they are gone.
    pub(super) fn correct_by_existence(changes: &mut FxHashMap<PathBuf, ChangeKind>) {
        changes.retain(|path, kind| {
            let exists = path.exists();
            match *kind {
                ChangeKind::Created if !exists => {
                    crate::debug!("watch"; "discard created (gone): {}", path.display());
                    return false;
                }
                ChangeKind::Modified if !exists => *kind = ChangeKind::Removed,
                ChangeKind::Removed if exists => *kind = ChangeKind::Modified,
                _ => {}
            }
            true
        });
    }

    /// Replace created or modified directories by the files inside them.
    ///
    /// Moving a folder into a watched tree only reports the folder.
    fn expand_dirs(changes: &mut FxHashMap<PathBuf, ChangeKind>) {
        let dirs: Vec<(PathBuf, ChangeKind)> = changes
            .iter()
            .filter(|(p, k)| **k != ChangeKind::Removed && p.is_dir())
            .map(|(p, k)| (p.clone(), *k))
            .collect();

        for (dir, kind) in dirs {
            changes.remove(&dir);
            for file in walk_files(&dir, true).flatten() {
                changes.entry(file).or_insert(kind);
            }
        }
    }

    /// Categories a single change affects.
    ///
    /// A removed path that no glob matches is taken as a removed directory:
    /// it affects every category whose base contains it.
    pub(super) fn categorize(
        path: &std::path::Path,
        kind: ChangeKind,
        patterns: &SourcePatterns,
    ) -> Vec<Category> {
        let matched = patterns.classify(path);
        if !matched.is_empty() || kind != ChangeKind::Removed {
            return matched;
        }

        Category::ALL
            .into_iter()
            .filter(|&c| path.starts_with(patterns.get(c).base()))
            .collect()
    }
}
