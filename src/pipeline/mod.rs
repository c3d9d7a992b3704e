//! Asset pipeline tasks.
//!
//! ```text
//! build = clean → (styles ∥ scripts ∥ images) → rewrite
//! ```
//!
//! Every task is a method on [`Pipeline`]. Tasks share the output tree and
//! the manifest fragments without locking; correctness rests on the order in
//! which [`Pipeline::build`] and [`Pipeline::run_sequence`] call them.
//!
//! # Modules
//!
//! - `clean` - Remove generated output
//! - `styles` / `scripts` / `images` - Per-category builds
//! - `rewrite` - HTML reference rewriting
//! - `sequence` - Watch-triggered step lists

mod clean;
mod error;
mod images;
mod rewrite;
mod scripts;
pub mod sequence;
mod styles;

#[cfg(test)]
mod tests;

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

pub use error::PipelineError;
pub use sequence::Step;

use crate::asset::{SourceFile, SourcePatterns};
use crate::asset::revision::{content_hash, revisioned, suffixed};
use crate::config::PipelineConfig;
use crate::core::Category;
use crate::manifest::ManifestStore;
use crate::reload::ReloadHandle;
use crate::utils::path::to_slash;

/// Files produced and skipped by one task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskReport {
    pub written: usize,
    pub failed: usize,
}

impl fmt::Display for TaskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} written", self.written)?;
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        Ok(())
    }
}

/// The asset pipeline bound to one project.
pub struct Pipeline {
    config: Arc<PipelineConfig>,
    patterns: SourcePatterns,
    manifests: ManifestStore,
    reload: Option<ReloadHandle>,
}

impl Pipeline {
    pub fn new(config: Arc<PipelineConfig>) -> Result<Self, PipelineError> {
        let patterns = SourcePatterns::new(&config.root, &config.paths)
            .map_err(|(category, e)| PipelineError::Glob(category, e))?;
        let manifests = ManifestStore::new(&config);
        Ok(Self {
            config,
            patterns,
            manifests,
            reload: None,
        })
    }

    /// Notify preview clients from the style and rewrite steps.
    pub fn with_reload(mut self, reload: ReloadHandle) -> Self {
        self.reload = Some(reload);
        self
    }

    #[cfg(test)]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn patterns(&self) -> &SourcePatterns {
        &self.patterns
    }

    /// One-shot build: clean, then styles, scripts and images in
    /// parallel, then rewrite.
    pub fn build(&self) -> Result<(), PipelineError> {
        let start = Instant::now();

        self.clean()?;
        let (styles, (scripts, images)) = rayon::join(
            || self.styles(),
            || rayon::join(|| self.scripts(), || self.images()),
        );
        styles?;
        scripts?;
        images?;
        self.rewrite()?;

        crate::log!("build"; "done in {:.2?}", start.elapsed());
        Ok(())
    }

    /// Run one step.
    pub fn run_step(&self, step: Step) -> Result<(), PipelineError> {
        match step {
            Step::Clean => self.clean().map(drop),
            Step::Styles => self.styles().map(drop),
            Step::Scripts => self.scripts().map(drop),
            Step::Images => self.images().map(drop),
            Step::Rewrite => self.rewrite().map(drop),
            Step::Reload => {
                if let Some(reload) = &self.reload {
                    reload.reload("sources changed");
                }
                Ok(())
            }
        }
    }

    /// Run steps in order, stopping at the first failure.
    pub fn run_sequence(&self, steps: &[Step]) -> Result<(), PipelineError> {
        for &step in steps {
            crate::debug!("watch"; "step {}", step);
            self.run_step(step)?;
        }
        Ok(())
    }

    /// Source files of a category; a failed walk stops the task.
    fn scan(&self, category: Category) -> Result<Vec<SourceFile>, PipelineError> {
        let pattern = self.patterns.get(category);
        pattern.scan().map_err(|e| PipelineError::io(pattern.base(), e))
    }

    /// Write `content` as the suffixed, revisioned form of `logical` under
    /// `dest`, returning its manifest entry.
    fn emit_revisioned(
        &self,
        dest: &Path,
        logical: &Path,
        content: &[u8],
    ) -> Result<(String, String), PipelineError> {
        let build = &self.config.build;
        let original = suffixed(logical, &build.suffix);
        let hash = content_hash(content, build.hash_length);
        let output_rel = revisioned(&original, &hash);

        let output = dest.join(&output_rel);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }
        fs::write(&output, content).map_err(|e| PipelineError::io(&output, e))?;

        Ok((to_slash(&original), to_slash(&output_rel)))
    }
}
