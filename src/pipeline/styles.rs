//! Styles: compile → minify → suffix → revision → manifest → stream.

use std::path::Path;

use rayon::prelude::*;

use super::{Pipeline, PipelineError, TaskReport};
use crate::asset::{SourceFile, minify, scss};
use crate::core::Category;
use crate::manifest::{FragmentKind, ManifestFragment};

impl Pipeline {
    /// Build every non-partial stylesheet.
    ///
    /// Compile errors are logged per file and leave no output for it.
    pub fn styles(&self) -> Result<TaskReport, PipelineError> {
        let pattern = self.patterns.get(Category::Styles);
        let files: Vec<SourceFile> = self
            .scan(Category::Styles)?
            .into_iter()
            .filter(|f| !scss::is_partial(&f.path))
            .collect();

        let results: Vec<Option<(String, String)>> = files
            .par_iter()
            .map(|file| self.build_stylesheet(file, pattern.dest()))
            .collect::<Result<_, _>>()?;

        let (fragment, report) = collect_entries(results);
        self.manifests.merge_fragment(FragmentKind::Styles, fragment)?;

        crate::log!("styles"; "{}", report);
        if let Some(reload) = &self.reload {
            reload.stream();
        }
        Ok(report)
    }

    fn build_stylesheet(
        &self,
        file: &SourceFile,
        dest: &Path,
    ) -> Result<Option<(String, String)>, PipelineError> {
        let css = match scss::compile(&file.path) {
            Ok(css) => css,
            Err(e) => {
                crate::log!("styles"; "{}: {}", self.config.root_relative(&file.path).display(), e);
                return Ok(None);
            }
        };

        let css = if self.config.build.minify {
            minify::minify_css(&css).unwrap_or_else(|| {
                crate::debug!("styles"; "minify skipped: {}", file.rel.display());
                css
            })
        } else {
            css
        };

        let logical = file.rel.with_extension("css");
        self.emit_revisioned(dest, &logical, css.as_bytes()).map(Some)
    }
}

/// Split per-file results into a manifest fragment and counts.
pub(super) fn collect_entries(
    results: Vec<Option<(String, String)>>,
) -> (ManifestFragment, TaskReport) {
    let mut report = TaskReport::default();
    let fragment = results
        .into_iter()
        .filter_map(|entry| {
            match entry {
                Some(_) => report.written += 1,
                None => report.failed += 1,
            }
            entry
        })
        .collect();
    (fragment, report)
}
