//! Scripts: minify → suffix → revision → manifest.

use std::fs;
use std::path::Path;

use rayon::prelude::*;

use super::styles::collect_entries;
use super::{Pipeline, PipelineError, TaskReport};
use crate::asset::{SourceFile, minify};
use crate::core::Category;
use crate::manifest::FragmentKind;

impl Pipeline {
    /// Build every script.
    ///
    /// Parse errors are logged per file and leave no output for it. Clients
    /// are not notified; the sequence reloads after rewriting HTML.
    pub fn scripts(&self) -> Result<TaskReport, PipelineError> {
        let pattern = self.patterns.get(Category::Scripts);
        let files = self.scan(Category::Scripts)?;

        let results: Vec<Option<(String, String)>> = files
            .par_iter()
            .map(|file| self.build_script(file, pattern.dest()))
            .collect::<Result<_, _>>()?;

        let (fragment, report) = collect_entries(results);
        self.manifests.merge_fragment(FragmentKind::Scripts, fragment)?;

        crate::log!("scripts"; "{}", report);
        Ok(report)
    }

    fn build_script(
        &self,
        file: &SourceFile,
        dest: &Path,
    ) -> Result<Option<(String, String)>, PipelineError> {
        let source =
            fs::read_to_string(&file.path).map_err(|e| PipelineError::io(&file.path, e))?;

        let code = if self.config.build.minify {
            match minify::minify_js(&source) {
                Some(code) => code,
                None => {
                    let detail = minify::js_parse_error(&source)
                        .unwrap_or_else(|| "parse error".to_string());
                    crate::log!("scripts"; "{}: {}", self.config.root_relative(&file.path).display(), detail);
                    return Ok(None);
                }
            }
        } else {
            source
        };

        self.emit_revisioned(dest, &file.rel, code.as_bytes())
            .map(Some)
    }
}
