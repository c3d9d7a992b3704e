//! Images: verbatim copy.

use std::fs;

use rayon::prelude::*;

use super::{Pipeline, PipelineError, TaskReport};
use crate::core::Category;

impl Pipeline {
    /// Copy every image, keeping sub-paths. No manifest entry.
    pub fn images(&self) -> Result<TaskReport, PipelineError> {
        let pattern = self.patterns.get(Category::Images);
        let files = self.scan(Category::Images)?;

        files.par_iter().try_for_each(|file| {
            let output = pattern.output_path(file);
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
            }
            fs::copy(&file.path, &output).map_err(|e| PipelineError::io(&output, e))?;
            Ok::<_, PipelineError>(())
        })?;

        let report = TaskReport {
            written: files.len(),
            failed: 0,
        };
        crate::log!("images"; "{}", report);
        Ok(report)
    }
}
