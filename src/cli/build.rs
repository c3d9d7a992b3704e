//! One-shot build command.
//!
//! ```text
//! clean → (styles ∥ scripts ∥ images) → rewrite
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::PipelineConfig;
use crate::pipeline::Pipeline;

/// Run the full pipeline once.
pub fn build(config: Arc<PipelineConfig>) -> Result<()> {
    let pipeline = Pipeline::new(config).context("invalid source paths")?;
    pipeline.build().context("build failed")
}
