//! Watch command: build once, then serve and rebuild on change.

use std::sync::Arc;

use anyhow::Result;

use crate::config::PipelineConfig;

pub fn watch(config: Arc<PipelineConfig>) -> Result<()> {
    super::build::build(Arc::clone(&config))?;

    let server = super::serve::bind_server(config)?;
    crate::log!("watch"; "watching for changes (Ctrl+C to stop)");
    server.run(true)
}

