//! Actor Coordinator - Wires up the Preview Actor System
//!
//! The Coordinator is a thin orchestrator that:
//! - Creates the runner channel
//! - Wires up actors
//! - Runs them concurrently until shutdown
//!
//! `serve` only needs the WsActor. `watch` adds the FsActor and the
//! TaskRunner, sharing one Pipeline that streams to the WsActor.

mod runtime;

use std::sync::Arc;

use anyhow::{Context, Result};
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::fs::FsActor;
use super::messages::{RunnerMsg, WsMsg};
use super::runner::TaskRunner;
use super::ws::WsActor;
use crate::config::PipelineConfig;
use crate::pipeline::Pipeline;
use crate::reload::ReloadHandle;

const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator {
    config: Arc<PipelineConfig>,
    ws_tx: mpsc::Sender<WsMsg>,
    ws_rx: mpsc::Receiver<WsMsg>,
    shutdown_rx: Option<Receiver<()>>,
    watch: bool,
}

impl Coordinator {
    /// Create with the channel the WebSocket server feeds new clients into.
    pub fn new(
        config: Arc<PipelineConfig>,
        ws_tx: mpsc::Sender<WsMsg>,
        ws_rx: mpsc::Receiver<WsMsg>,
    ) -> Self {
        Self {
            config,
            ws_tx,
            ws_rx,
            shutdown_rx: None,
            watch: false,
        }
    }

    /// Also watch sources and rebuild on change.
    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    /// Set shutdown signal receiver.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system.
    pub async fn run(self) -> Result<()> {
        let ws_actor = WsActor::new(self.ws_rx);

        let watchers = if self.watch {
            let (runner_tx, runner_rx) = mpsc::channel::<RunnerMsg>(CHANNEL_BUFFER);

            let pipeline = Pipeline::new(Arc::clone(&self.config))?
                .with_reload(ReloadHandle::new(self.ws_tx.clone()));
            let fs_actor = FsActor::new(pipeline.patterns().clone(), runner_tx.clone())
                .context("watcher failed")?;
            let runner = TaskRunner::new(runner_rx, Arc::new(pipeline));

            Some((fs_actor, runner, runner_tx))
        } else {
            None
        };

        crate::debug!("actor"; "start");
        runtime::run_actors(ws_actor, self.ws_tx, watchers, self.shutdown_rx).await;
        crate::debug!("actor"; "stopped");
        Ok(())
    }
}
