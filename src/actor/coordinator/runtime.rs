use std::time::Duration;

use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use crate::actor::fs::FsActor;
use crate::actor::messages::{RunnerMsg, WsMsg};
use crate::actor::runner::TaskRunner;
use crate::actor::ws::WsActor;

/// How long a running sequence may take to finish after shutdown.
const DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// Run all actors concurrently.
pub(super) async fn run_actors(
    ws: WsActor,
    ws_tx: mpsc::Sender<WsMsg>,
    watchers: Option<(FsActor, TaskRunner, mpsc::Sender<RunnerMsg>)>,
    shutdown_rx: Option<Receiver<()>>,
) {
    let ws_handle = tokio::spawn(async move { ws.run().await });

    let (runner_handle, runner_tx) = match watchers {
        Some((fs, runner, runner_tx)) => {
            tokio::spawn(async move { fs.run().await });
            (Some(tokio::spawn(async move { runner.run().await })), Some(runner_tx))
        }
        None => (None, None),
    };

    match shutdown_rx {
        Some(rx) => loop {
            if rx.try_recv().is_ok() {
                crate::debug!("actor"; "shutdown signal received");
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        },
        None => {
            let _ = ws_handle.await;
            return;
        }
    }

    if let Some(tx) = runner_tx {
        let _ = tx.send(RunnerMsg::Shutdown).await;
    }
    let _ = ws_tx.send(WsMsg::Shutdown).await;

    if let Some(handle) = runner_handle {
        let _ = tokio::time::timeout(DRAIN_TIMEOUT, handle).await;
    }
    let _ = tokio::time::timeout(DRAIN_TIMEOUT, ws_handle).await;
}
