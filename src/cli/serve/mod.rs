//! Preview server with live reload support.

mod content;
mod lifecycle;
mod path;
mod response;

use crate::{actor::messages::WsMsg, config::PipelineConfig, debug, log};
use anyhow::Result;
use crossbeam::channel;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tiny_http::{Request, Server};
use tokio::sync::mpsc;

/// Mailbox size for the WebSocket actor
const WS_CHANNEL_BUFFER: usize = 64;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    config: Arc<PipelineConfig>,
    ws_port: u16,
    ws_tx: mpsc::Sender<WsMsg>,
    ws_rx: mpsc::Receiver<WsMsg>,
    shutdown_rx: channel::Receiver<()>,
}

/// Serve the output tree as it is, without building or watching.
pub fn serve(config: Arc<PipelineConfig>) -> Result<()> {
    bind_server(config)?.run(false)
}

/// Bind the HTTP and reload servers without starting the request loop.
///
/// Both ports are known once this returns, so every served page gets the
/// right reload address injected.
pub fn bind_server(config: Arc<PipelineConfig>) -> Result<BoundServer> {
    let serve = &config.serve;
    let (server, addr) = lifecycle::bind_with_retry(serve.interface, serve.port)?;
    let server = Arc::new(server);

    let (ws_tx, ws_rx) = mpsc::channel::<WsMsg>(WS_CHANNEL_BUFFER);
    let ws_port = crate::reload::server::start_ws_server_with_channel(
        serve.interface,
        serve.reload_port,
        ws_tx.clone(),
    )?;
    debug!("reload"; "ws://{}:{}", serve.interface, ws_port);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        config,
        ws_port,
        ws_tx,
        ws_rx,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Start the request loop (blocking). With `watch`, sources are watched
    /// and rebuilt while serving.
    pub fn run(self, watch: bool) -> Result<()> {
        let actor_handle = lifecycle::spawn_actors(
            Arc::clone(&self.config),
            self.ws_tx,
            self.ws_rx,
            watch,
            self.shutdown_rx,
        );
        run_request_loop(&self.server, self.config.output_dir(), self.ws_port)?;
        lifecycle::wait_for_shutdown(actor_handle);
        Ok(())
    }
}

fn run_request_loop(server: &Server, output_dir: PathBuf, ws_port: u16) -> Result<()> {
    // Slow file reads must not block other requests
    let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build()?;
    let output_dir = Arc::new(output_dir);

    for request in server.incoming_requests() {
        let output_dir = Arc::clone(&output_dir);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &output_dir, ws_port) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, output_dir: &Path, ws_port: u16) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    // Served from memory, not from the output tree
    {
        use crate::embed::serve::HOTRELOAD_JS;
        if request.url() == HOTRELOAD_JS.url_path() {
            return response::respond_hotreload_js(request, ws_port);
        }
    }

    if let Some(path) = path::resolve_path(request.url(), output_dir) {
        return response::respond_file(request, &path);
    }

    response::respond_not_found(request, output_dir)
}
